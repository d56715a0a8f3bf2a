//! Integration tests for draggable.
//!
//! These tests drive complete pointer sessions through a headless scene
//! and check positions, host side effects and notifications end-to-end.

mod drag_flow_tests;
