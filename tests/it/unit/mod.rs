//! Unit tests for draggable.

mod config_tests;
mod perf_tests;
mod scene_tests;
