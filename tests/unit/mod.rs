//! Integration test suite for the replay layer.

mod export_tests;
mod loader_tests;
mod session_tests;
