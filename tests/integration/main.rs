//! Integration tests

mod api_tests;
mod record_tests;
