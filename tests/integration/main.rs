//! Integration tests

mod config_test;
mod estimate_test;
mod pricing_test;
