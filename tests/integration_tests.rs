//! Integration tests runner

#[path = "common.rs"]
mod common;

#[path = "support/mod.rs"]
mod support;

#[path = "integration/config_test.rs"]
mod config_test;

#[path = "integration/marketing_test.rs"]
mod marketing_test;

#[path = "integration/realtime_test.rs"]
mod realtime_test;

#[path = "integration/static_test.rs"]
mod static_test;
