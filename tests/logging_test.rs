// ABOUTME: Unit tests for logging functionality
// ABOUTME: Validates logging defaults and environment variable handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use liftlog::logging::{LogFormat, LoggingConfig};
use serial_test::serial;
use std::env;

const LOGGING_VARS: [&str; 6] = [
    "RUST_LOG",
    "LOG_FORMAT",
    "ENVIRONMENT",
    "SERVICE_NAME",
    "LOG_INCLUDE_LOCATION",
    "LOG_INCLUDE_THREAD",
];

fn clear_logging_vars() {
    for name in LOGGING_VARS {
        env::remove_var(name);
    }
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    clear_logging_vars();
    env::set_var("RUST_LOG", "debug");
    env::set_var("LOG_FORMAT", "json");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("SERVICE_NAME", "test-service");

    let config = LoggingConfig::from_env();
    clear_logging_vars();

    assert_eq!(config.level, "debug");
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.environment, "production");
    assert_eq!(config.service_name, "test-service");
    assert!(config.include_location); // Always on in production
    assert!(config.include_thread);
}

#[test]
#[serial]
fn test_logging_config_flags_outside_production() {
    clear_logging_vars();
    env::set_var("LOG_FORMAT", "pretty");
    env::set_var("LOG_INCLUDE_LOCATION", "1");

    let config = LoggingConfig::from_env();
    clear_logging_vars();

    assert_eq!(config.format, LogFormat::Pretty);
    assert!(config.include_location);
    assert!(!config.include_thread);
}

#[test]
#[serial]
fn test_unknown_format_is_compact() {
    clear_logging_vars();
    env::set_var("LOG_FORMAT", "xml");

    let config = LoggingConfig::from_env();
    clear_logging_vars();

    assert_eq!(config.format, LogFormat::Compact);
    assert_eq!(config.level, "warn");
}

#[test]
fn test_default_logging_config() {
    let config = LoggingConfig::default();

    assert_eq!(config.level, "warn");
    assert_eq!(config.format, LogFormat::Compact);
    assert_eq!(config.environment, "development");
    assert_eq!(config.service_name, "liftlog");
    assert!(!config.include_location);
}

#[test]
fn test_verbose_raises_level() {
    let config = LoggingConfig::default().verbose();
    assert_eq!(config.level, "debug");
}
