// ABOUTME: Core types and constants for the liftlog strength-training analytics workspace
// ABOUTME: Foundation crate with error handling, workout data models, and tunable constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Liftlog Core
//!
//! Foundation crate providing shared types and constants for the liftlog
//! workout analytics engine. This crate is designed to change infrequently,
//! enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **models**: Logged sets, derived sets, date-keyed series, forecasts and summaries
//! - **constants**: Named defaults for every analysis threshold and window

/// Unified error handling system with standard error codes
pub mod errors;

/// Workout data models (`WorkoutSet`, `DerivedSet`, `TimeSeries`, ...)
pub mod models;

/// Analysis constants organized by domain
pub mod constants;
