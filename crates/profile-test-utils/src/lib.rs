//! Shared test utilities for the profile-resolver workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only and is never published.
//!
//! # Modules
//!
//! - [`fixtures`]: scope shorthands and the canonical profile scenarios
//! - [`dir`]: [`TestProfileDir`](dir::TestProfileDir) for on-disk profile documents

pub mod dir;
pub mod fixtures;
