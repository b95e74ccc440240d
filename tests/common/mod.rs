//! Shared test utilities for the workspace crate
//!
//! - Scripted tree fetchers whose responses are released by the test
//! - Gated file readers for racing reads against tab changes
//! - Tree fixtures

pub mod fetchers;
pub mod fixtures;
pub mod readers;
