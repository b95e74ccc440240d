//! Integration tests for the workspace crate
//!
//! These tests verify that the tree cache, mention index and session
//! registry work together through a [`workspace::Workspace`].

#[path = "../common/mod.rs"]
pub mod common;

pub mod cli;
pub mod mentions;
