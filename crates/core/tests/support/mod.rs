//! Shared test helpers for `traincast-core` integration tests.
//!
//! These helpers provide in-memory ports and event fixtures so workflow
//! tests can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod directory;
pub mod fixtures;
pub mod meetings;
pub mod writers;
