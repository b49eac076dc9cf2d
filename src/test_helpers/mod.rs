//! Shared builders and scratch-directory helpers for unit tests.

pub mod fixtures;
pub mod temp;
