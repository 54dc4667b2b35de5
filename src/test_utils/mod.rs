//! Shared test utilities for sqa.

pub mod fixtures;
