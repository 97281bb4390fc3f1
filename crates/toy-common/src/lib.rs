//! Common utilities for the toy style engine.
//!
//! This crate provides shared infrastructure used by all engine components:
//! - **Warning System** - colored terminal output for ignored or unsupported input

pub mod warning;
