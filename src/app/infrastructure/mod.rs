//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with external systems:
//! - Error types
//! - Whole-file document I/O

pub mod error;
pub mod file_io;
