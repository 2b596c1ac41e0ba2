//! Services layer - business operations and utilities.
//!
//! This module contains business logic and operations:
//! - Text operations (line arithmetic, find all, replace all)
//! - Incremental search cursor
//! - Word completion from the document

pub mod completion;
pub mod search;
pub mod text_ops;
