//! # CleanSweep
//!
//! Finds and reclaims disk space held by OS and application junk data
//! (caches, temp files, logs, crash dumps) on Windows, macOS and Linux.
//!
//! - **Catalog**: per-platform category → candidate path tables, built fresh
//!   from the current environment on every call
//! - **Scan**: read-only, permission-tolerant size report ranked by size
//! - **Clean**: a lazy event stream that empties one category per event and
//!   always ends with a single summary record

pub mod catalog;
pub mod cleaner;
pub mod cli;
pub mod common;
pub mod scanner;
