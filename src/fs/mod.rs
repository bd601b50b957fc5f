//! Filesystem utilities for mdan.
//!
//! This module provides safe filesystem operations, particularly atomic writes
//! used for project state snapshots.

pub mod atomic;

pub use atomic::atomic_write;
pub use atomic::atomic_write_file;
