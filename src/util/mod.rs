//! Filesystem utilities shared by the transaction and dispatch layers.
//!
//! - [`file_status`]: path type probes and metadata copy

pub mod file_status;

pub use file_status::{is_reg_file, path_occupied, set_file_stat, FileStat, StatApplied};
