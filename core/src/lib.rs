//! Task contract for assistant runtimes.
//!
//! A task carries identity, run-scoped state and output-shaping settings in a
//! [`task::TaskState`], and does its work through the [`task::Task`] trait.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod memory;
pub mod task;
