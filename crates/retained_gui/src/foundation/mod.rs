//! Foundation module - Core utilities shared by every subsystem
//!
//! - Frame pacing and stopwatches
//! - Thread affinity checks for windowing and GL calls
//! - Logging setup

pub mod time;
pub mod thread;
pub mod logging;
