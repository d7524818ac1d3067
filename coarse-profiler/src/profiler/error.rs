//! Errors returned by the checked profiler operations.
//!
//! The plain `open`/`close`/export calls never return errors. Their `try_*`
//! counterparts report caller-discipline problems as [`ProfilerError`]
//! instead of panicking or exporting nonsense durations.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilerError {
    /// `close` was called with no sample open.
    NoOpenSample,
    /// An export was requested while samples were still open.
    OpenSamples {
        /// How many samples are on the open chain.
        open: usize,
    },
}

impl fmt::Display for ProfilerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfilerError::NoOpenSample => write!(f, "close called with no open sample"),
            ProfilerError::OpenSamples { open } => {
                write!(f, "cannot export: {open} sample(s) still open")
            }
        }
    }
}

impl std::error::Error for ProfilerError {}
