#![doc = include_str!("../README.md")]

pub mod profiler;

pub use profiler::{Profiler, ProfilerError, ScopedSample, to_chrome_tracing_events};
