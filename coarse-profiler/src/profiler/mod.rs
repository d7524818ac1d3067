pub mod analysis;
pub mod clock;
pub mod error;
pub mod format;
pub mod pool;
pub mod recorder;
pub mod sample;
pub mod writer;

pub use analysis::{CallTree, NameStats, ProfileAnalysis, analyze_profile, print_analysis};
#[cfg(target_os = "linux")]
pub use clock::MonotonicClock;
pub use clock::{Clock, InstantClock, ManualClock, NANOS_PER_MICRO, NANOS_PER_MILLI};
pub use error::ProfilerError;
pub use format::{
    ChromeTraceEvent, append_chrome_tracing_events, chrome_trace_events, to_chrome_tracing_events,
};
pub use pool::{DEFAULT_CAPACITY, MIN_CAPACITY, SamplePool};
pub use recorder::{Profiler, ProfilerBuilder, ScopedSample};
pub use sample::{NO_PARENT, REALLOCATE_SAMPLE_POOL, Sample, UNSET_END_NANOS};
pub use writer::{JsonArrayWriter, NullWriter, TraceWriter, write_chrome_trace, write_trace_file};
