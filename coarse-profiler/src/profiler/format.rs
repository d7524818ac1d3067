//! Chrome Trace Event Format export.
//!
//! Each sample becomes one "complete" event (`ph: "X"`):
//!
//! ```text
//! { "pid":1, "tid":1, "ts": <us>, "dur": <us>, "ph":"X", "name":"<name>", "args":{ "ms":<ms> }}
//! ```
//!
//! `ts` and `dur` are microseconds, `args.ms` is the duration in milliseconds.
//! All three are printed with six decimals. `pid`/`tid` are fixed at 1: one
//! profiler records one logical thread.
//!
//! Events come out in pool slot order, which is the order samples were
//! opened. A sample that is still open is exported with an end of
//! [`UNSET_END_NANOS`](crate::profiler::UNSET_END_NANOS), so its `dur` is
//! negative.
//!
//! The exporter yields individual objects. Joining them into a loadable
//! `[ ... ]` document is done by a [`TraceWriter`](crate::profiler::TraceWriter).

use crate::profiler::clock::Clock;
use crate::profiler::recorder::Profiler;
use crate::profiler::sample::Sample;
use serde::{Serialize, Serializer};
use std::fmt;

pub const PID: u32 = 1;
pub const TID: u32 = 1;
pub const PHASE_COMPLETE: &str = "X";

/// One exported trace event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromeTraceEvent<'n> {
    /// Begin time, microseconds since the profiler started.
    pub ts: f64,
    /// Duration in microseconds.
    pub dur: f64,
    /// Duration in milliseconds.
    pub ms: f64,
    pub name: &'n str,
}

impl<'n> From<&Sample<'n>> for ChromeTraceEvent<'n> {
    fn from(sample: &Sample<'n>) -> Self {
        Self {
            ts: sample.begin_micros(),
            dur: sample.duration_micros(),
            ms: sample.duration_millis(),
            name: sample.name,
        }
    }
}

impl fmt::Display for ChromeTraceEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ \"pid\":{PID}, \"tid\":{TID}, \"ts\": {:.6}, \"dur\": {:.6}, \"ph\":\"{PHASE_COMPLETE}\", \"name\":{}, \"args\":{{ \"ms\":{:.6} }}}}",
            self.ts,
            self.dur,
            JsonStr(self.name),
            self.ms,
        )
    }
}

#[derive(Serialize)]
struct WireEvent<'a> {
    pid: u32,
    tid: u32,
    ts: f64,
    dur: f64,
    ph: &'static str,
    name: &'a str,
    args: WireArgs,
}

#[derive(Serialize)]
struct WireArgs {
    ms: f64,
}

/// Serializes to the same JSON value as the `Display` form.
impl Serialize for ChromeTraceEvent<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireEvent {
            pid: PID,
            tid: TID,
            ts: self.ts,
            dur: self.dur,
            ph: PHASE_COMPLETE,
            name: self.name,
            args: WireArgs { ms: self.ms },
        }
        .serialize(serializer)
    }
}

/// A string written as a quoted, escaped JSON string literal.
struct JsonStr<'a>(&'a str);

impl fmt::Display for JsonStr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        for ch in self.0.chars() {
            match ch {
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '\t' => f.write_str("\\t")?,
                c if c.is_control() => write!(f, "\\u{:04x}", c as u32)?,
                c => write!(f, "{c}")?,
            }
        }
        f.write_str("\"")
    }
}

/// Typed events for every recorded sample, in slot order.
pub fn chrome_trace_events<'a, 'n>(
    samples: &'a [Sample<'n>],
) -> impl Iterator<Item = ChromeTraceEvent<'n>> + 'a {
    samples.iter().map(ChromeTraceEvent::from)
}

/// Format every sample of `profiler` as one Chrome trace event string.
pub fn to_chrome_tracing_events<C: Clock>(profiler: &Profiler<'_, C>) -> Vec<String> {
    let mut events = Vec::with_capacity(profiler.len());
    append_chrome_tracing_events(profiler, &mut events);
    events
}

/// Same as [`to_chrome_tracing_events`], appending to an existing list.
pub fn append_chrome_tracing_events<C: Clock>(
    profiler: &Profiler<'_, C>,
    append_to: &mut Vec<String>,
) {
    append_to.reserve(profiler.len());
    append_to.extend(chrome_trace_events(profiler.samples()).map(|event| event.to_string()));
}
