//! Time sources for the profiler.
//!
//! Every clock reports nanoseconds elapsed since the clock itself was created.
//! Each [`Profiler`](crate::profiler::Profiler) owns its own clock, so two
//! profilers (e.g. one per thread) never share a start point.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Nanoseconds per microsecond, used when converting to trace `ts`/`dur`.
pub const NANOS_PER_MICRO: f64 = 1_000.0;

/// Nanoseconds per millisecond, used for the `args.ms` convenience field.
pub const NANOS_PER_MILLI: f64 = 1_000_000.0;

/// A monotonic source of elapsed time.
///
/// Implementations must never go backwards. The profiler trusts the value it
/// gets and does not correct for a clock that does.
pub trait Clock {
    /// Nanoseconds elapsed since the clock was started.
    fn elapsed_nanos(&self) -> u64;
}

/// Default clock, backed by [`std::time::Instant`].
#[derive(Debug, Clone, Copy)]
pub struct InstantClock {
    start: Instant,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn start(&self) -> Instant {
        self.start
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for InstantClock {
    #[inline]
    fn elapsed_nanos(&self) -> u64 {
        self.start.elapsed().as_nanos() as u64
    }
}

/// Read `CLOCK_MONOTONIC` in nanoseconds.
#[cfg(target_os = "linux")]
pub(crate) fn clock_monotonic_ns() -> u64 {
    let mut ts = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    // SAFETY: `ts` is a valid, initialized timespec on the stack and
    // CLOCK_MONOTONIC is always available on Linux.
    unsafe {
        libc::clock_gettime(libc::CLOCK_MONOTONIC, &mut ts);
    }
    ts.tv_sec as u64 * 1_000_000_000 + ts.tv_nsec as u64
}

/// Clock reading `CLOCK_MONOTONIC` directly.
///
/// Useful when the trace has to be lined up with other tools (perf, eBPF
/// probes) that timestamp with the same kernel clock: add
/// [`start_ns`](Self::start_ns) to a sample's timestamps to get the absolute
/// kernel value.
#[cfg(target_os = "linux")]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start_ns: u64,
}

#[cfg(target_os = "linux")]
impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start_ns: clock_monotonic_ns(),
        }
    }

    /// Absolute `CLOCK_MONOTONIC` value at construction.
    pub fn start_ns(&self) -> u64 {
        self.start_ns
    }
}

#[cfg(target_os = "linux")]
impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_os = "linux")]
impl Clock for MonotonicClock {
    #[inline]
    fn elapsed_nanos(&self) -> u64 {
        clock_monotonic_ns().saturating_sub(self.start_ns)
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying time, so a test can keep one handle and
/// give another to the profiler:
///
/// ```
/// use coarse_profiler::profiler::{ManualClock, Profiler};
///
/// let clock = ManualClock::new();
/// let mut profiler = Profiler::builder()
///     .with_initial_capacity(8)
///     .with_clock(clock.clone())
///     .build();
///
/// profiler.open("step");
/// clock.advance(1_500);
/// profiler.close();
///
/// assert_eq!(profiler.samples()[0].duration_nanos(), 1_500);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `nanos`.
    pub fn advance(&self, nanos: u64) {
        self.now.set(self.now.get() + nanos);
    }

    /// Jump to an absolute time. Must not be earlier than the current value.
    pub fn set(&self, nanos: u64) {
        debug_assert!(nanos >= self.now.get(), "ManualClock moved backwards");
        self.now.set(nanos);
    }
}

impl Clock for ManualClock {
    #[inline]
    fn elapsed_nanos(&self) -> u64 {
        self.now.get()
    }
}
