mod scoped;

pub use scoped::ScopedSample;

use crate::profiler::clock::{Clock, InstantClock};
use crate::profiler::error::ProfilerError;
use crate::profiler::format;
use crate::profiler::pool::{DEFAULT_CAPACITY, SamplePool};
use crate::profiler::sample::{NO_PARENT, REALLOCATE_SAMPLE_POOL, Sample, UNSET_END_NANOS};

/// Records named, nested intervals into a growable sample pool.
///
/// Nesting is tracked with a single cursor (the innermost open sample) and a
/// parent index stored on each sample, so the whole call tree lives in one
/// flat, exportable array.
///
/// `open`/`close` must be called in strict LIFO order. A profiler records one
/// logical call stack; use one instance per thread.
///
/// ```
/// use coarse_profiler::profiler::{Profiler, to_chrome_tracing_events};
///
/// let mut profiler = Profiler::new(64);
/// profiler.open("frame");
/// profiler.open("update");
/// profiler.close();
/// profiler.close();
///
/// let events = to_chrome_tracing_events(&profiler);
/// assert_eq!(events.len(), 2);
/// ```
#[derive(Debug)]
pub struct Profiler<'n, C = InstantClock> {
    pool: SamplePool<'n>,
    current: usize,
    clock: C,
    growths: usize,
}

impl<'n> Profiler<'n, InstantClock> {
    /// Create a profiler with room for `initial_capacity` samples (at least 2).
    /// The clock starts now.
    pub fn new(initial_capacity: usize) -> Self {
        Self::with_clock(initial_capacity, InstantClock::new())
    }

    pub fn builder() -> ProfilerBuilder<InstantClock> {
        ProfilerBuilder {
            initial_capacity: DEFAULT_CAPACITY,
            clock: None,
        }
    }
}

impl<'n, C: Clock> Profiler<'n, C> {
    pub fn with_clock(initial_capacity: usize, clock: C) -> Self {
        Self {
            pool: SamplePool::new(initial_capacity),
            current: NO_PARENT,
            clock,
            growths: 0,
        }
    }

    /// Begin a sample named `name`, nested under the currently open sample.
    ///
    /// `name` is borrowed, not copied, for as long as the profiler lives.
    /// May double the pool afterwards; that work is recorded as its own
    /// [`REALLOCATE_SAMPLE_POOL`] sample under the one just opened.
    #[inline]
    pub fn open(&mut self, name: &'n str) {
        let index = self.pool.push(Sample {
            parent: self.current,
            begin_nanos: self.clock.elapsed_nanos(),
            end_nanos: UNSET_END_NANOS,
            name,
        });
        self.current = index;

        if self.pool.needs_growth() {
            self.grow_pool();
        }
    }

    /// End the innermost open sample.
    ///
    /// # Panics
    ///
    /// If no sample is open. Use [`try_close`](Self::try_close) to get an
    /// error instead.
    #[inline]
    pub fn close(&mut self) {
        let end_nanos = self.clock.elapsed_nanos();
        let sample = self.pool.slot_mut(self.current);
        sample.end_nanos = end_nanos;
        self.current = sample.parent;
    }

    /// Like [`close`](Self::close), but reports a missing open sample.
    pub fn try_close(&mut self) -> Result<(), ProfilerError> {
        if self.current == NO_PARENT {
            return Err(ProfilerError::NoOpenSample);
        }
        self.close();
        Ok(())
    }

    /// Open `name` now and close it when the returned guard is dropped.
    ///
    /// The guard dereferences to the profiler, so nested scopes are opened
    /// through it:
    ///
    /// ```
    /// use coarse_profiler::profiler::Profiler;
    ///
    /// let mut profiler = Profiler::new(16);
    /// {
    ///     let mut outer = profiler.scoped("outer");
    ///     let _inner = outer.scoped("inner");
    /// }
    /// assert!(profiler.is_balanced());
    /// assert_eq!(profiler.samples()[1].parent(), Some(0));
    /// ```
    pub fn scoped(&mut self, name: &'n str) -> ScopedSample<'_, 'n, C> {
        ScopedSample::new(self, name)
    }

    #[cold]
    fn grow_pool(&mut self) {
        let growth_begin = self.clock.elapsed_nanos();
        self.pool.grow();
        let growth_end = self.clock.elapsed_nanos();

        self.pool.push(Sample {
            parent: self.current,
            begin_nanos: growth_begin,
            end_nanos: growth_end,
            name: REALLOCATE_SAMPLE_POOL,
        });
        self.growths += 1;

        tracing::debug!(
            capacity = self.pool.capacity(),
            samples = self.pool.len(),
            growth_nanos = growth_end.saturating_sub(growth_begin),
            "sample pool doubled; raise the initial capacity to avoid this"
        );
    }

    /// Recorded samples in open order, including growth records.
    pub fn samples(&self) -> &[Sample<'n>] {
        self.pool.as_slice()
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// How many times the pool has doubled.
    pub fn growth_count(&self) -> usize {
        self.growths
    }

    /// Index of the innermost open sample.
    pub fn current(&self) -> Option<usize> {
        (self.current != NO_PARENT).then_some(self.current)
    }

    /// Indices of the open samples, innermost first.
    pub fn open_samples(&self) -> impl Iterator<Item = usize> + '_ {
        let samples = self.pool.as_slice();
        std::iter::successors(self.current(), move |&index| samples[index].parent())
    }

    /// Number of samples currently open.
    pub fn depth(&self) -> usize {
        self.open_samples().count()
    }

    /// True when every opened sample has been closed.
    pub fn is_balanced(&self) -> bool {
        self.current == NO_PARENT
    }

    /// Current reading of this profiler's clock.
    pub fn elapsed_nanos(&self) -> u64 {
        self.clock.elapsed_nanos()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Export every sample, refusing if any is still open.
    pub fn try_to_chrome_tracing_events(&self) -> Result<Vec<String>, ProfilerError> {
        if !self.is_balanced() {
            return Err(ProfilerError::OpenSamples { open: self.depth() });
        }
        Ok(format::to_chrome_tracing_events(self))
    }
}

/// Configures a [`Profiler`] before its clock starts.
#[derive(Debug, Clone)]
pub struct ProfilerBuilder<C = InstantClock> {
    initial_capacity: usize,
    clock: Option<C>,
}

impl<C> ProfilerBuilder<C> {
    /// Number of samples to preallocate (clamped to at least 2). A capacity
    /// of at least two more than the number of opens in a run keeps growth
    /// records out of the trace.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_clock<C2: Clock>(self, clock: C2) -> ProfilerBuilder<C2> {
        ProfilerBuilder {
            initial_capacity: self.initial_capacity,
            clock: Some(clock),
        }
    }

    /// Build the profiler. Without an explicit clock, a fresh default clock
    /// is created here, so timestamps are relative to this call.
    pub fn build<'n>(self) -> Profiler<'n, C>
    where
        C: Clock + Default,
    {
        let clock = self.clock.unwrap_or_default();
        Profiler::with_clock(self.initial_capacity, clock)
    }
}
