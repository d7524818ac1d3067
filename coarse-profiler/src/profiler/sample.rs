use crate::profiler::clock::{NANOS_PER_MICRO, NANOS_PER_MILLI};

/// Sentinel parent index for a root sample, and cursor value when nothing is open.
pub const NO_PARENT: usize = usize::MAX;

/// `end_nanos` of a sample that has not been closed yet.
///
/// Exporting an open sample uses this value as its end, so its duration comes
/// out negative.
pub const UNSET_END_NANOS: u64 = 0;

/// Name of the synthetic sample recorded each time the pool doubles.
pub const REALLOCATE_SAMPLE_POOL: &str = "coarse_profiler::Profiler::reallocate_sample_pool";

/// One recorded interval.
///
/// The name is borrowed from the caller for `'n`; the pool never copies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample<'n> {
    /// Index of the enclosing sample, or [`NO_PARENT`].
    pub parent: usize,
    pub begin_nanos: u64,
    /// [`UNSET_END_NANOS`] until closed.
    pub end_nanos: u64,
    pub name: &'n str,
}

impl Default for Sample<'_> {
    fn default() -> Self {
        Self {
            parent: NO_PARENT,
            begin_nanos: 0,
            end_nanos: UNSET_END_NANOS,
            name: "",
        }
    }
}

impl<'n> Sample<'n> {
    /// Parent index, `None` for a root sample.
    pub fn parent(&self) -> Option<usize> {
        (self.parent != NO_PARENT).then_some(self.parent)
    }

    pub fn is_root(&self) -> bool {
        self.parent == NO_PARENT
    }

    pub fn is_growth_event(&self) -> bool {
        self.name == REALLOCATE_SAMPLE_POOL
    }

    /// `end - begin` as a signed value. Negative for a sample that is still open.
    pub fn duration_nanos(&self) -> i64 {
        self.end_nanos as i64 - self.begin_nanos as i64
    }

    pub fn begin_micros(&self) -> f64 {
        self.begin_nanos as f64 / NANOS_PER_MICRO
    }

    pub fn duration_micros(&self) -> f64 {
        (self.end_nanos as f64 - self.begin_nanos as f64) / NANOS_PER_MICRO
    }

    pub fn duration_millis(&self) -> f64 {
        (self.end_nanos as f64 - self.begin_nanos as f64) / NANOS_PER_MILLI
    }
}
