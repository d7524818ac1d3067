use super::Profiler;
use crate::profiler::clock::Clock;
use std::ops::Deref;

/// RAII guard returned by [`Profiler::scoped`].
///
/// Opens its sample on creation and closes it exactly once when dropped,
/// including when the scope is left by `?`, an early `return`, or a panic.
///
/// The guard only derefs to `&Profiler`. Nested samples are opened with
/// [`ScopedSample::scoped`]; raw `open`/`close` through the guard would
/// unbalance the stack it closes on drop, so they are not reachable:
///
/// ```compile_fail
/// use coarse_profiler::profiler::Profiler;
///
/// let mut profiler = Profiler::new(8);
/// let mut guard = profiler.scoped("outer");
/// guard.close();
/// ```
///
/// ```compile_fail
/// use coarse_profiler::profiler::Profiler;
///
/// let mut profiler = Profiler::new(8);
/// let mut guard = profiler.scoped("outer");
/// guard.open("leaked");
/// ```
#[must_use = "the sample closes as soon as the guard is dropped"]
pub struct ScopedSample<'p, 'n, C: Clock> {
    profiler: &'p mut Profiler<'n, C>,
}

impl<'p, 'n, C: Clock> ScopedSample<'p, 'n, C> {
    pub(super) fn new(profiler: &'p mut Profiler<'n, C>, name: &'n str) -> Self {
        profiler.open(name);
        Self { profiler }
    }

    /// Open `name` nested under this guard's sample.
    pub fn scoped(&mut self, name: &'n str) -> ScopedSample<'_, 'n, C> {
        ScopedSample::new(self.profiler, name)
    }
}

impl<'n, C: Clock> Deref for ScopedSample<'_, 'n, C> {
    type Target = Profiler<'n, C>;

    fn deref(&self) -> &Self::Target {
        self.profiler
    }
}

impl<C: Clock> Drop for ScopedSample<'_, '_, C> {
    fn drop(&mut self) {
        self.profiler.close();
    }
}
