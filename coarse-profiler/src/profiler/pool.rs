use crate::profiler::sample::Sample;

/// Smallest capacity a pool is created with.
pub const MIN_CAPACITY: usize = 2;

/// Capacity used when none is requested explicitly.
pub const DEFAULT_CAPACITY: usize = 1 << 20;

/// Contiguous, index-addressed storage for samples.
///
/// Every slot up to `capacity` exists from the start and is overwritten in
/// place by [`push`](Self::push). Growth copies the used slots into a buffer
/// twice as large, so an index handed out once stays valid for the pool's
/// lifetime.
#[derive(Debug)]
pub struct SamplePool<'n> {
    slots: Box<[Sample<'n>]>,
    count: usize,
}

impl<'n> SamplePool<'n> {
    /// Create a pool of `max(capacity, MIN_CAPACITY)` empty slots.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(MIN_CAPACITY);
        Self {
            slots: vec![Sample::default(); capacity].into_boxed_slice(),
            count: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots in use.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The used slots, in the order they were written.
    pub fn as_slice(&self) -> &[Sample<'n>] {
        &self.slots[..self.count]
    }

    pub fn get(&self, index: usize) -> Option<&Sample<'n>> {
        self.as_slice().get(index)
    }

    /// Write `sample` into the next free slot and return its index.
    ///
    /// # Panics
    ///
    /// If the pool is full. [`Profiler`](crate::profiler::Profiler) grows the
    /// pool before that can happen.
    #[inline]
    pub fn push(&mut self, sample: Sample<'n>) -> usize {
        let index = self.count;
        self.slots[index] = sample;
        self.count += 1;
        index
    }

    /// Mutable access to a used slot.
    ///
    /// # Panics
    ///
    /// If `index` is not a used slot.
    #[inline]
    pub fn slot_mut(&mut self, index: usize) -> &mut Sample<'n> {
        &mut self.slots[..self.count][index]
    }

    /// True when fewer than two slots are free: one for the next open, one
    /// for the growth record itself.
    #[inline]
    pub fn needs_growth(&self) -> bool {
        self.count + 1 >= self.capacity()
    }

    /// Double the capacity, keeping every used slot at its index.
    pub fn grow(&mut self) {
        let new_capacity = self.capacity() * 2;
        let mut slots = Vec::with_capacity(new_capacity);
        slots.extend_from_slice(&self.slots);
        slots.resize(new_capacity, Sample::default());
        self.slots = slots.into_boxed_slice();
    }
}
