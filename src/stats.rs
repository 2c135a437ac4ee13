//! Allocation statistics maintained by the facade on every alloc/free.

/// A snapshot of one [`Facade`](crate::Facade)'s allocation counters.
///
/// `current_requested <= current_allocated <= heap_size` holds at every
/// point in time; the `peak_*` fields are monotonically non-decreasing for
/// the lifetime of the facade (or since the last [`reset`](Stats::reset)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    /// Monotonic count of successful allocations.
    pub total_allocations: usize,
    /// Monotonic count of frees (valid or opportunistically detected as
    /// invalid — see [`FreeOutcome`](crate::FreeOutcome) for the latter).
    pub total_frees: usize,
    /// Bytes currently committed from the managed region, including
    /// per-block header overhead and size-class/order rounding.
    pub current_allocated: usize,
    /// High-water mark of `current_allocated`.
    pub peak_allocated: usize,
    /// Bytes of user-visible payload currently outstanding.
    pub current_requested: usize,
    /// High-water mark of `current_requested`.
    pub peak_requested: usize,
    /// Monotonic count of allocation requests that returned `None`.
    pub failed_allocations: usize,
    /// Size of the implementation region visible to the algorithm. Fixed at
    /// construction; preserved across [`reset`](Stats::reset).
    pub heap_size: usize,
}

impl Stats {
    pub(crate) const fn new(heap_size: usize) -> Self {
        Self {
            total_allocations: 0,
            total_frees: 0,
            current_allocated: 0,
            peak_allocated: 0,
            current_requested: 0,
            peak_requested: 0,
            failed_allocations: 0,
            heap_size,
        }
    }

    pub(crate) fn record_alloc(&mut self, committed: usize, requested: usize) {
        self.total_allocations += 1;
        self.current_allocated += committed;
        self.peak_allocated = self.peak_allocated.max(self.current_allocated);
        self.current_requested += requested;
        self.peak_requested = self.peak_requested.max(self.current_requested);
    }

    pub(crate) fn record_free(&mut self, committed: usize, requested: usize) {
        self.total_frees += 1;
        self.current_allocated -= committed;
        self.current_requested -= requested;
    }

    pub(crate) fn record_failure(&mut self) {
        self.failed_allocations += 1;
    }

    /// Zero every counter except `heap_size`, which is preserved.
    pub(crate) fn reset(&mut self) {
        *self = Self::new(self.heap_size);
    }

    /// `peak_requested / heap_size`, or `0.0` if `heap_size` is zero.
    ///
    /// This is the `PeakUtilization` column the benchmark harness emits.
    pub fn peak_utilization(&self) -> f64 {
        if self.heap_size == 0 {
            0.0
        } else {
            self.peak_requested as f64 / self.heap_size as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_preserves_heap_size_only() {
        let mut stats = Stats::new(4096);
        stats.record_alloc(64, 50);
        stats.record_failure();
        stats.reset();
        assert_eq!(stats, Stats::new(4096));
    }

    #[test]
    fn peaks_track_the_high_water_mark() {
        let mut stats = Stats::new(1024);
        stats.record_alloc(64, 50);
        stats.record_alloc(128, 100);
        stats.record_free(64, 50);
        assert_eq!(stats.current_allocated, 128);
        assert_eq!(stats.peak_allocated, 192);
        assert_eq!(stats.current_requested, 100);
        assert_eq!(stats.peak_requested, 150);
    }

    #[test]
    fn peak_utilization_of_empty_heap_is_zero() {
        assert_eq!(Stats::new(0).peak_utilization(), 0.0);
    }
}
