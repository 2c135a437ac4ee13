//! Internal diagnostics surfaced from invalid-free handling.

/// Outcome of an internal free attempt.
///
/// The public [`Facade::free`](crate::Facade::free) never returns this: an
/// invalid free is always a silent no-op to the caller, reported (if at
/// all) through a `log::warn!` line. `FreeOutcome` exists so that tests can
/// assert on *which* invalid-free condition fired without scraping log
/// output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreeOutcome {
    /// The pointer was recognized and its block returned to a free list.
    Freed,
    /// The block header's magic value did not match; the pointer is either
    /// foreign to this allocator or the block has already been freed and
    /// overwritten.
    BadMagic,
    /// The block header recorded an order outside `[min_order, max_order]`
    /// (buddy allocator only).
    BadOrder,
    /// The recovered block address lies outside the managed heap (buddy
    /// allocator only; the segregated allocator has no equivalent check).
    OutOfRange,
}
