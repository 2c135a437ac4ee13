//! The single entry point over both algorithms.
//!
//! The original C library dispatched through a function-pointer table chosen
//! at `allocator_create` time. A closed, two-variant choice like that is
//! exactly what a Rust `enum` is for, so here the table is replaced by
//! [`AlgorithmState`] matched once per call; the compiler checks every
//! variant is handled instead of a missing table entry segfaulting at
//! runtime.

use crate::buddy;
use crate::diagnostics::FreeOutcome;
use crate::segregated;
use crate::stats::Stats;
use core::fmt;
use core::ptr::NonNull;

use alloc::boxed::Box;

/// Which algorithm a [`Facade`] dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmKind {
    /// Eight fixed size classes plus an unsegregated large-block list, no
    /// coalescing. See [`crate::segregated`].
    Segregated,
    /// Power-of-two blocks split and merged via buddy arithmetic. See
    /// [`crate::buddy`].
    Buddy,
}

/// Why [`Facade::create`] failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateError {
    /// The supplied region, after alignment, doesn't even hold the
    /// algorithm's bookkeeping for one block.
    RegionTooSmall,
}

impl fmt::Display for CreateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreateError::RegionTooSmall => {
                write!(f, "region too small to host the chosen algorithm's minimum block")
            }
        }
    }
}

enum AlgorithmState {
    Segregated(segregated::State),
    Buddy(buddy::State),
}

/// A heap allocator over a byte span it does not own.
///
/// `Facade` never reaches for the host allocator (outside of the optional
/// [`create_with_malloc`](Facade::create_with_malloc) convenience
/// constructor): every byte it hands out comes from the `region` it was
/// built over. It is intentionally `!Sync` — [`AlgorithmState`] holds raw
/// pointers into that region, so the type system refuses to let two threads
/// reach it at once instead of paying for a lock nothing in this crate's
/// scope needs. See the crate's concurrency notes for why that's a
/// deliberate, not missing, piece of the design.
pub struct Facade<'a> {
    state: AlgorithmState,
    stats: Stats,
    kind: AlgorithmKind,
    _region: core::marker::PhantomData<&'a mut [u8]>,
    owned: Option<Box<[u8]>>,
}

impl<'a> Facade<'a> {
    /// Build a facade over a caller-supplied region using `kind`.
    ///
    /// The region is consumed for the facade's lifetime: nothing else may
    /// read or write it while the facade is alive, which the `&'a mut [u8]`
    /// borrow enforces at compile time.
    pub fn create(region: &'a mut [u8], kind: AlgorithmKind) -> Result<Self, CreateError> {
        let state = match kind {
            AlgorithmKind::Segregated => {
                segregated::State::init(region).map(AlgorithmState::Segregated)
            }
            AlgorithmKind::Buddy => buddy::State::init(region).map(AlgorithmState::Buddy),
        }
        .ok_or(CreateError::RegionTooSmall)?;

        let heap_size = match &state {
            AlgorithmState::Segregated(s) => s.heap_size(),
            AlgorithmState::Buddy(s) => s.heap_size(),
        };

        Ok(Self {
            state,
            stats: Stats::new(heap_size),
            kind,
            _region: core::marker::PhantomData,
            owned: None,
        })
    }

    /// Which algorithm this facade is dispatching to.
    pub fn kind(&self) -> AlgorithmKind {
        self.kind
    }

    /// Size of the region actually usable by the algorithm, after any
    /// alignment trimming `create` performed.
    pub fn heap_size(&self) -> usize {
        self.stats.heap_size
    }

    /// Allocate `size` payload bytes, or `None` if the request can't be
    /// satisfied (including `size == 0`, which is always refused).
    pub fn alloc(&mut self, size: usize) -> Option<NonNull<u8>> {
        match &mut self.state {
            AlgorithmState::Segregated(s) => s.alloc(size, &mut self.stats),
            AlgorithmState::Buddy(s) => s.alloc(size, &mut self.stats),
        }
    }

    /// Return `ptr` to the allocator.
    ///
    /// A pointer the facade doesn't recognize (foreign, already freed, or
    /// corrupted) is a silent no-op other than an opportunistic
    /// `log::warn!`; this method never panics or aborts on a bad pointer,
    /// matching the "best-effort diagnostics, not a guarantee" stance in the
    /// crate's error-handling notes.
    ///
    /// # Safety
    /// `ptr` must have been returned by a prior call to
    /// [`alloc`](Self::alloc) or [`realloc`](Self::realloc) on this same
    /// facade and not already passed to `free`. Passing any other pointer
    /// is undefined behavior: this function dereferences memory immediately
    /// before `ptr` before it can tell whether `ptr` is one of its own.
    pub unsafe fn free(&mut self, ptr: NonNull<u8>) {
        let outcome = match &mut self.state {
            AlgorithmState::Segregated(s) => s.free(ptr, &mut self.stats),
            AlgorithmState::Buddy(s) => s.free(ptr, &mut self.stats),
        };
        match outcome {
            FreeOutcome::Freed => {}
            FreeOutcome::BadMagic => {
                log::warn!("free: pointer not recognized (bad or missing header magic)");
            }
            FreeOutcome::BadOrder => {
                log::warn!("free: block header recorded an out-of-range order");
            }
            FreeOutcome::OutOfRange => {
                log::warn!("free: recovered block address falls outside the managed heap");
            }
        }
    }

    /// Resize the allocation at `ptr` to `new_size` bytes.
    ///
    /// This allocator does not preserve contents across a resize: the
    /// returned block's payload is uninitialized, not copied from the old
    /// block. Callers that need content-preserving resize must copy the
    /// bytes themselves from the old allocation before calling this (while
    /// it's still valid) or avoid resizing live data altogether. This is a
    /// deliberate scope cut, not a bug — see the crate's non-goals.
    ///
    /// # Safety
    /// Same contract as [`free`](Self::free): `ptr` must be a live
    /// allocation from this facade.
    pub unsafe fn realloc_discarding_contents(
        &mut self,
        ptr: NonNull<u8>,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        // Allocate the replacement before freeing `ptr`: if the new
        // allocation fails, `ptr` must still be valid rather than leaked
        // into a free list with no live reference left to it.
        let new_block = self.alloc(new_size)?;
        self.free(ptr);
        Some(new_block)
    }

    /// Alias for [`realloc_discarding_contents`](Self::realloc_discarding_contents).
    ///
    /// # Safety
    /// See [`realloc_discarding_contents`](Self::realloc_discarding_contents).
    pub unsafe fn realloc(&mut self, ptr: NonNull<u8>, new_size: usize) -> Option<NonNull<u8>> {
        self.realloc_discarding_contents(ptr, new_size)
    }

    /// Current allocation counters.
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Zero every counter except `heap_size`. Does not affect outstanding
    /// allocations or free-list state.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }
}

impl Drop for Facade<'_> {
    fn drop(&mut self) {
        match &mut self.state {
            AlgorithmState::Segregated(s) => s.teardown(),
            AlgorithmState::Buddy(s) => s.teardown(),
        }
    }
}

impl Facade<'static> {
    /// Convenience constructor that borrows its backing region from the
    /// host heap instead of a span supplied by the caller.
    ///
    /// `#![no_std]` still permits a host allocator via `extern crate alloc`;
    /// this is the one place in the library that reaches for it, mirroring
    /// the original C harness's `malloc`-backed heap setup so callers that
    /// don't already own a byte span (the CLI benchmark binary, quick
    /// experiments) don't have to carve one out by hand.
    pub fn create_with_malloc(size: usize, kind: AlgorithmKind) -> Result<Self, CreateError> {
        // `+ 16` margin mirrors the original harness's `malloc(memory_size +
        // ALLOCATOR_ALIGN)`: a boxed slice's base isn't guaranteed to already
        // be 16-byte aligned, so without the margin `create`'s internal
        // `align_up` could eat into the `size` bytes the caller asked for,
        // or even fail construction where the spec guarantees it succeeds.
        let mut owned: Box<[u8]> = alloc::vec![0u8; size + 16].into_boxed_slice();
        // SAFETY: `owned` outlives the `'static` slice below because it is
        // moved into `self.owned` before `create` is called, and is never
        // touched again except through the facade's own algorithm state,
        // which holds raw pointers rather than a persisted reference. The
        // slice is only used to satisfy `create`'s signature; no live `&mut
        // [u8]` with a `'static` lifetime escapes this function except as
        // the raw pointers `create` derives from it.
        let region: &'static mut [u8] =
            unsafe { core::slice::from_raw_parts_mut(owned.as_mut_ptr(), owned.len()) };
        let mut facade = Self::create(region, kind)?;
        facade.owned = Some(owned);
        Ok(facade)
    }
}
