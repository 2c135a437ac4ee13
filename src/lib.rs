//! Two in-place heap allocators behind one dispatch facade
//!
//! This crate hands out memory from a byte span you already own — a
//! `static` array, a buffer borrowed from the host heap, a region backed by
//! a memory-mapped file, anything that can be expressed as `&mut [u8]` —
//! instead of going back to the host allocator for every request. That
//! makes it a fit for `#![no_std]` targets (it is one itself) and for
//! scenarios where you want a hard upper bound on how much memory a subsystem
//! can claim.
//!
//! Two independent algorithms are provided behind the same [`Facade`] type:
//!
//! - [`AlgorithmKind::Segregated`]: eight fixed size classes handled by their
//!   own free lists, with a catch-all list for anything bigger. Cheap and
//!   predictable; never merges adjacent free blocks back together, so
//!   workloads that allocate many different sizes can fragment.
//! - [`AlgorithmKind::Buddy`]: classic power-of-two block splitting with
//!   buddy-address coalescing on free. Rounds every request up to the next
//!   power of two (worse worst-case overhead than the segregated allocator)
//!   but reliably recombines freed memory.
//!
//! Which one to reach for depends on the allocation pattern: segregated
//! favors workloads dominated by a handful of common sizes, buddy favors
//! workloads with widely varying sizes and a need to avoid fragmentation
//! over long lifetimes. See each module's documentation for the details of
//! its layout and failure modes.
//!
//! # Usage
//! ```
//! use inplace_heap::{AlgorithmKind, Facade};
//!
//! let mut heap = [0u8; 4096];
//! let mut facade = Facade::create(&mut heap, AlgorithmKind::Buddy).unwrap();
//!
//! let block = facade.alloc(128).expect("allocation should succeed");
//! unsafe { facade.free(block) };
//!
//! assert_eq!(facade.stats().total_frees, 1);
//! ```
//!
//! # Non-goals
//! Neither algorithm is thread-safe, and `Facade` is deliberately `!Sync` —
//! concurrent access from multiple threads without external synchronization
//! is undefined behavior, not a bug to be fixed here. `realloc` never
//! preserves the old allocation's contents (see
//! [`Facade::realloc_discarding_contents`]); memory is never returned to the
//! host OS; and corruption detection is opportunistic (a magic-number check)
//! rather than exhaustive. These are documented scope cuts, not
//! work-in-progress gaps.
#![no_std]

extern crate alloc;

mod align;
mod buddy;
mod diagnostics;
mod facade;
mod segregated;
mod stats;

pub use diagnostics::FreeOutcome;
pub use facade::{AlgorithmKind, CreateError, Facade};
pub use stats::Stats;
