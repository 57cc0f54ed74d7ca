//! Allocation tracking for memory accounting in tests.
//!
//! A wrapper around the system allocator that counts allocations,
//! deallocations and live bytes. Test binaries opt in with:
//!
//! ```ignore
//! use trefoil::alloc::TrackingAllocator;
//!
//! #[global_allocator]
//! static ALLOC: TrackingAllocator = TrackingAllocator;
//! ```
//!
//! The counters are process-global, so concurrent tests in one binary see
//! each other's traffic; assertions should compare deltas loosely (at
//! least N deallocations) rather than demanding exact balances.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicIsize, AtomicUsize, Ordering};

/// Total number of allocations since the last reset.
pub static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

/// Total number of deallocations since the last reset.
pub static DEALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

/// Bytes currently allocated (allocations minus deallocations).
pub static BYTES_ALLOCATED: AtomicIsize = AtomicIsize::new(0);

/// A counting allocator delegating the real work to [`System`].
pub struct TrackingAllocator;

unsafe impl GlobalAlloc for TrackingAllocator {
	unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
		ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
		BYTES_ALLOCATED.fetch_add(layout.size() as isize, Ordering::Relaxed);
		System.alloc(layout)
	}

	unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
		DEALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
		BYTES_ALLOCATED.fetch_sub(layout.size() as isize, Ordering::Relaxed);
		System.dealloc(ptr, layout)
	}

	unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
		ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
		BYTES_ALLOCATED.fetch_add(layout.size() as isize, Ordering::Relaxed);
		System.alloc_zeroed(layout)
	}

	unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
		BYTES_ALLOCATED.fetch_add(new_size as isize - layout.size() as isize, Ordering::Relaxed);
		System.realloc(ptr, layout, new_size)
	}
}

/// A snapshot of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationStats {
	pub allocations: usize,
	pub deallocations: usize,
	pub bytes_allocated: isize,
}

/// Resets every counter to zero.
pub fn reset_counters() {
	ALLOC_COUNT.store(0, Ordering::SeqCst);
	DEALLOC_COUNT.store(0, Ordering::SeqCst);
	BYTES_ALLOCATED.store(0, Ordering::SeqCst);
}

/// Returns the current counter values.
pub fn stats() -> AllocationStats {
	AllocationStats {
		allocations: ALLOC_COUNT.load(Ordering::SeqCst),
		deallocations: DEALLOC_COUNT.load(Ordering::SeqCst),
		bytes_allocated: BYTES_ALLOCATED.load(Ordering::SeqCst),
	}
}
