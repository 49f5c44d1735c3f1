//! Heap accounting for peak-memory measurements.
use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Global allocator that forwards to [`System`] and tracks live and peak heap bytes.
///
/// Install it in a binary with `#[global_allocator]`. Counters are process-wide, so a peak read
/// while other threads allocate includes their allocations too.
pub struct PeakAlloc {
    /// Bytes currently allocated.
    current: AtomicUsize,
    /// Highest value `current` reached since the last reset.
    peak: AtomicUsize,
}

impl PeakAlloc {
    pub const fn new() -> Self {
        Self {
            current: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    #[inline]
    fn grow(&self, size: usize) {
        let now = self.current.fetch_add(size, Ordering::Relaxed) + size;
        self.peak.fetch_max(now, Ordering::Relaxed);
    }

    #[inline]
    fn shrink(&self, size: usize) {
        self.current.fetch_sub(size, Ordering::Relaxed);
    }

    pub fn current(&self) -> usize {
        self.current.load(Ordering::Relaxed)
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::Relaxed)
    }

    /// Restarts peak tracking from the current usage and returns that baseline.
    pub fn reset_peak(&self) -> usize {
        let baseline = self.current();
        self.peak.store(baseline, Ordering::Relaxed);
        baseline
    }
}

impl Default for PeakAlloc {
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl GlobalAlloc for PeakAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            self.grow(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            self.grow(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
        self.shrink(layout.size());
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            let old_size = layout.size();
            if new_size > old_size {
                self.grow(new_size - old_size);
            } else {
                self.shrink(old_size - new_size);
            }
        }
        new_ptr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_without_being_global() {
        let tracker = PeakAlloc::new();
        let layout = Layout::from_size_align(4096, 8).unwrap();

        unsafe {
            let ptr = tracker.alloc(layout);
            assert!(!ptr.is_null());
            assert_eq!(tracker.current(), 4096);

            let ptr = tracker.realloc(ptr, layout, 8192);
            assert!(!ptr.is_null());
            assert_eq!(tracker.current(), 8192);

            let grown = Layout::from_size_align(8192, 8).unwrap();
            tracker.dealloc(ptr, grown);
        }

        assert_eq!(tracker.current(), 0);
        assert_eq!(tracker.peak(), 8192);
        assert_eq!(tracker.reset_peak(), 0);
        assert_eq!(tracker.peak(), 0);
    }

    #[test]
    fn zeroed_allocations_count() {
        let tracker = PeakAlloc::default();
        let layout = Layout::from_size_align(256, 16).unwrap();

        unsafe {
            let ptr = tracker.alloc_zeroed(layout);
            assert!(!ptr.is_null());
            assert_eq!(*ptr, 0);
            assert_eq!(tracker.current(), 256);
            tracker.dealloc(ptr, layout);
        }
        assert_eq!(tracker.current(), 0);
    }
}
