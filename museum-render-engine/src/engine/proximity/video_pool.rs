use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counting pool bounding the number of simultaneously bound videos.
///
/// A successful `try_acquire` hands out a `VideoPermit`; the slot is returned
/// exactly once when the permit is released or dropped, so a teardown path
/// can never double-decrement or leak the count.
#[derive(Debug, Clone)]
pub struct VideoPool {
    capacity: usize,
    active: Arc<AtomicUsize>,
}

/// Proof of one occupied video slot. Not cloneable.
#[derive(Debug)]
pub struct VideoPermit {
    active: Arc<AtomicUsize>,
}

impl VideoPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            active: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Take a slot if one is free.
    pub fn try_acquire(&self) -> Option<VideoPermit> {
        self.active
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |active| {
                (active < self.capacity).then_some(active + 1)
            })
            .ok()
            .map(|_| VideoPermit {
                active: Arc::clone(&self.active),
            })
    }

    /// Return a slot. Equivalent to dropping the permit.
    pub fn release(&self, permit: VideoPermit) {
        drop(permit);
    }

    pub fn active(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Drop for VideoPermit {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_stops_at_capacity() {
        let pool = VideoPool::new(2);
        let first = pool.try_acquire();
        let second = pool.try_acquire();
        assert!(first.is_some() && second.is_some());
        assert!(pool.try_acquire().is_none());
        assert_eq!(pool.active(), 2);
    }

    #[test]
    fn release_frees_exactly_one_slot() {
        let pool = VideoPool::new(1);
        let permit = pool.try_acquire().unwrap();
        assert!(pool.try_acquire().is_none());

        pool.release(permit);
        assert_eq!(pool.active(), 0);

        let again = pool.try_acquire();
        assert!(again.is_some());
        assert_eq!(pool.active(), 1);
    }

    #[test]
    fn dropped_permit_returns_its_slot() {
        let pool = VideoPool::new(3);
        {
            let _a = pool.try_acquire().unwrap();
            let _b = pool.try_acquire().unwrap();
            assert_eq!(pool.active(), 2);
        }
        assert_eq!(pool.active(), 0);
    }

    #[test]
    fn zero_capacity_never_grants() {
        let pool = VideoPool::new(0);
        assert!(pool.try_acquire().is_none());
        assert_eq!(pool.active(), 0);
    }
}
