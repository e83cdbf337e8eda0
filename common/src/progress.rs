use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

/// Shared, lock free progress counter. Clones refer to the same counter, so
/// one can be handed to a worker while another is polled for display.
#[derive(Clone)]
pub struct Progress(Arc<ProgressInner>);

struct ProgressInner {
    complete: AtomicU64,
    total: AtomicU64,
}

impl Progress {
    pub fn new() -> Self {
        Self(Arc::new(ProgressInner {
            complete: AtomicU64::new(0),
            total: AtomicU64::new(0),
        }))
    }

    /// Fraction of the work done, from 0 to 1.
    pub fn progress(&self) -> f32 {
        let total = self.0.total.load(Ordering::Relaxed);
        if total == 0 {
            return 0.0;
        }

        self.0.complete.load(Ordering::Relaxed) as f32 / total as f32
    }

    pub fn complete(&self) -> bool {
        let total = self.0.total.load(Ordering::Relaxed);
        total != 0 && self.0.complete.load(Ordering::Relaxed) >= total
    }

    pub fn completed(&self) -> u64 {
        self.0.complete.load(Ordering::Relaxed)
    }

    pub fn total(&self) -> u64 {
        self.0.total.load(Ordering::Relaxed)
    }

    pub fn set_total(&self, total: u64) {
        self.0.total.store(total, Ordering::Relaxed);
    }

    pub fn add_complete(&self, count: u64) {
        self.0.complete.fetch_add(count, Ordering::Relaxed);
    }

    pub fn set_finished(&self) {
        let total = self.0.total.load(Ordering::Relaxed);
        self.0.complete.store(total, Ordering::Relaxed);
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use std::thread;

    use super::Progress;

    #[test]
    fn test_progress() {
        let progress = Progress::new();
        assert_eq!(progress.progress(), 0.0);
        assert!(!progress.complete());

        progress.set_total(4);
        let workers = (0..4)
            .map(|_| {
                let progress = progress.clone();
                thread::spawn(move || progress.add_complete(1))
            })
            .collect::<Vec<_>>();
        workers.into_iter().for_each(|x| x.join().unwrap());

        assert_eq!(progress.completed(), 4);
        assert!(progress.complete());
        assert_eq!(progress.progress(), 1.0);
    }

    #[test]
    fn test_set_finished() {
        let progress = Progress::new();
        progress.set_total(10);
        progress.add_complete(3);
        assert_eq!(progress.progress(), 0.3);

        progress.set_finished();
        assert!(progress.complete());
    }
}
