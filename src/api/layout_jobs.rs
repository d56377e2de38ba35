use std::collections::VecDeque;
use std::fmt;

use tracing::debug;

use super::ChartLayout;

/// Callback run once the chart knows its content geometry.
pub type LayoutJob = Box<dyn FnOnce(ChartLayout)>;

/// Jobs posted before the surface had a size, replayed in posting order.
#[derive(Default)]
pub struct DeferredLayoutQueue {
    jobs: VecDeque<LayoutJob>,
    flushed: u64,
}

impl fmt::Debug for DeferredLayoutQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredLayoutQueue")
            .field("pending", &self.jobs.len())
            .field("flushed", &self.flushed)
            .finish()
    }
}

impl DeferredLayoutQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, job: LayoutJob) {
        self.jobs.push_back(job);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Total jobs run since creation.
    #[must_use]
    pub fn flushed_count(&self) -> u64 {
        self.flushed
    }

    /// Runs every pending job exactly once and leaves the queue empty.
    pub fn flush(&mut self, layout: ChartLayout) -> usize {
        let count = self.jobs.len();
        while let Some(job) = self.jobs.pop_front() {
            job(layout);
        }
        self.flushed += count as u64;
        if count > 0 {
            debug!(count, "flushed deferred layout jobs");
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::DeferredLayoutQueue;
    use crate::api::ChartLayout;
    use crate::core::ContentRect;

    fn layout() -> ChartLayout {
        ChartLayout {
            content: ContentRect::new(0.0, 0.0, 100.0, 50.0),
            chart_width: 100.0,
            chart_height: 60.0,
            left_label_band_px: 0.0,
            right_label_band_px: 0.0,
            x_label_band_px: 10.0,
        }
    }

    #[test]
    fn jobs_run_once_in_posting_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut queue = DeferredLayoutQueue::new();
        for id in 0..3 {
            let seen = Rc::clone(&seen);
            queue.push(Box::new(move |_| seen.borrow_mut().push(id)));
        }

        assert_eq!(queue.flush(layout()), 3);
        assert_eq!(queue.flush(layout()), 0);
        assert!(queue.is_empty());
        assert_eq!(*seen.borrow(), vec![0, 1, 2]);
        assert_eq!(queue.flushed_count(), 3);
    }
}
