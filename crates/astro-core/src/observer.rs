//! Progress callbacks for batch ingest.
//!
//! Batch operations report each item to an injected observer and return
//! their counters as a report value. The CLI drives a progress bar from
//! these callbacks; library callers can pass [`Silent`].

use crate::enums::ItemStatus;

pub trait IngestObserver {
    /// Called once before the first item.
    fn started(&self, _total: usize) {}

    /// Called after each item, with its position in the batch.
    fn item(&self, _index: usize, _label: &str, _status: ItemStatus) {}

    /// Called once after the last item.
    fn finished(&self) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl IngestObserver for Silent {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<(usize, String, ItemStatus)>>);

    impl IngestObserver for Recorder {
        fn item(&self, index: usize, label: &str, status: ItemStatus) {
            self.0.borrow_mut().push((index, label.to_string(), status));
        }
    }

    #[test]
    fn default_methods_are_optional() {
        let recorder = Recorder::default();
        recorder.started(1);
        recorder.item(0, "TWA 27", ItemStatus::Added);
        recorder.finished();
        assert_eq!(
            recorder.0.into_inner(),
            vec![(0, "TWA 27".to_string(), ItemStatus::Added)]
        );
        Silent.item(0, "ignored", ItemStatus::Skipped);
    }
}
