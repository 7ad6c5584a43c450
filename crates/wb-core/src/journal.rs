use crate::emotion::EmotionJournal;
use crate::tracker::CycleTracker;

/// Everything a person logs: cycle state, day logs and the emotion journal.
///
/// Owned by the caller and handed to a
/// [`JournalRepository`](crate::repository::JournalRepository) to persist;
/// the response engine and predictor never see it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Journal {
    pub tracker: CycleTracker,
    pub emotions: EmotionJournal,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tracker.history().is_empty()
            && self.tracker.start().is_none()
            && self.tracker.logs().is_empty()
            && self.emotions.is_empty()
    }
}
