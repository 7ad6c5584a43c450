use crate::journal::Journal;

/// Load/save boundary for a [`Journal`].
///
/// Callers load, mutate the journal in memory, then save; implementations
/// replace the stored journal wholesale.
pub trait JournalRepository {
    type Error;

    fn load_journal(&self) -> Result<Journal, Self::Error>;

    fn save_journal(&self, journal: &Journal) -> Result<(), Self::Error>;
}
