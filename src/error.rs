use thiserror::Error;

/// Failures surfaced by [`crate::registry::EntryRegistry`] and the selection
/// helpers. None of these are fatal; the caller shows a message and the entry
/// set is left exactly as it was before the call.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("at least {min} entries are required, found {found}")]
    TooFewEntries { min: usize, found: usize },
    #[error("at most {max} entries are allowed, found {found}")]
    TooManyEntries { max: usize, found: usize },
    #[error("ratios must add up to {expected}%, currently {total}%")]
    RatioNotFull { expected: u32, total: u32 },
    #[error("entries must be confirmed before spinning")]
    NotConfirmed,
    #[error("entries are confirmed; cancel confirmation to edit them")]
    Locked,
    #[error("entry text is empty")]
    EmptyInput,
    #[error("cannot add more than {max} entries")]
    AtCapacity { max: usize },
    #[error("no entry at index {index} (have {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("no selectable entries")]
    EmptySelection,
}
