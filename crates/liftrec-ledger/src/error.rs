use liftrec_source::SourceError;

/// Errors produced by ledger operations.
///
/// Data-quality findings are never errors; they are reported through
/// [`ValidationReport`](crate::ValidationReport).
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Convenience alias used throughout the ledger crate.
pub type Result<T> = std::result::Result<T, LedgerError>;
