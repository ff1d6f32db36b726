use thiserror::Error;

/// Failure raised by a conversion or scaling stage.
///
/// Both kinds are fatal: a stage either yields a fully valid value or one of
/// these, never a partially populated adversary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    /// A numeric input lies outside its domain (negative CR, tier 7, d7...).
    #[error("domain error: {0}")]
    Domain(String),
    /// The source monster breaks the input contract the pipeline relies on.
    #[error("precondition failed: {0}")]
    Precondition(String),
}

impl ConvertError {
    pub fn domain(msg: impl Into<String>) -> Self {
        Self::Domain(msg.into())
    }

    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }
}

pub type ConvertResult<T> = Result<T, ConvertError>;
