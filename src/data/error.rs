use thiserror::Error;

/// Errors raised while turning a product export into a [`Catalog`](super::Catalog).
#[derive(Error, Debug)]
pub enum CleanError {
    #[error("input is missing required column '{0}'")]
    MissingColumn(&'static str),

    /// Every cell of a non-empty numeric column failed to parse, so no mean
    /// exists to impute with.
    #[error("column '{column}' has no parseable numeric values (try --lenient-numbers)")]
    NoParseableValues { column: &'static str },
}
