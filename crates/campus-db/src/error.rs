use thiserror::Error;

/// Raised while composing a read from query-string input.
///
/// Every variant is caused by the client, so the HTTP layer answers `400`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Unknown field '{column}' on '{alias}'")]
    UnknownColumn { alias: String, column: String },

    #[error("Unknown table alias '{0}'")]
    UnknownAlias(String),
}
