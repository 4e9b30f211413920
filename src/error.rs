use thiserror::Error;

/// Failure categories for a scout run.
///
/// Everything except `Interaction` aborts the run; `Interaction` is handled
/// at the per-listing boundary.
#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("seen-store error: {0}")]
    Storage(String),

    #[error("browser session error: {0}")]
    Session(String),

    #[error("listing search error: {0}")]
    Search(String),

    #[error("page interaction error: {0}")]
    Interaction(String),
}
