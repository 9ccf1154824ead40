use thiserror::Error;

/// Failures on the prediction path. These are terminal for the single request,
/// never for the process; the CLI maps `UnknownTeam` to its own exit code.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("team not found in the stats table: {0}")]
    UnknownTeam(String),
}
