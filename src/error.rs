use thiserror::Error;

/// Everything that can stop a session. Bad answers at a prompt are not
/// errors; they come back as `Decision::Invalid` / `Replay::Invalid`.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("tried to deal from an empty deck")]
    EmptyDeck,

    #[error("invalid card spec: {0}")]
    InvalidCardSpec(String),

    #[error("input closed before the session finished")]
    InputClosed,

    #[error("console i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid rules: {0}")]
    Config(String),

    #[error("could not parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
