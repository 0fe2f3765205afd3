use thiserror::Error;

use pageflow_core::Millis;

#[derive(Error, Debug)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] pageflow_core::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scenario parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Unknown element key: {0}")]
    UnknownKey(String),

    #[error("Duplicate element key: {0}")]
    DuplicateKey(String),

    #[error("Clock cannot go back (now={now}, target={target})")]
    ClockWentBack { now: Millis, target: Millis },

    #[error("Page did not settle within {0} steps")]
    StepLimit(usize),
}

pub type Result<T> = std::result::Result<T, SimError>;
