use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Record '{record}' is missing required field '{field}'")]
    MissingField { record: String, field: &'static str },

    #[error("Invalid range for '{field}': min {min} is greater than max {max}")]
    InvalidRange { field: &'static str, min: f64, max: f64 },

    #[error("Microbe '{0}' appears more than once in the group")]
    DuplicateMember(String),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SearchError {
    #[error("Candidate pool is empty")]
    EmptyPool,

    #[error("Need {needed} candidates to form a group, but only {available} available")]
    InsufficientCandidates { needed: usize, available: usize },

    #[error("Group size must be at least 1")]
    InvalidGroupSize,

    #[error("No group scored above zero")]
    NoCandidate,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FoodWebError {
    #[error("Species '{0}' not found in food web")]
    NotFound(String),

    #[error("Species '{0}' is defined more than once")]
    DuplicateSpecies(String),

    #[error("Producer '{producer}' cannot eat '{prey}'")]
    ProducerEats { producer: String, prey: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    FoodWeb(#[from] FoodWebError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
