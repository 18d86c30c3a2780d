use thiserror::Error;

pub type Result<T> = std::result::Result<T, GenError>;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("invalid generator configuration: {0}")]
    InvalidConfig(String),

    #[error("cannot run a map builder chain without a starting build system")]
    NoStarter,

    #[error("{0} requires a list of rooms to be present")]
    MissingRooms(&'static str),

    #[error("{0} requires a list of zones to be present")]
    MissingZones(&'static str),

    #[error("need at least two spawnable tiles to place the start and the stairs, found {found}")]
    NoSpawnLocations { found: usize },

    #[error("maze generation left {regions} disconnected regions")]
    Disconnected { regions: usize },

    #[error("failed to parse JSON document: {0}")]
    Json(#[from] serde_json::Error),
}

impl GenError {
    pub(crate) fn config<S: ToString>(message: S) -> Self {
        GenError::InvalidConfig(message.to_string())
    }
}
