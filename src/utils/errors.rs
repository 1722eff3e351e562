use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Config error: {0}")]
    InvalidConfig(String),

    #[error("Invalid range: lower bound {lower} is greater than upper bound {upper}")]
    InvalidRange { lower: f64, upper: f64 },

    #[error("NaN is not a valid input to {0}")]
    NotANumber(&'static str),

    #[error("Rotation axis must be a unit vector, got squared length {0}")]
    NonUnitAxis(f64),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_yaml::Error),

    #[error("World data error: {0}")]
    JsonError(#[from] serde_json::Error),
}
