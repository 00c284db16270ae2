use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlightError {
    #[error("invalid latitude {0}: expected a finite value in [-90, 90]")]
    InvalidLatitude(f64),

    #[error("invalid longitude {0}: expected a finite value in [-180, 180]")]
    InvalidLongitude(f64),

    #[error("invalid config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FlightError>;
