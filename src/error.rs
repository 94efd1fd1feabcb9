use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FieldAreaError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{format} parse error: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    #[error("no polygon found in {0}")]
    NoPolygon(PathBuf),

    #[error("unsupported input format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("coordinate out of range: lat {lat}, lon {lon}")]
    CoordinateOutOfRange { lat: f64, lon: f64 },

    #[error("projection error: {0}")]
    Projection(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FieldAreaError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FieldAreaError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(format: &'static str, message: impl ToString) -> Self {
        FieldAreaError::Parse {
            format,
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FieldAreaError>;
