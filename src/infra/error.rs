use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read catalog `{path}`")]
    CatalogRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog `{path}`")]
    CatalogParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
}

impl InfraError {
    pub fn catalog_read(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::CatalogRead {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    pub fn catalog_parse(path: impl AsRef<Path>, source: toml::de::Error) -> Self {
        Self::CatalogParse {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    pub fn telemetry(message: impl Into<String>) -> Self {
        Self::Telemetry(message.into())
    }
}
