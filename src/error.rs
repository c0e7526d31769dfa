use thiserror::Error;

/// Errors raised at the gallery's fallible boundaries.
///
/// The view-state itself never fails; only I/O, parsing and the
/// catalog database can.
#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed photo payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Catalog database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Invalid settings file: {0}")]
    Settings(#[from] toml::de::Error),

    #[error("Could not serialize settings: {0}")]
    SettingsWrite(#[from] toml::ser::Error),

    #[error("Could not determine a data directory for the catalog")]
    NoDataDir,
}

pub type Result<T> = std::result::Result<T, GalleryError>;
