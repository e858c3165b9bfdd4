use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Payload too short for opcode {opcode:#06x}: need {needed} bytes, got {actual}")]
    PayloadTooShort {
        opcode: u16,
        needed: usize,
        actual: usize,
    },

    #[error("Invalid opcode table: {0}")]
    InvalidOpcodes(String),

    #[error("Failed to read object table: {0}")]
    ObjectTableRead(String),

    #[error("Failed to interact with object {object_id:#x}: {message}")]
    InteractionFailed { object_id: u32, message: String },

    #[error("Worker '{0}' did not stop in time")]
    WorkerJoinTimeout(&'static str),

    #[error("Worker '{0}' panicked")]
    WorkerPanicked(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }

    /// Errors the scan loop can ride out by retrying on the next tick
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::ObjectTableRead(_) | Error::InteractionFailed { .. }
        )
    }
}
