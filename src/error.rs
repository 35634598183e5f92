use thiserror::Error;

/// Main error type for murex operations
#[derive(Error, Debug)]
pub enum MurexError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid index format: {0}")]
    InvalidFormat(String),
}

/// Result type alias for murex operations
pub type Result<T> = std::result::Result<T, MurexError>;

impl MurexError {
    /// Invalid-format error for a magic number mismatch
    pub fn bad_magic(found: u32) -> Self {
        MurexError::InvalidFormat(format!("bad magic number {found:#010x}"))
    }

    /// Invalid-format error for an unsupported file version
    pub fn bad_version(found: u32) -> Self {
        MurexError::InvalidFormat(format!("unsupported index version {found}"))
    }
}
