use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Browser launch failed: {0}")]
    Launch(String),

    #[error("Failed to open a new tab: {0}")]
    PageOpen(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("PDF export failed: {0}")]
    Export(String),

    #[error("Browser shutdown failed: {0}")]
    Shutdown(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Exit code for the process, one per failure category so calling
    /// scripts can tell outcomes apart. Success is the usual 0.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Launch(_) => 1,
            Error::PageOpen(_) => 2,
            Error::Navigation(_) => 3,
            Error::Export(_) => 4,
            Error::Io(_) => 5,
            Error::Shutdown(_) => 6,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
