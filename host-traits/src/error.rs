use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("Host capability not available: {0}")]
    NotAvailable(String),

    #[error("Native control fault: {0}")]
    ControlFault(String),

    #[error("Host operation failed: {0}")]
    OperationFailed(String),

    #[error("Settings document error: {0}")]
    Settings(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HostError>;
