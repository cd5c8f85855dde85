use thiserror::Error;

/// Errors that can occur while setting up or running the detector.
///
/// Packet handling itself never fails; these cover configuration and the
/// interception hook's lifecycle.
#[derive(Error, Debug)]
pub enum ScanwatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[cfg(all(feature = "ebpf", target_os = "linux"))]
    #[error(transparent)]
    Ebpf(#[from] crate::probe::EbpfError),

    #[error("scan detector is already running")]
    AlreadyRunning,

    #[error("scan detector is not running")]
    NotRunning,
}

pub type Result<T> = std::result::Result<T, ScanwatchError>;
