use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("tcp/io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serial protocol error: {0}")]
    Serial(#[from] serial::Error),
    #[cfg(feature = "visa")]
    #[error("visa error: {0}")]
    Visa(#[from] visa_rs::Error),
    #[error("invalid resource string '{0}'")]
    InvalidResource(String),
    #[error("{0} support is not enabled, rebuild with `--features {1}`")]
    FeatureNotEnabled(&'static str, &'static str),
    #[error("no response to '{0}'")]
    NoResponse(String),
    #[error("response is not valid utf-8")]
    Encoding(#[from] std::str::Utf8Error),
    #[error("connection is closed")]
    Closed,
    #[error("read termination must be exactly one byte, got {0:?}")]
    Termination(String),
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        match self {
            TransportError::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
            ),
            TransportError::Serial(e) => {
                matches!(e.kind(), serial::ErrorKind::Io(std::io::ErrorKind::TimedOut))
            }
            TransportError::NoResponse(_) => true,
            _ => false,
        }
    }
}
