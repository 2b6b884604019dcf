use thiserror::Error;

pub type Result<T> = std::result::Result<T, GenericsError>;

#[derive(Debug, Error)]
pub enum GenericsError {
    #[error("invalid descriptor: {0}")]
    InvalidDescriptor(String),
    #[error("invalid signature: {0}")]
    InvalidSignature(String),
    /// The call site has fewer arguments than the callee declares (after skipping the receiver).
    #[error("call site has no argument at index {index} (argument count: {arg_count})")]
    MissingCallArgument { index: usize, arg_count: usize },
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}
