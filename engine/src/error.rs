use thiserror::Error;

/// Rejected construction parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("network needs at least one input state")]
    NoInputStates,
    #[error("network needs at least one output state")]
    NoOutputStates,
    #[error("max gate inputs {0} out of range 1..=8")]
    GateInputsOutOfRange(usize),
    #[error("max gate outputs {0} out of range 1..=8")]
    GateOutputsOutOfRange(usize),
    #[error("random genome length {0} cannot hold a gate marker")]
    GenomeTooShort(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    #[error("invalid number of input values: expected {expected}, got {actual}")]
    InputLengthMismatch { expected: usize, actual: usize },
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
}
