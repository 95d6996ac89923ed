//! Error types for prover construction and secret handling

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProverError>;

#[derive(Error, Debug)]
pub enum ProverError {
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("Secret storage decryption failed: {0}")]
    Decryption(String),

    #[error("Invalid group element: {0}")]
    InvalidGroupElement(String),

    #[error("Invalid secret: {0}")]
    InvalidSecret(String),

    #[error("Proof generation failed: {0}")]
    Proof(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
