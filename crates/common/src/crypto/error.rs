/// Errors raised while constructing, encoding or decoding keys
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("invalid key length, expected {expected}, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },
    #[error("invalid signature length, expected {expected}, got {got}")]
    InvalidSignatureLength { expected: usize, got: usize },
    /// Right length, but not a usable key, such as a keypair whose public
    ///  half does not match its seed
    #[error("invalid key bytes")]
    InvalidKeyBytes,
    #[error("invalid or unsupported key type: {0}")]
    UnsupportedKeyType(u32),
    #[error("malformed key envelope: {0}")]
    MalformedEnvelope(#[from] bincode::Error),
    #[error("invalid encoding: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),
    #[error("random source exhausted: {0}")]
    RandomSourceExhausted(String),
}

/// Errors raised by the authenticated encryption adapters
///
/// `DecryptionFailed` never says which check failed: wrong key pair,
///  tampered bytes and truncated input all look the same to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CipherError {
    #[error("invalid key length, expected {expected}, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },
    #[error("ciphertext too short, expected at least {expected} bytes, got {got}")]
    CiphertextTooShort { expected: usize, got: usize },
    #[error("message encryption failed")]
    EncryptionFailed,
    #[error("message decryption failed")]
    DecryptionFailed,
    #[error("random source exhausted: {0}")]
    RandomSourceExhausted(String),
}
