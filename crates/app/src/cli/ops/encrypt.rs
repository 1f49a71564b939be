use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use clap::Args;

use common::bundle::{BundleError, FileBundleStoreError};
use common::crypto::{CipherError, Curve25519PublicKey, KeyError};

use crate::cli::op::{Op, OpContext};

#[derive(Args, Debug, Clone)]
pub struct Encrypt {
    /// Recipient's encryption public key (pubC), base64
    #[arg(long)]
    pub to: String,

    /// Message to seal
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum EncryptError {
    #[error(transparent)]
    Bundle(#[from] BundleError<FileBundleStoreError>),
    #[error("invalid recipient key: {0}")]
    Key(#[from] KeyError),
    #[error("encryption failed: {0}")]
    Cipher(#[from] CipherError),
}

impl Op for Encrypt {
    type Error = EncryptError;
    type Output = String;

    fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let recipient = Curve25519PublicKey::from_base64(&self.to)?;
        let ring = ctx.key_ring()?;
        let sealed = ring.encrypt_for(&recipient, self.message.as_bytes())?;
        tracing::debug!(bytes = sealed.len(), "sealed message");
        Ok(BASE64.encode(sealed))
    }
}
