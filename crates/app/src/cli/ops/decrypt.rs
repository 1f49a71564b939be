use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use clap::Args;

use common::bundle::{BundleError, FileBundleStoreError};
use common::crypto::{CipherError, Curve25519PublicKey, KeyError};

use crate::cli::op::{Op, OpContext};

#[derive(Args, Debug, Clone)]
pub struct Decrypt {
    /// Sender's encryption public key (pubC), base64
    #[arg(long)]
    pub from: String,

    /// Base64 ciphertext produced by `sigil encrypt`
    pub ciphertext: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DecryptError {
    #[error(transparent)]
    Bundle(#[from] BundleError<FileBundleStoreError>),
    #[error("invalid sender key: {0}")]
    Key(#[from] KeyError),
    #[error("invalid ciphertext encoding: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error(transparent)]
    Cipher(#[from] CipherError),
}

impl Op for Decrypt {
    type Error = DecryptError;
    type Output = String;

    fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let sender = Curve25519PublicKey::from_base64(&self.from)?;
        let ciphertext = BASE64.decode(&self.ciphertext)?;
        let ring = ctx.key_ring()?;
        let plaintext = ring.decrypt_from(&sender, &ciphertext)?;
        Ok(String::from_utf8_lossy(&plaintext).into_owned())
    }
}
