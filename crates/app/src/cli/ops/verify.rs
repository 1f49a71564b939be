use clap::Args;

use common::bundle::{BundleError, FileBundleStoreError};
use common::crypto::KeyError;
use common::keyring::KeyRing;

use crate::cli::op::{Op, OpContext};

#[derive(Args, Debug, Clone)]
pub struct Verify {
    /// Signer's public key, base64 (raw or envelope). Defaults to our own.
    #[arg(long)]
    pub public: Option<String>,

    /// Base64 signature produced by `sigil sign`
    #[arg(long)]
    pub signature: String,

    /// Contract text that was signed
    pub contract: String,
}

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error(transparent)]
    Bundle(#[from] BundleError<FileBundleStoreError>),
    #[error("failed to verify: {0}")]
    Key(#[from] KeyError),
}

impl Op for Verify {
    type Error = VerifyError;
    type Output = String;

    fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let public = match &self.public {
            Some(public) => public.clone(),
            None => ctx.key_ring()?.public_key().to_string(),
        };

        let verified = KeyRing::verify_handshake(&public, &self.signature, &self.contract)?;
        Ok(if verified { "valid" } else { "invalid" }.to_string())
    }
}
