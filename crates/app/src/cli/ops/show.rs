use clap::Args;

use common::bundle::{BundleError, FileBundleStoreError};
use common::crypto::EncryptionKey;

use crate::cli::op::{Op, OpContext};

#[derive(Args, Debug, Clone)]
pub struct Show;

#[derive(Debug, thiserror::Error)]
pub enum ShowError {
    #[error(transparent)]
    Bundle(#[from] BundleError<FileBundleStoreError>),
}

impl Op for Show {
    type Error = ShowError;
    type Output = String;

    fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let ring = ctx.key_ring()?;
        let has_secret = ring
            .bundle()
            .secret_key
            .as_deref()
            .is_some_and(|s| !s.is_empty());

        let lines = [
            format!("domain:  {}", ring.domain()),
            format!("bundle:  {}", ctx.bundle_path.display()),
            format!("address: {}", ring.address()),
            format!("pub:     {}", ring.public_key()),
            format!("pubC:    {}", ring.encryption_public().to_base64()),
            format!("secret:  {}", if has_secret { "yes" } else { "no" }),
        ];
        Ok(lines.join("\n"))
    }
}
