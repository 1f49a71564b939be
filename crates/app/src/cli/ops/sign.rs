use clap::Args;

use common::bundle::{BundleError, FileBundleStoreError};
use common::crypto::KeyError;

use crate::cli::op::{Op, OpContext};

#[derive(Args, Debug, Clone)]
pub struct Sign {
    /// Contract text to sign
    pub contract: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SignError {
    #[error(transparent)]
    Bundle(#[from] BundleError<FileBundleStoreError>),
    #[error("failed to sign: {0}")]
    Key(#[from] KeyError),
}

impl Op for Sign {
    type Error = SignError;
    type Output = String;

    fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let ring = ctx.key_ring()?;
        Ok(ring.sign_handshake(&self.contract)?)
    }
}
