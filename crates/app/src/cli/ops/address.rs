use clap::Args;

use common::bundle::{BundleError, FileBundleStoreError};
use common::crypto::validate_address;

use crate::cli::op::{Op, OpContext};

#[derive(Args, Debug, Clone)]
pub struct Address {
    /// Check the format of this address instead of printing ours
    #[arg(long)]
    pub check: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AddressError {
    #[error(transparent)]
    Bundle(#[from] BundleError<FileBundleStoreError>),
}

impl Op for Address {
    type Error = AddressError;
    type Output = String;

    fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        match &self.check {
            Some(address) if validate_address(address) => Ok("valid".to_string()),
            Some(_) => Ok("invalid".to_string()),
            None => Ok(ctx.key_ring()?.address()),
        }
    }
}
