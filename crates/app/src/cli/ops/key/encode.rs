use clap::Args;

use common::crypto::encode_config_key;

use crate::cli::op::{Op, OpContext};

/// Encode hex key bytes as base64, the form stored in bundles
#[derive(Args, Debug, Clone)]
pub struct Encode {
    /// Key bytes as hex
    pub hex: String,
}

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

impl Op for Encode {
    type Error = EncodeError;
    type Output = String;

    fn execute(&self, _ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let bytes = hex::decode(self.hex.trim().trim_start_matches("0x"))?;
        Ok(encode_config_key(&bytes))
    }
}
