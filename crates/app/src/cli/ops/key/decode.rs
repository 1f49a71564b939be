use clap::Args;

use common::crypto::{decode_config_key, KeyEnvelope, KeyError};

use crate::cli::op::{Op, OpContext};

/// Decode a base64 key and describe what it holds
#[derive(Args, Debug, Clone)]
pub struct Decode {
    /// Key in base64 config form
    pub encoded: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error(transparent)]
    Key(#[from] KeyError),
}

impl Op for Decode {
    type Error = DecodeError;
    type Output = String;

    fn execute(&self, _ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let bytes = decode_config_key(self.encoded.trim())?;

        // Signing keys are wrapped in an envelope, box keys are bare
        let described = match KeyEnvelope::from_bytes(&bytes) {
            Ok(envelope) if envelope.to_bytes()? == bytes => {
                let key_type = envelope.key_type()?;
                format!(
                    "envelope: {} ({} bytes)\nraw:      {}",
                    key_type,
                    envelope.data().len(),
                    hex::encode(envelope.data())
                )
            }
            _ => format!("raw ({} bytes): {}", bytes.len(), hex::encode(&bytes)),
        };
        Ok(described)
    }
}
