use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::crypto::{
    decode_config_key, Ed25519PrivateKey, Ed25519PublicKey, KeyError, PrivKey, PubKey, PublicKey,
    PUBLIC_KEY_SIZE, SIGNATURE_SIZE,
};

/// Sign a handshake contract with a base64 private key envelope
///
/// Returns the signature as standard base64.
pub fn sign_handshake(private_encoded: &str, contract: &str) -> Result<String, KeyError> {
    let private = Ed25519PrivateKey::from_envelope(&decode_config_key(private_encoded)?)?;
    Ok(BASE64.encode(private.sign(contract.as_bytes())))
}

/// Check a base64 handshake signature against a contract
///
/// `public_encoded` may hold either the raw 32-byte Ed25519 key or a key
///  envelope, both base64. A wrong signature is `Ok(false)`.
///
/// # Errors
///
/// Returns an error if:
/// - Either input is not valid base64
/// - The public key is not 32 bytes and not a valid envelope
/// - The signature is not 64 bytes
pub fn verify_handshake(
    public_encoded: &str,
    signature_b64: &str,
    contract: &str,
) -> Result<bool, KeyError> {
    let public_bytes = decode_config_key(public_encoded)?;
    let public = decode_public(&public_bytes)?;

    let signature = BASE64.decode(signature_b64)?;
    if signature.len() != SIGNATURE_SIZE {
        return Err(KeyError::InvalidSignatureLength {
            expected: SIGNATURE_SIZE,
            got: signature.len(),
        });
    }

    let verified = public.verify(contract.as_bytes(), &signature)?;
    tracing::debug!(verified, "verified handshake");
    Ok(verified)
}

fn decode_public(bytes: &[u8]) -> Result<PublicKey, KeyError> {
    if bytes.len() == PUBLIC_KEY_SIZE {
        return Ed25519PublicKey::from_raw(bytes).map(PublicKey::from);
    }
    PublicKey::from_envelope(bytes).map_err(|e| match e {
        KeyError::MalformedEnvelope(_) => KeyError::InvalidKeyLength {
            expected: PUBLIC_KEY_SIZE,
            got: bytes.len(),
        },
        other => other,
    })
}
