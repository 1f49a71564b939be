use std::sync::OnceLock;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use blake2b_simd::Params;
use regex::Regex;
use sha2::{Digest, Sha256};

/// Number of bytes produced by [`hash_blake2x`]
pub const BLAKE2X_OUTPUT_SIZE: usize = 256;
/// Longest key accepted by [`hash_blake2x`]
pub const BLAKE2X_MAX_KEY_SIZE: usize = blake2b_simd::KEYBYTES;

const BLAKE2B_OUT: usize = blake2b_simd::OUTBYTES;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashError {
    #[error("hash key too long, max {max} bytes, got {got}")]
    KeyTooLong { max: usize, got: usize },
    #[error("hash output too short, expected {expected} bytes, got {got}")]
    OutputTooShort { expected: usize, got: usize },
}

/// Expand `key_material` into 256 bytes with BLAKE2Xb
///
/// The input message is empty; all entropy comes from the key. The root
///  hash binds the requested output length, then each 64-byte block is a
///  separate output node over the root digest, indexed by its offset.
///
/// # Errors
///
/// Returns an error if:
/// - `key_material` is longer than 64 bytes
/// - Fewer than 256 bytes were produced
pub fn hash_blake2x(key_material: &[u8]) -> Result<[u8; BLAKE2X_OUTPUT_SIZE], HashError> {
    if key_material.len() > BLAKE2X_MAX_KEY_SIZE {
        return Err(HashError::KeyTooLong {
            max: BLAKE2X_MAX_KEY_SIZE,
            got: key_material.len(),
        });
    }

    // xof length lives in the upper half of the node offset word
    let xof_length = (BLAKE2X_OUTPUT_SIZE as u64) << 32;

    let root = Params::new()
        .hash_length(BLAKE2B_OUT)
        .key(key_material)
        .node_offset(xof_length)
        .hash(&[]);

    let mut out = [0u8; BLAKE2X_OUTPUT_SIZE];
    let mut written = 0;
    for (index, chunk) in out.chunks_mut(BLAKE2B_OUT).enumerate() {
        let block = Params::new()
            .hash_length(chunk.len())
            .fanout(0)
            .max_depth(0)
            .max_leaf_length(BLAKE2B_OUT as u32)
            .node_offset(xof_length | index as u64)
            .node_depth(0)
            .inner_hash_length(BLAKE2B_OUT)
            .hash(root.as_bytes());

        let bytes = block.as_bytes();
        if bytes.len() != chunk.len() {
            return Err(HashError::OutputTooShort {
                expected: BLAKE2X_OUTPUT_SIZE,
                got: written + bytes.len(),
            });
        }
        chunk.copy_from_slice(bytes);
        written += bytes.len();
    }

    if written != BLAKE2X_OUTPUT_SIZE {
        return Err(HashError::OutputTooShort {
            expected: BLAKE2X_OUTPUT_SIZE,
            got: written,
        });
    }
    Ok(out)
}

fn address_pattern() -> &'static Regex {
    static ADDRESS: OnceLock<Regex> = OnceLock::new();
    ADDRESS.get_or_init(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("address pattern is valid"))
}

/// Whether `address` is `0x` followed by exactly 40 hex characters
pub fn validate_address(address: &str) -> bool {
    address_pattern().is_match(address)
}

/// Derive a `0x` address from raw public key bytes
///
/// The key is base64-encoded, hashed with SHA-256, and the last 20 bytes of
///  the digest are rendered as hex.
pub fn derive_address(public_key: &[u8]) -> String {
    let digest = Sha256::digest(BASE64.encode(public_key).as_bytes());
    let hex = hex::encode(digest);
    format!("0x{}", &hex[hex.len() - 40..])
}
