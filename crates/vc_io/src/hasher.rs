//! crates/vc_io/src/hasher.rs
//!
//! SHA-256 digests as lowercase hex.
//!
//! - `sha256_canonical(..)` for serializable values (goes through canonical_json),
//!   so two structurally equal values always share a digest.
//! - `sha256_hex(..)` for raw bytes.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::canonical_json::{to_canonical_bytes, to_canonical_json_bytes};
use crate::IoError;

/* ---------------------------------- Helpers ---------------------------------- */

fn to_lower_hex(bytes: &[u8]) -> String {
    const LUT: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(LUT[(b >> 4) as usize] as char);
        out.push(LUT[(b & 0x0F) as usize] as char);
    }
    out
}

/* ------------------------------- Raw hashing ------------------------------- */

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    to_lower_hex(&hasher.finalize())
}

/* ---------------------------- Canonical hashing ---------------------------- */

pub fn sha256_canonical<T: Serialize>(value: &T) -> Result<String, IoError> {
    Ok(sha256_hex(&to_canonical_bytes(value)?))
}

pub fn sha256_canonical_value(v: &Value) -> Result<String, IoError> {
    Ok(sha256_hex(&to_canonical_json_bytes(v)?))
}

/// First `n` characters of a digest (clamped to its length), for log fields.
pub fn short_digest(hex: &str, n: usize) -> &str {
    match hex.char_indices().nth(n) {
        Some((end, _)) => &hex[..end],
        None => hex,
    }
}
