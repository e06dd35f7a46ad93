//! Base64 signature decoding.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// Signature bytes owned by a single verification call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSignature(Vec<u8>);

impl DecodedSignature {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Exact signature length; no padding bytes are counted.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn from_test_bytes(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

/// Decode a standard-alphabet, `=`-padded base64 signature.
///
/// Returns `None` when the text is not valid base64 or carries no bytes;
/// both are ordinary rejections, not failures. Surrounding ASCII whitespace
/// is ignored.
pub fn decode_signature(encoded: &[u8]) -> Option<DecodedSignature> {
    let trimmed = encoded.trim_ascii();

    let bytes = match BASE64.decode(trimmed) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(error = %e, encoded_len = encoded.len(), "signature is not base64");
            return None;
        }
    };

    if bytes.is_empty() {
        tracing::debug!("signature decoded to zero bytes");
        return None;
    }

    Some(DecodedSignature(bytes))
}
