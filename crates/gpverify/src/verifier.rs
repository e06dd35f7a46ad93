//! RSA/SHA1 (PKCS#1 v1.5) verification.

use rsa::pkcs1v15::Signature;
use rsa::signature::DigestVerifier;
use sha1::{Digest, Sha1};

use crate::error::{CryptoError, CryptoErrorKind};
use crate::key::PublicKeyMaterial;
use crate::outcome::Signal;
use crate::signature::DecodedSignature;

/// Verify `signature` over `message` with `key`.
///
/// Consumes the key: it moves into the verifying wrapper and is dropped when
/// this call returns. A fresh SHA-1 context is fed the whole message once and
/// finalized against the signature.
pub fn verify_sha1(message: &[u8], signature: &DecodedSignature, key: PublicKeyMaterial) -> Signal {
    let key_len = key.size();
    let verifying_key = key.into_verifying_key();

    let signature_len = signature.len();
    if signature_len != key_len {
        tracing::debug!(signature_len, key_len, "signature length does not match modulus");
    }

    let signature = match Signature::try_from(signature.as_bytes()) {
        Ok(signature) => signature,
        Err(e) => {
            tracing::debug!(error = %e, "signature bytes rejected");
            return Signal::Rejected;
        }
    };

    let mut digest = Sha1::new();
    digest.update(message);

    translate(verifying_key.verify_digest(digest, &signature))
}

/// The single point where the library's verify result becomes a [`Signal`].
fn translate(result: Result<(), rsa::signature::Error>) -> Signal {
    let err = match result {
        Ok(()) => return Signal::Verified,
        Err(err) => err,
    };

    let cause = std::error::Error::source(&err).and_then(|s| s.downcast_ref::<rsa::Error>());
    match cause {
        None | Some(rsa::Error::Verification) => Signal::Rejected,
        Some(other) => Signal::Failed(
            CryptoError::new(
                CryptoErrorKind::Unknown,
                format!("rsa verification failed: {other}"),
            )
            .into(),
        ),
    }
}
