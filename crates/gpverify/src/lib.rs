//! RSA/SHA1 signature verification for in-app billing receipts.
//!
//! Verifies that a base64 signature (Google Play `INAPP_DATA_SIGNATURE`)
//! was produced over a message (`INAPP_PURCHASE_DATA`) by the private half of
//! a PEM-encoded RSA public key.
//!
//! Every call runs the same pipeline:
//!
//! 1. Load the public key from PEM
//! 2. Decode the base64 signature
//! 3. Verify RSA/SHA1 (PKCS#1 v1.5) over the message bytes
//! 4. Classify the result as valid, invalid, or error
//!
//! # Quick Start
//!
//! ```no_run
//! use gpverify::{verify, VerificationOutcome};
//!
//! # fn example(pem: &str, purchase_data: &[u8], signature: &str) {
//! match verify(pem, purchase_data, signature) {
//!     VerificationOutcome::Valid => println!("receipt accepted"),
//!     VerificationOutcome::Invalid => println!("receipt rejected"),
//!     VerificationOutcome::Error { message, code } => {
//!         eprintln!("verification failed: {message} ({code:?})")
//!     }
//! }
//! # }
//! ```
//!
//! Calls share no state; keys are parsed anew each time and every buffer is
//! dropped before the call returns.

pub mod error;
pub mod key;
pub mod outcome;
pub mod signature;
pub mod verifier;

pub use error::{CryptoError, CryptoErrorKind, CryptoResult, PendingError};
pub use key::{key_id, load_public_key, PublicKeyMaterial};
pub use outcome::{classify, Signal, VerificationOutcome, UNKNOWN_ERROR};
pub use signature::{decode_signature, DecodedSignature};
pub use verifier::verify_sha1;

/// Verify a base64 RSA/SHA1 signature over `message`.
pub fn verify(public_key_pem: &str, message: &[u8], signature_base64: &str) -> VerificationOutcome {
    classify(run_pipeline(
        public_key_pem,
        message,
        signature_base64.as_bytes(),
    ))
}

/// Like [`verify`], with every input given as raw bytes.
///
/// PEM data that is not UTF-8 is a malformed key.
pub fn verify_bytes(
    public_key_pem: &[u8],
    message: &[u8],
    signature_base64: &[u8],
) -> VerificationOutcome {
    let pem = match std::str::from_utf8(public_key_pem) {
        Ok(pem) => pem,
        Err(e) => {
            return classify(Signal::Failed(
                CryptoError::malformed_pem(format!("key data is not UTF-8: {e}")).into(),
            ))
        }
    };
    classify(run_pipeline(pem, message, signature_base64))
}

fn run_pipeline(pem: &str, message: &[u8], signature_base64: &[u8]) -> Signal {
    let key = match load_public_key(pem) {
        Ok(key) => key,
        Err(e) => return Signal::Failed(e.into()),
    };

    let Some(signature) = decode_signature(signature_base64) else {
        return Signal::Rejected;
    };

    tracing::debug!(
        message_len = message.len(),
        signature_len = signature.len(),
        key_bits = key.bits(),
        "verifying RSA/SHA1 signature"
    );
    verify_sha1(message, &signature, key)
}
