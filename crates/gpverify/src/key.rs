//! Key loading from PEM text.
//!
//! Accepts `PUBLIC KEY` (X.509 SubjectPublicKeyInfo) and `RSA PUBLIC KEY`
//! (PKCS#1) armor. Text preceding the first boundary line is skipped. Input
//! is parsed from memory only.

use rsa::pkcs1::{self, DecodeRsaPublicKey};
use rsa::pkcs1v15::VerifyingKey;
use rsa::pkcs8::{der, spki, DecodePublicKey, EncodePublicKey};
use rsa::traits::PublicKeyParts;
use rsa::RsaPublicKey;
use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::error::{CryptoError, CryptoErrorKind, CryptoResult};

const BEGIN_MARKER: &str = "-----BEGIN ";
const LABEL_SPKI: &str = "PUBLIC KEY";
const LABEL_PKCS1: &str = "RSA PUBLIC KEY";

/// RSA public key parsed for a single verification call.
#[derive(Debug, Clone)]
pub struct PublicKeyMaterial {
    key: RsaPublicKey,
}

impl PublicKeyMaterial {
    /// Modulus size in bits.
    pub fn bits(&self) -> usize {
        self.key.size() * 8
    }

    /// Modulus size in bytes; a well-formed signature has exactly this length.
    pub fn size(&self) -> usize {
        self.key.size()
    }

    /// Move the key into an RSA/SHA1 PKCS#1 v1.5 verifying key.
    ///
    /// The wrapper becomes the sole owner.
    pub fn into_verifying_key(self) -> VerifyingKey<Sha1> {
        VerifyingKey::<Sha1>::new(self.key)
    }
}

/// Parse PEM text into an RSA public key.
pub fn load_public_key(pem: &str) -> CryptoResult<PublicKeyMaterial> {
    if pem.trim().is_empty() {
        return Err(CryptoError::malformed_pem("empty key data"));
    }

    let start = pem
        .find(BEGIN_MARKER)
        .ok_or_else(|| CryptoError::malformed_pem("no PEM start line"))?;
    let label = pem_label(&pem[start..])
        .ok_or_else(|| CryptoError::malformed_pem("unterminated PEM start line"))?;
    let armored = first_block(&pem[start..], label);

    let key = match label {
        LABEL_SPKI => RsaPublicKey::from_public_key_pem(armored).map_err(spki_error)?,
        LABEL_PKCS1 => RsaPublicKey::from_pkcs1_pem(armored).map_err(pkcs1_error)?,
        other => {
            return Err(CryptoError::not_rsa(format!(
                "expected RSA public key, got PEM label {other:?}"
            )))
        }
    };

    tracing::debug!(label, key_bits = key.size() * 8, "loaded RSA public key");
    Ok(PublicKeyMaterial { key })
}

/// Key ID of a public key: `sha256:<hex>` over its SPKI DER encoding.
pub fn key_id(key: &PublicKeyMaterial) -> CryptoResult<String> {
    let doc = key.key.to_public_key_der().map_err(|e| {
        CryptoError::new(
            CryptoErrorKind::KeyEncoding,
            format!("failed to encode public key: {e}"),
        )
    })?;
    Ok(format!("sha256:{}", hex::encode(Sha256::digest(doc.as_bytes()))))
}

/// Cut at the end of the first `-----END <label>-----` line; anything after
/// it (notes, further blocks) is ignored. Without an end line the text is
/// passed on whole and the parser reports it.
fn first_block<'a>(armored: &'a str, label: &str) -> &'a str {
    let end_marker = format!("-----END {label}-----");
    match armored.find(&end_marker) {
        Some(pos) => &armored[..pos + end_marker.len()],
        None => armored.trim_end(),
    }
}

fn pem_label(armored: &str) -> Option<&str> {
    let rest = armored.strip_prefix(BEGIN_MARKER)?;
    let end = rest.find("-----")?;
    let label = &rest[..end];
    if label.contains('\n') {
        return None;
    }
    Some(label)
}

fn is_pem_error(err: &der::Error) -> bool {
    matches!(err.kind(), der::ErrorKind::Pem(_))
}

fn spki_error(err: spki::Error) -> CryptoError {
    match err {
        spki::Error::OidUnknown { oid } => {
            CryptoError::not_rsa(format!("unsupported public key algorithm {oid}"))
        }
        spki::Error::Asn1(e) if is_pem_error(&e) => {
            CryptoError::malformed_pem(format!("bad PEM encoding: {e}"))
        }
        other => CryptoError::malformed_key(format!("bad RSA public key: {other}")),
    }
}

fn pkcs1_error(err: pkcs1::Error) -> CryptoError {
    match err {
        pkcs1::Error::Asn1(e) if is_pem_error(&e) => {
            CryptoError::malformed_pem(format!("bad PEM encoding: {e}"))
        }
        other => CryptoError::malformed_key(format!("bad RSA public key: {other}")),
    }
}
