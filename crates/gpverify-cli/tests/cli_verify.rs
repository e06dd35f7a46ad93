//! Integration tests for the `gpverify` subcommands.

use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::OnceLock;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::{EncodePublicKey, LineEnding};
use rsa::signature::{SignatureEncoding, Signer};
use rsa::RsaPrivateKey;
use sha1::Sha1;
use tempfile::TempDir;

const PURCHASE_DATA: &str = r#"{"orderId":"GPA.1234-5678-9012-34567","packageName":"com.example.app","productId":"coins_100","purchaseTime":1345678900000,"purchaseState":0,"purchaseToken":"purchase.token.12345"}"#;

fn private_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| {
        RsaPrivateKey::new(&mut rand::thread_rng(), 2048).expect("failed to generate key")
    })
}

fn sign_b64(message: &[u8]) -> String {
    let signer = SigningKey::<Sha1>::new(private_key().clone());
    BASE64.encode(signer.sign(message).to_vec())
}

struct Workspace {
    dir: TempDir,
    key: PathBuf,
}

fn workspace() -> Workspace {
    let dir = TempDir::new().unwrap();
    let key = dir.path().join("public_key.pem");
    let pem = private_key()
        .to_public_key()
        .to_public_key_pem(LineEnding::LF)
        .unwrap();
    std::fs::write(&key, pem).unwrap();
    Workspace { dir, key }
}

fn gpverify_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_gpverify"));
    cmd.env_remove("GPVERIFY_PUBLIC_KEY").env_remove("RUST_LOG");
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn test_valid_receipt_exits_zero() {
    let ws = workspace();
    let signature = sign_b64(PURCHASE_DATA.as_bytes());

    let output = gpverify_cmd()
        .args(["verify", "--key"])
        .arg(&ws.key)
        .args(["--message", PURCHASE_DATA, "--signature", &signature])
        .output()
        .expect("failed to run gpverify verify");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "valid");
}

#[test]
fn test_tampered_receipt_exits_one() {
    let ws = workspace();
    let signature = sign_b64(PURCHASE_DATA.as_bytes());
    let tampered = PURCHASE_DATA.replace("coins_100", "coins_999");

    let output = gpverify_cmd()
        .args(["verify", "--key"])
        .arg(&ws.key)
        .args(["--message", &tampered, "--signature", &signature])
        .output()
        .expect("failed to run gpverify verify");

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "invalid");
}

#[test]
fn test_files_and_json_format() {
    let ws = workspace();
    let message = b"binary\0receipt\xff".to_vec();
    let message_path = ws.dir.path().join("receipt.bin");
    let signature_path = ws.dir.path().join("receipt.sig");
    std::fs::write(&message_path, &message).unwrap();
    std::fs::write(&signature_path, format!("{}\n", sign_b64(&message))).unwrap();

    let output = gpverify_cmd()
        .args(["verify", "--format", "json", "--key"])
        .arg(&ws.key)
        .arg("--message-file")
        .arg(&message_path)
        .arg("--signature-file")
        .arg(&signature_path)
        .output()
        .expect("failed to run gpverify verify");

    assert_eq!(output.status.code(), Some(0));
    let reply: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(reply, serde_json::json!({"valid": true}));
}

#[test]
fn test_bad_key_reports_error_reply() {
    let ws = workspace();
    let bad_key = ws.dir.path().join("bad.pem");
    std::fs::write(&bad_key, "not a pem key").unwrap();

    let output = gpverify_cmd()
        .args(["verify", "--format", "json", "--key"])
        .arg(&bad_key)
        .args(["--message", "purchase.token.12345", "--signature", "QUJD"])
        .output()
        .expect("failed to run gpverify verify");

    assert_eq!(output.status.code(), Some(3));
    let reply: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert!(reply["valid"].is_null());
    assert!(!reply["error"].as_str().unwrap().is_empty());
    assert_eq!(reply["code"], 100);
}

#[test]
fn test_garbage_signature_is_invalid_not_error() {
    let ws = workspace();

    let output = gpverify_cmd()
        .args(["verify", "--key"])
        .arg(&ws.key)
        .args([
            "--message",
            "purchase.token.12345",
            "--signature",
            "%%%not-base64%%%",
        ])
        .output()
        .expect("failed to run gpverify verify");

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "invalid");
}

#[test]
fn test_key_from_env() {
    let ws = workspace();
    let signature = sign_b64(b"purchase.token.12345");

    let output = gpverify_cmd()
        .env("GPVERIFY_PUBLIC_KEY", &ws.key)
        .args([
            "verify",
            "--quiet",
            "--message",
            "purchase.token.12345",
            "--signature",
            &signature,
        ])
        .output()
        .expect("failed to run gpverify verify");

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty(), "quiet mode prints nothing");
}

#[test]
fn test_missing_key_file_is_input_error() {
    let ws = workspace();

    let output = gpverify_cmd()
        .args(["verify", "--key"])
        .arg(ws.dir.path().join("missing.pem"))
        .args(["--message", "m", "--signature", "QUJD"])
        .output()
        .expect("failed to run gpverify verify");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read public key"));
}

#[test]
fn test_missing_message_is_usage_error() {
    let ws = workspace();

    let output = gpverify_cmd()
        .args(["verify", "--key"])
        .arg(&ws.key)
        .args(["--signature", "QUJD"])
        .output()
        .expect("failed to run gpverify verify");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_key_id_prints_fingerprint() {
    let ws = workspace();

    let output = gpverify_cmd()
        .args(["key-id", "--key"])
        .arg(&ws.key)
        .output()
        .expect("failed to run gpverify key-id");

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("key_id: sha256:"), "should print key_id");
    assert!(out.contains("bits:   2048"));
}

#[test]
fn test_version_subcommand_prints_bare_version() {
    let output = gpverify_cmd()
        .arg("version")
        .output()
        .expect("failed to run gpverify version");

    assert!(output.status.success());
    assert_eq!(stdout(&output), env!("CARGO_PKG_VERSION"));
}
