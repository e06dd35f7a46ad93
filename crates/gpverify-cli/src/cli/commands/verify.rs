//! `gpverify verify` - Verify a receipt signature.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use gpverify::VerificationOutcome;
use serde_json::json;
use std::fs;
use std::path::PathBuf;

use super::read_key_file;
use crate::exit_codes;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Public key file (PEM, `PUBLIC KEY` or `RSA PUBLIC KEY`)
    #[arg(long, env = "GPVERIFY_PUBLIC_KEY")]
    pub key: PathBuf,

    /// Signed message, taken verbatim
    #[arg(long, conflicts_with = "message_file", required_unless_present = "message_file")]
    pub message: Option<String>,

    /// File holding the signed message (read as raw bytes)
    #[arg(long)]
    pub message_file: Option<PathBuf>,

    /// Base64 signature
    #[arg(
        long,
        conflicts_with = "signature_file",
        required_unless_present = "signature_file",
        allow_hyphen_values = true
    )]
    pub signature: Option<String>,

    /// File holding the base64 signature
    #[arg(long)]
    pub signature_file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Quiet mode - only exit code, no output
    #[arg(long, short)]
    pub quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Inputs of one verification, owned for the duration of the call.
struct Inputs {
    pem: Vec<u8>,
    message: Vec<u8>,
    signature: Vec<u8>,
}

pub fn cmd_verify(args: VerifyArgs) -> i32 {
    let inputs = match read_inputs(&args) {
        Ok(inputs) => inputs,
        Err(e) => {
            if !args.quiet {
                eprintln!("error: {e:#}");
            }
            return exit_codes::INPUT_ERROR;
        }
    };

    let outcome = gpverify::verify_bytes(&inputs.pem, &inputs.message, &inputs.signature);
    if let VerificationOutcome::Error { message, code } = &outcome {
        tracing::warn!(key = %args.key.display(), code = ?code, "receipt verification error: {message}");
    }

    if !args.quiet {
        println!("{}", render(&outcome, args.format));
    }
    exit_code(&outcome)
}

fn read_inputs(args: &VerifyArgs) -> Result<Inputs> {
    let pem = read_key_file(&args.key)?;

    let message = match (&args.message, &args.message_file) {
        (Some(text), _) => text.clone().into_bytes(),
        (None, Some(path)) => fs::read(path)
            .with_context(|| format!("failed to read message: {}", path.display()))?,
        (None, None) => anyhow::bail!("must specify --message or --message-file"),
    };

    let signature = match (&args.signature, &args.signature_file) {
        (Some(text), _) => text.clone().into_bytes(),
        (None, Some(path)) => fs::read(path)
            .with_context(|| format!("failed to read signature: {}", path.display()))?,
        (None, None) => anyhow::bail!("must specify --signature or --signature-file"),
    };

    Ok(Inputs {
        pem,
        message,
        signature,
    })
}

pub(crate) fn exit_code(outcome: &VerificationOutcome) -> i32 {
    match outcome {
        VerificationOutcome::Valid => exit_codes::VALID,
        VerificationOutcome::Invalid => exit_codes::INVALID,
        VerificationOutcome::Error { .. } => exit_codes::VERIFY_ERROR,
    }
}

/// Render an outcome for stdout.
///
/// JSON mirrors the scripting host reply: `true`, `false`, or
/// `nil, message, code`.
pub(crate) fn render(outcome: &VerificationOutcome, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => match outcome {
            VerificationOutcome::Valid => "valid".to_string(),
            VerificationOutcome::Invalid => "invalid".to_string(),
            VerificationOutcome::Error {
                message,
                code: Some(code),
            } => format!("error: {message} (code {code})"),
            VerificationOutcome::Error {
                message,
                code: None,
            } => format!("error: {message}"),
        },
        OutputFormat::Json => {
            let reply = match outcome {
                VerificationOutcome::Valid => json!({ "valid": true }),
                VerificationOutcome::Invalid => json!({ "valid": false }),
                VerificationOutcome::Error { message, code } => {
                    json!({ "valid": null, "error": message, "code": code })
                }
            };
            reply.to_string()
        }
    }
}
