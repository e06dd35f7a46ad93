use clap::{Parser, Subcommand};

use super::commands::{key_id::KeyIdArgs, verify::VerifyArgs};

#[derive(Parser)]
#[command(
    name = "gpverify",
    version,
    about = "Verify RSA/SHA1 signatures on in-app billing purchase receipts"
)]
pub struct Cli {
    /// Log pipeline details to stderr (overrides RUST_LOG)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Verify a base64 signature over a message
    Verify(VerifyArgs),
    /// Print the key ID (sha256 of the SPKI encoding) of a public key
    KeyId(KeyIdArgs),
    /// Print the version number alone, for scripts that pin a release
    Version,
}
