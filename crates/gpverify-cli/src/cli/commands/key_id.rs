//! `gpverify key-id` - Print the key ID of a public key.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use super::read_key_file;
use crate::exit_codes;

#[derive(Args, Debug)]
pub struct KeyIdArgs {
    /// Public key file (PEM)
    #[arg(long, env = "GPVERIFY_PUBLIC_KEY")]
    pub key: PathBuf,
}

pub fn cmd_key_id(args: KeyIdArgs) -> i32 {
    let pem = match read_pem(&args) {
        Ok(pem) => pem,
        Err(e) => {
            eprintln!("error: {e:#}");
            return exit_codes::INPUT_ERROR;
        }
    };

    let described = gpverify::load_public_key(&pem).and_then(|key| {
        let id = gpverify::key_id(&key)?;
        Ok((id, key.bits()))
    });

    match described {
        Ok((id, bits)) => {
            println!("key_id: {id}");
            println!("bits:   {bits}");
            exit_codes::VALID
        }
        Err(e) => {
            eprintln!("error: {e} (code {})", code_label(e.code()));
            exit_codes::VERIFY_ERROR
        }
    }
}

fn read_pem(args: &KeyIdArgs) -> Result<String> {
    let bytes = read_key_file(&args.key)?;
    String::from_utf8(bytes)
        .with_context(|| format!("public key is not UTF-8: {}", args.key.display()))
}

fn code_label(code: Option<u32>) -> String {
    code.map_or_else(|| "none".to_string(), |c| c.to_string())
}
