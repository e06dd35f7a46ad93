use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::args::{Cli, Command};
use crate::exit_codes;

pub mod key_id;
pub mod verify;

pub fn dispatch(cli: Cli) -> i32 {
    match cli.cmd {
        Command::Verify(args) => verify::cmd_verify(args),
        Command::KeyId(args) => key_id::cmd_key_id(args),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            exit_codes::VALID
        }
    }
}

/// Read a PEM public key file as raw bytes.
pub(crate) fn read_key_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read public key: {}", path.display()))
}
