//! Exit codes for the `gpverify` binary.
//! These codes are part of the public contract; receipt pipelines branch on them.

pub const VALID: i32 = 0;
pub const INVALID: i32 = 1; // Signature rejected
pub const INPUT_ERROR: i32 = 2; // Unreadable input or bad arguments (clap also uses 2)
pub const VERIFY_ERROR: i32 = 3; // Verification machinery failed (bad key, library error)
