#![no_main]

use gpverify::VerificationOutcome;
use libfuzzer_sys::fuzz_target;

// Input layout: key, message and signature separated by the first two 0xFF bytes.
fuzz_target!(|data: &[u8]| {
    let mut parts = data.splitn(3, |b| *b == 0xFF);
    let pem = parts.next().unwrap_or_default();
    let message = parts.next().unwrap_or_default();
    let signature = parts.next().unwrap_or_default();

    if let VerificationOutcome::Error { message, .. } =
        gpverify::verify_bytes(pem, message, signature)
    {
        assert!(!message.is_empty());
    }
});
