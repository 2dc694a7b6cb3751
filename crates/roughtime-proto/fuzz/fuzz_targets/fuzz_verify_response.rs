#![no_main]
use libfuzzer_sys::fuzz_target;
use roughtime_proto::verify_response;

fuzz_target!(|data: &[u8]| {
    // The full pipeline over arbitrary replies must be rejected without panicking.
    let nonce = [0x42u8; 64];
    let public_key = [0x24u8; 32];
    assert!(verify_response(data, &nonce, &public_key).is_err());
});
