#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Malformed input must only ever produce an `Error`, never a panic.
    let _ = blendfile::BlendFile::from_bytes(data);
});
