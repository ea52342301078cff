#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = tstag::decode(data);
    let _ = tstag::decode_with_options(data, tstag::CodecOptions::default().with_strict());
});
