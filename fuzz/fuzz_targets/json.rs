#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(record) = tstag::json::from_json_str(text) {
            if let Ok(bytes) = tstag::encode(&record) {
                assert_eq!(tstag::decode(&bytes).expect("decode"), record);
            }
        }
    }
});
