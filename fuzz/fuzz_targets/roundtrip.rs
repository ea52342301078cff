#![no_main]
use libfuzzer_sys::fuzz_target;

// Jeder erfolgreich dekodierte Record muss sich identisch re-encodieren lassen.
fuzz_target!(|data: &[u8]| {
    if let Ok(record) = tstag::decode(data) {
        let bytes = tstag::encode(&record).expect("decoded indices are always encodable");
        assert_eq!(bytes.len(), tstag::encoded_len(&record));
        let again = tstag::decode(&bytes).expect("re-decode");
        assert_eq!(again, record);
    }
});
