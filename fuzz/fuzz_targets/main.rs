#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(parse) = parser::parse(s) {
            let _xml = xml_writer::to_xml(&parse.syntax());
        }
    }
});
