//! Parser fuzz target: feed arbitrary UTF-8 to `lelei::parse`.
//! Any input must end in a Document or a ParseError without panicking. Accepted documents
//! must also render through `format_document`, and their short name must be non-empty.
//! Build with: cargo fuzz run parser_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let s = match std::str::from_utf8(data) {
        Ok(x) => x,
        Err(_) => return,
    };
    if let Ok(doc) = lelei::parse(s) {
        assert!(!doc.proto.proto_short.is_empty());
        let _ = lelei::dump::format_document(&doc);
    }
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run parser_fuzz");
}
