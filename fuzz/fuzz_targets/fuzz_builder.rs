#![no_main]

use libfuzzer_sys::fuzz_target;
use suffixnet::index::SuffixTreeBuilder;

fuzz_target!(|data: (Vec<(char, u8)>, bool)| {
    // Arbitrary character/text-index sequences must be rejected cleanly,
    // never panic
    let (input, finish) = data;
    let mut builder = SuffixTreeBuilder::with_defaults();
    for (ch, text_index) in input {
        let _ = builder.append_character(ch, text_index as usize);
    }
    if finish {
        let _ = builder.finish();
    }
});
