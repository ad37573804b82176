#![no_main]

use libfuzzer_sys::fuzz_target;
use suffixnet::automaton::build_network;
use suffixnet::index::SuffixTreeBuilder;
use suffixnet::Direction;

fuzz_target!(|texts: Vec<String>| {
    let mut builder = SuffixTreeBuilder::with_defaults();
    let mut expected = Vec::new();
    for text in &texts {
        if builder.append_text(text).is_ok() {
            expected.push(format!("{}$", text));
        }
    }
    let Ok(tree) = builder.finish() else {
        return;
    };

    // Every accepted text must come back out of the network
    let network = build_network(&tree, Direction::Forward).expect("walk failed");
    for text in &expected {
        assert!(network.recognizes(text), "lost text {:?}", text);
    }
});
