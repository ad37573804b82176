//! End-to-end scenarios: texts in, suffix tree and transition network out.

use suffixnet::automaton::build_network;
use suffixnet::index::{SuffixTree, SuffixTreeBuilder};
use suffixnet::{Direction, Error};

fn build(texts: &[&str]) -> SuffixTree {
    let mut builder = SuffixTreeBuilder::with_defaults();
    for text in texts {
        builder.append_text(text).expect("text rejected");
    }
    builder.finish().expect("finish failed")
}

/// Feed `input` character by character, starting a new text after each `$`
fn build_by_character(input: &str) -> Result<SuffixTree, Error> {
    let mut builder = SuffixTreeBuilder::with_defaults();
    let mut text_index = 0;
    for ch in input.chars() {
        builder.append_character(ch, text_index)?;
        if ch == '$' {
            text_index += 1;
        }
    }
    builder.finish()
}

fn leaf_suffixes(tree: &SuffixTree) -> Vec<String> {
    let mut suffixes: Vec<String> = tree
        .leaves()
        .map(|leaf| tree.path_label(leaf.id()))
        .collect();
    suffixes.sort();
    suffixes
}

#[test]
fn test_abab_leaves_and_node_count() {
    let tree = build_by_character("abab$").unwrap();

    assert_eq!(leaf_suffixes(&tree), vec!["$", "ab$", "abab$", "b$", "bab$"]);
    // root + internal "ab" and "b" + five leaves
    assert_eq!(tree.node_count(), 8);
}

#[test]
fn test_generalized_shared_prefix() {
    let tree = build_by_character("xabxac$xabxaa$").unwrap();

    // "xabxa" is one explicit node reached through a single path
    let branch = tree.find_node("xabxa").expect("no node for shared prefix");
    assert_eq!(
        tree.nodes()
            .iter()
            .filter(|n| tree.path_label(n.id()) == "xabxa")
            .count(),
        1
    );

    let network = build_network(&tree, Direction::Forward).unwrap();
    let state = network.state_of(branch).expect("branch point has no state");
    let mut labels: Vec<String> = network
        .transitions_of(state)
        .unwrap()
        .iter()
        .map(|t| network.label(t.to_suffix).unwrap())
        .collect();
    labels.sort();
    assert_eq!(labels, vec!["a$", "c$"]);

    assert_eq!(network.recognized_texts(), vec!["xabxaa$", "xabxac$"]);
}

#[test]
fn test_terminator_mid_text_is_rejected() {
    let mut builder = SuffixTreeBuilder::with_defaults();
    for ch in "ab$".chars() {
        builder.append_character(ch, 0).unwrap();
    }

    let err = builder.append_character('c', 0).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));

    let err = SuffixTreeBuilder::with_defaults().append_text("a$c").unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[test]
fn test_finish_with_open_text_is_rejected() {
    let err = build_by_character("abc$de").unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[test]
fn test_every_suffix_has_a_leaf() {
    let text = "mississippi";
    let tree = build(&[text]);

    let expected: Vec<String> = {
        let full: Vec<char> = format!("{}$", text).chars().collect();
        let mut all: Vec<String> = (0..full.len()).map(|i| full[i..].iter().collect()).collect();
        all.sort();
        all
    };
    assert_eq!(leaf_suffixes(&tree), expected);

    for leaf in tree.leaves() {
        for position in leaf.positions() {
            let suffix: String = tree.slice(position.start, position.end).unwrap().iter().collect();
            assert_eq!(tree.path_label(leaf.id()), suffix);
        }
    }
}

#[test]
fn test_network_round_trip() {
    let texts = ["cacao", "cocoa", "coca", "cola"];
    let tree = build(&texts);
    let network = build_network(&tree, Direction::Forward).unwrap();

    let mut recognized = network.recognized_texts();
    recognized.sort();
    let mut expected: Vec<String> = texts.iter().map(|t| format!("{}$", t)).collect();
    expected.sort();
    assert_eq!(recognized, expected);

    for text in &expected {
        assert!(network.recognizes(text));
    }
    assert!(network.matches_prefix("coc"));
    assert!(!network.recognizes("coc$"));
}

#[test]
fn test_shared_prefix_created_once() {
    let tree = build(&["prefixone", "prefixtwo"]);

    let node = tree.find_node("prefix").expect("no branch at shared prefix");
    let n = tree.get_node(node).unwrap();
    assert_eq!(n.children().len(), 2);

    let network = build_network(&tree, Direction::Forward).unwrap();
    // root -> "prefix" -> two leaves, nothing duplicated
    assert_eq!(network.states().len(), 4);
    assert_eq!(network.transition_count(), 3);
}

#[test]
fn test_add_state_idempotent_on_built_network() {
    let tree = build(&["abc", "abd"]);
    let mut network = build_network(&tree, Direction::Forward).unwrap();

    let before = network.states().len();
    let first = network.add_state(0);
    let second = network.add_state(0);
    assert_eq!(first, second);
    assert_eq!(network.states().len(), before);
}

#[test]
fn test_reversed_network_reads_prefixes() {
    let texts = ["tac", "god"];
    let reversed: Vec<String> = texts.iter().map(|t| t.chars().rev().collect()).collect();
    let mut builder = SuffixTreeBuilder::with_defaults();
    for text in &reversed {
        builder.append_text(text).unwrap();
    }
    let tree = builder.finish().unwrap();

    let network = build_network(&tree, Direction::Reversed).unwrap();
    let mut recognized = network.recognized_texts();
    recognized.sort();
    assert_eq!(recognized, vec!["$god", "$tac"]);
    assert!(network.recognizes("$god"));
    assert!(network.matches_prefix("$ta"));
}
