#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use wildtree::query::scan_offsets;
use wildtree::{IndexConfig, Pattern, Symbol, WildcardIndex};

#[derive(Arbitrary, Debug)]
struct Input {
    text: Vec<u8>,
    pattern: Vec<u8>,
    budget: u8,
}

// Small alphabets keep the tree branchy and the matches frequent
fn symbol(b: u8) -> char {
    (b'a' + b % 3) as char
}

fuzz_target!(|input: Input| {
    if input.text.len() > 64 || input.pattern.is_empty() || input.pattern.len() > 8 {
        return;
    }
    let text: String = input.text.iter().map(|&b| symbol(b)).collect();
    let budget = u32::from(input.budget % 3);
    let Ok(index) = WildcardIndex::from_text(&text, IndexConfig::with_budget(budget)) else {
        return;
    };

    // Every fourth byte is a wildcard
    let symbols: Vec<Symbol> = input
        .pattern
        .iter()
        .map(|&b| if b % 4 == 0 { Symbol::Wildcard } else { Symbol::Char(symbol(b)) })
        .collect();
    let Ok(pattern) = Pattern::from_symbols(symbols) else {
        return;
    };

    let expected = scan_offsets(index.tree().text().symbols(), pattern.symbols());
    match index.query(&pattern) {
        Ok(found) => {
            assert_eq!(found, expected, "text {:?} pattern {}", text, pattern);
            assert_eq!(index.slow_query(&pattern).unwrap(), expected);
        }
        Err(_) => assert!(pattern.wildcard_count() > budget as usize),
    }
    assert_eq!(index.naive_query(&pattern).unwrap(), expected);
});
