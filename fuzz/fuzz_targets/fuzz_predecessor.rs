#![no_main]

use libfuzzer_sys::fuzz_target;
use wildtree::PredecessorIndex;

fuzz_target!(|input: (Vec<u64>, Vec<u64>)| {
    let (mut keys, probes) = input;
    keys.sort_unstable();
    keys.dedup();
    let Ok(index) = PredecessorIndex::from_keys(keys.iter().copied()) else {
        assert!(keys.is_empty());
        return;
    };

    for q in probes {
        let pos = keys.partition_point(|&k| k < q);
        let pred = pos.checked_sub(1).map(|i| keys[i]);
        let succ = keys.get(keys.partition_point(|&k| k <= q)).copied();
        assert_eq!(index.predecessor(q).map(|(k, _)| k), pred);
        assert_eq!(index.successor(q).map(|(k, _)| k), succ);
        assert_eq!(index.has_key(q), keys.binary_search(&q).is_ok());
    }
});
