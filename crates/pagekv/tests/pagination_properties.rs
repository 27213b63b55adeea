//! Property-based tests for prefix pagination.

#![allow(clippy::expect_used)]

use std::collections::BTreeMap;

use proptest::prelude::*;

use pagekv::Store;

/// Keys over a tiny alphabet so prefixes overlap often.
fn arb_key() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(vec![0x00u8, b'a', b'b', 0xff]), 0..5)
}

fn arb_contents() -> impl Strategy<Value = BTreeMap<Vec<u8>, Vec<u8>>> {
    prop::collection::btree_map(arb_key(), prop::collection::vec(any::<u8>(), 0..8), 0..60)
}

fn load(contents: &BTreeMap<Vec<u8>, Vec<u8>>, fetch_limit: usize) -> Store {
    let store = Store::in_memory()
        .expect("failed to create store")
        .with_scan_fetch_limit(fetch_limit)
        .expect("valid limit");
    let mut batch = store.new_batch();
    for (key, value) in contents {
        batch.put(key, value);
    }
    batch.write().expect("failed to write batch");
    store
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Walking every page returns each matching key once, in order.
    #[test]
    fn prop_pages_cover_range_exactly(
        contents in arb_contents(),
        prefix in arb_key().prop_map(|mut k| { k.truncate(2); k }),
        page_size in 1usize..8,
        fetch_limit in 1usize..6,
    ) {
        let store = load(&contents, fetch_limit);
        let expected: Vec<Vec<u8>> =
            contents.keys().filter(|k| k.starts_with(&prefix)).cloned().collect();

        let mut seen = Vec::new();
        let mut token: Option<Vec<u8>> = None;
        loop {
            let page = store.fetch_keys(&prefix, token.as_deref(), page_size).expect("scan failed");
            prop_assert!(page.len() <= page_size);

            match page.next_token {
                Some(next) => {
                    // A page with a token is always full.
                    prop_assert_eq!(page.items.len(), page_size);
                    prop_assert!(next.starts_with(&prefix));
                    if let Some(last) = page.items.last() {
                        prop_assert!(last < &next);
                    }
                    seen.extend(page.items);
                    token = Some(next);
                }
                None => {
                    seen.extend(page.items);
                    break;
                }
            }
            prop_assert!(seen.len() <= expected.len());
        }

        prop_assert_eq!(seen, expected);
    }

    /// Values come back aligned with the keys of the same page.
    #[test]
    fn prop_values_align_with_keys(
        contents in arb_contents(),
        prefix in arb_key().prop_map(|mut k| { k.truncate(1); k }),
        page_size in 1usize..8,
    ) {
        let store = load(&contents, 1000);

        let keys = store.fetch_keys(&prefix, None, page_size).expect("scan failed");
        let values = store.fetch_values(&prefix, None, page_size).expect("scan failed");
        prop_assert_eq!(&keys.next_token, &values.next_token);

        let expected: Vec<Vec<u8>> = keys.items.iter().map(|k| contents[k].clone()).collect();
        prop_assert_eq!(values.items, expected);
    }

    /// Point reads agree with the last write for every key.
    #[test]
    fn prop_get_matches_model(contents in arb_contents(), probe in arb_key()) {
        let store = load(&contents, 1000);

        match contents.get(&probe) {
            Some(value) => prop_assert_eq!(&store.get(&probe).expect("failed to get"), value),
            None => prop_assert!(store.get(&probe).unwrap_err().is_not_found()),
        }
    }
}
