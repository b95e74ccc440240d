//! Binary search over slices kept sorted by a string key.

/// Result of [`sorted_lookup`].
///
/// When `found` is true, `index` points at an item with the target key.
/// Otherwise `index` is where an item with that key would be inserted to
/// keep the slice sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookup {
    pub found: bool,
    pub index: usize,
}

/// Look up `target` in `items`, which must already be sorted by `key`
/// using lexicographic string order.
///
/// Keys are expected to be unique. With duplicates, any matching index may be
/// returned.
pub fn sorted_lookup<T, F>(items: &[T], key: F, target: &str) -> Lookup
where
    F: Fn(&T) -> &str,
{
    match items.binary_search_by(|item| key(item).cmp(target)) {
        Ok(index) => Lookup { found: true, index },
        Err(index) => Lookup {
            found: false,
            index,
        },
    }
}

/// Insert `item` at its sorted position and return that position.
///
/// If an item with the same key exists, the new item is placed next to it.
pub fn insert_sorted<T, F>(items: &mut Vec<T>, item: T, key: F) -> usize
where
    F: Fn(&T) -> &str,
{
    let lookup = sorted_lookup(items.as_slice(), &key, key(&item));
    items.insert(lookup.index, item);
    lookup.index
}
