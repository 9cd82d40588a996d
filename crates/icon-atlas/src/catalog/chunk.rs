//! Fixed-size slicing of icon lists.

/// Split `items` into consecutive chunks of `size`, preserving order.
///
/// The last chunk may be shorter. An empty list yields no chunks. A `size` of
/// zero disables chunking: the whole list becomes a single chunk.
///
/// ```
/// use icon_atlas::catalog::chunk;
///
/// let names: Vec<String> = (1..=85).map(|i| format!("i{i}")).collect();
/// let chunks = chunk(&names, 80);
/// assert_eq!(chunks.iter().map(Vec::len).collect::<Vec<_>>(), vec![80, 5]);
///
/// assert!(chunk::<String>(&[], 80).is_empty());
/// ```
pub fn chunk<T: Clone>(items: &[T], size: usize) -> Vec<Vec<T>> {
    if items.is_empty() {
        return Vec::new();
    }
    if size == 0 {
        return vec![items.to_vec()];
    }
    items.chunks(size).map(<[T]>::to_vec).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_multiple() {
        let items: Vec<u32> = (0..160).collect();
        let chunks = chunk(&items, 80);
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.len() == 80));
    }

    #[test]
    fn test_order_preserved() {
        let chunks = chunk(&["a", "b", "c", "d", "e"], 2);
        assert_eq!(chunks, vec![vec!["a", "b"], vec!["c", "d"], vec!["e"]]);
    }

    #[test]
    fn test_shorter_than_size() {
        assert_eq!(chunk(&[1, 2, 3], 80), vec![vec![1, 2, 3]]);
    }

    #[test]
    fn test_zero_size_single_chunk() {
        assert_eq!(chunk(&[1, 2, 3], 0), vec![vec![1, 2, 3]]);
        assert!(chunk::<u8>(&[], 0).is_empty());
    }
}
