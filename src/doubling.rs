//! Prefix-doubling suffix array construction.
//!
//! The sorter works on a conceptually cyclic string: each pass doubles the
//! sorted substring length by re-bucketing positions with a counting sort
//! keyed on the equivalence class of their first half, reusing the previous
//! pass's order for the second half. `O(n log n)` time, `O(n)` space per
//! pass. Indices are `u32`, so inputs are bounded by `u32::MAX` positions.

/// Sorts the cyclic shifts of `codes` lexicographically and returns the
/// start position of each shift in sorted order.
///
/// `codes` must be dense symbol codes in `[0, sigma)`. Shifts that compare
/// equal (periodic inputs) end up in an unspecified relative order.
pub fn sort_rotations(codes: &[u8], sigma: usize) -> Vec<u32> {
    let n = codes.len();
    if n == 0 {
        return Vec::new();
    }

    let mut order = vec![0u32; n];
    let mut class_num: Vec<u32> = codes.iter().map(|&c| u32::from(c)).collect();
    let mut counts = vec![0usize; sigma.max(n)];

    // Counting sort by single-symbol class.
    for &c in &class_num {
        counts[c as usize] += 1;
    }
    for i in 1..counts.len() {
        counts[i] += counts[i - 1];
    }
    for i in 0..n {
        let c = class_num[i] as usize;
        counts[c] -= 1;
        order[counts[c]] = i as u32;
    }

    let mut step = 1usize;
    while step < n {
        // Invariant: `order` sorts shifts by their first `step` symbols and
        // `class_num` assigns equal classes to equal `step`-prefixes.
        counts.fill(0);
        for &c in &class_num {
            counts[c as usize] += 1;
        }
        for i in 1..counts.len() {
            counts[i] += counts[i - 1];
        }

        // Each shift of length 2*step starting at `first` is the shift at
        // `first + step` prefixed with `step` symbols. Walking the previous
        // order backwards and filling buckets from the back keeps the sort
        // stable on the second half.
        let mut new_order = vec![0u32; n];
        for i in (0..n).rev() {
            let second = order[i] as usize;
            let first = (second + n - step) % n;
            let c = class_num[first] as usize;
            counts[c] -= 1;
            new_order[counts[c]] = first as u32;
        }
        order = new_order;

        // Dense rank renumbering: a new class opens exactly when either
        // half's old class differs from the predecessor's.
        let mut new_class = vec![0u32; n];
        new_class[order[0] as usize] = 0;
        for i in 1..n {
            let prev = order[i - 1] as usize;
            let cur = order[i] as usize;
            let prev_second = (prev + step) % n;
            let cur_second = (cur + step) % n;
            let bump = (class_num[prev] != class_num[cur]
                || class_num[prev_second] != class_num[cur_second]) as u32;
            new_class[cur] = new_class[prev] + bump;
        }
        class_num = new_class;

        step <<= 1;
    }

    order
}

/// Builds the suffix array of `codes`: a permutation of `0..n` ordering the
/// suffixes lexicographically, shorter prefixes first.
///
/// Internally appends a sentinel strictly smaller than every code so that
/// the cyclic sort never wraps a real suffix into a false tie, then drops
/// the sentinel's rank-0 entry.
pub fn suffix_array(codes: &[u8], sigma: usize) -> Vec<u32> {
    if codes.is_empty() {
        return Vec::new();
    }
    debug_assert!(sigma <= 255, "code space must leave room for the sentinel");

    let mut closed = Vec::with_capacity(codes.len() + 1);
    closed.extend(codes.iter().map(|&c| c + 1));
    closed.push(0);

    let order = sort_rotations(&closed, sigma + 1);
    // The sentinel suffix is unique and smallest; it always holds rank 0.
    order[1..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        assert!(sort_rotations(&[], 4).is_empty());
        assert!(suffix_array(&[], 4).is_empty());
    }

    #[test]
    fn single_symbol() {
        assert_eq!(suffix_array(&[0], 1), vec![0]);
    }

    #[test]
    fn repeated_symbol_sorts_by_length() {
        assert_eq!(suffix_array(&[0, 0, 0, 0], 1), vec![3, 2, 1, 0]);
    }

    #[test]
    fn banana_suffix_array() {
        // b a n a n a -> codes over {a, b, n}
        let codes = [1, 0, 2, 0, 2, 0];
        assert_eq!(suffix_array(&codes, 3), vec![5, 3, 1, 0, 4, 2]);
    }

    #[test]
    fn banana_rotation_order() {
        let codes = [1, 0, 2, 0, 2, 0];
        // abanan anaban ananab banana nabana nanaba
        assert_eq!(sort_rotations(&codes, 3), vec![5, 3, 1, 0, 4, 2]);
    }
}
