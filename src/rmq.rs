/// Static range-minimum structure over a fixed array.
///
/// Leaves are padded to the next power of two so the tree is complete and
/// lives in a flat heap layout: node `v` has children `2v + 1` and `2v + 2`,
/// padding leaves hold `u32::MAX`. Build once in `O(n)`, query in
/// `O(log n)`; there are no updates.
#[derive(Clone, Debug)]
pub struct IntervalMin {
    len: usize,
    leaves: usize,
    mins: Vec<u32>,
}

impl IntervalMin {
    pub fn new(values: &[u32]) -> Self {
        let len = values.len();
        let leaves = len.next_power_of_two().max(1);
        let mut mins = vec![u32::MAX; 2 * leaves - 1];
        mins[leaves - 1..leaves - 1 + len].copy_from_slice(values);
        for v in (0..leaves - 1).rev() {
            mins[v] = mins[2 * v + 1].min(mins[2 * v + 2]);
        }
        IntervalMin { len, leaves, mins }
    }

    /// Number of underlying values.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Minimum of `values[left..=right]`. Both bounds must be in range.
    pub fn min(&self, left: usize, right: usize) -> u32 {
        debug_assert!(left <= right && right < self.len);
        self.min_recursive(left, right, 0, 0, self.leaves - 1)
    }

    fn min_recursive(
        &self,
        left: usize,
        right: usize,
        node: usize,
        node_left: usize,
        node_right: usize,
    ) -> u32 {
        if left > node_right || right < node_left {
            return u32::MAX;
        }
        if left <= node_left && node_right <= right {
            return self.mins[node];
        }
        let middle = (node_left + node_right) / 2;
        self.min_recursive(left, right, 2 * node + 1, node_left, middle)
            .min(self.min_recursive(left, right, 2 * node + 2, middle + 1, node_right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_element() {
        let tree = IntervalMin::new(&[7]);
        assert_eq!(tree.min(0, 0), 7);
    }

    #[test]
    fn all_ranges_match_scan() {
        let values = [5u32, 3, 8, 1, 9, 1, 4];
        let tree = IntervalMin::new(&values);
        for l in 0..values.len() {
            for r in l..values.len() {
                let naive = *values[l..=r].iter().min().unwrap();
                assert_eq!(tree.min(l, r), naive, "range [{l}, {r}]");
            }
        }
    }

    #[test]
    fn padding_does_not_leak() {
        // Length 5 pads to 8 leaves of u32::MAX.
        let values = [9u32, 8, 7, 6, 5];
        let tree = IntervalMin::new(&values);
        assert_eq!(tree.min(0, 4), 5);
        assert_eq!(tree.min(4, 4), 5);
        assert_eq!(tree.min(0, 3), 6);
    }

    #[test]
    fn power_of_two_length() {
        let values = [2u32, 4, 1, 3];
        let tree = IntervalMin::new(&values);
        assert_eq!(tree.min(0, 3), 1);
        assert_eq!(tree.min(0, 1), 2);
        assert_eq!(tree.min(3, 3), 3);
    }
}
