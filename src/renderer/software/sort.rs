//! Comb sort used to order sprites far-to-near.
//!
//! Sprite counts are small, so the O(n²) worst case does not matter; what
//! matters is that tied distances come out in the same order every frame.

/// What a sort run did; handy for checking termination behaviour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CombStats {
    pub passes: usize,
    pub swaps: usize,
    /// Swaps made by the last pass (always 0 once the sort has finished).
    pub last_pass_swaps: usize,
    pub last_gap: usize,
}

/// Shrink `gap` by 10/13, forcing 9 and 10 to 11 and never dropping below 1.
#[inline]
pub fn next_gap(gap: usize) -> usize {
    match gap * 10 / 13 {
        9 | 10 => 11,
        0 => 1,
        g => g,
    }
}

/// Sort `order` and `key` in lock-step so that `key` is descending.
///
/// Only the common prefix of the two slices is touched.
pub fn comb_sort(order: &mut [usize], key: &mut [f64]) -> CombStats {
    debug_assert_eq!(order.len(), key.len());
    let count = order.len().min(key.len());
    let mut stats = CombStats::default();

    let mut gap = count;
    let mut swapped = false;
    while gap > 1 || swapped {
        gap = next_gap(gap);
        swapped = false;
        let mut pass_swaps = 0;
        for i in 0..count - gap {
            let j = i + gap;
            if key[i] < key[j] {
                key.swap(i, j);
                order.swap(i, j);
                pass_swaps += 1;
                swapped = true;
            }
        }
        stats.passes += 1;
        stats.swaps += pass_swaps;
        stats.last_pass_swaps = pass_swaps;
        stats.last_gap = gap;
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(dist: &[f64]) -> (Vec<usize>, Vec<f64>, CombStats) {
        let mut order: Vec<usize> = (0..dist.len()).collect();
        let mut key = dist.to_vec();
        let stats = comb_sort(&mut order, &mut key);
        (order, key, stats)
    }

    #[test]
    fn orders_descending() {
        let (order, key, stats) = sorted(&[9.0, 1.0, 5.0, 3.0, 7.0]);
        assert_eq!(key, vec![9.0, 7.0, 5.0, 3.0, 1.0]);
        assert_eq!(order, vec![0, 4, 2, 3, 1]);
        assert_eq!(stats.last_gap, 1);
        assert_eq!(stats.last_pass_swaps, 0);
    }

    #[test]
    fn already_sorted_input_is_left_alone() {
        let (order, key, stats) = sorted(&[9.0, 7.0, 5.0, 3.0, 1.0]);
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
        assert_eq!(key, vec![9.0, 7.0, 5.0, 3.0, 1.0]);
        assert_eq!(stats.swaps, 0);
        assert_eq!(stats.last_pass_swaps, 0);
    }

    #[test]
    fn gap_fixup_to_eleven() {
        // 13·10/13 = 10, 12·10/13 = 9, 14·10/13 = 10
        assert_eq!(next_gap(13), 11);
        assert_eq!(next_gap(12), 11);
        assert_eq!(next_gap(14), 11);
        assert_eq!(next_gap(11), 8);
        assert_eq!(next_gap(15), 11);
        assert_eq!(next_gap(16), 12);
        assert_eq!(next_gap(1), 1);
        assert_eq!(next_gap(0), 1);
    }

    #[test]
    fn larger_input_finishes_on_gap_one() {
        let dist: Vec<f64> = (0..40).map(|i| ((i * 17) % 23) as f64).collect();
        let (_, key, stats) = sorted(&dist);
        assert!(key.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(stats.last_gap, 1);
        assert_eq!(stats.last_pass_swaps, 0);
    }

    #[test]
    fn trivial_lengths() {
        let (order, _, stats) = sorted(&[]);
        assert!(order.is_empty());
        assert_eq!(stats.passes, 0);
        let (order, _, _) = sorted(&[4.0]);
        assert_eq!(order, vec![0]);
    }
}
