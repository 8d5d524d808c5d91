// crates/folio-economics/src/allocation.rs
//
// Exact-sum percentage allocation (largest-remainder method).
//
// Given one non-negative weight per author, listed in registration order:
//   1. exact[i]  = weight[i] * 100 / total
//   2. floor[i]  = floor(exact[i]), remainder[i] = weight[i] * 100 mod total
//   3. the 100 - sum(floor) leftover points go one each to the largest
//      remainders; equal remainders are broken by list position, so earlier
//      registrants win ties.
// If every weight is zero, all weights are treated as equal. The result
// always sums to exactly 100 for a non-empty input. Integer-only.

/// Compute integer percentages summing to exactly 100.
///
/// `weights` must be in tie-break order. Returns an empty vector for an empty
/// input.
pub fn allocate_percentages(weights: &[u64]) -> Vec<u8> {
    let n = weights.len();
    if n == 0 {
        return Vec::new();
    }

    let all_zero = weights.iter().all(|&w| w == 0);
    let effective: Vec<u128> = weights
        .iter()
        .map(|&w| if all_zero { 1 } else { w as u128 })
        .collect();
    let total: u128 = effective.iter().sum();

    let mut percentages: Vec<u8> = Vec::with_capacity(n);
    let mut remainders: Vec<(u128, usize)> = Vec::with_capacity(n);
    for (i, &w) in effective.iter().enumerate() {
        let scaled = w * 100;
        // floor <= 100 because w <= total
        percentages.push((scaled / total) as u8);
        remainders.push((scaled % total, i));
    }

    let assigned: u32 = percentages.iter().map(|&p| p as u32).sum();
    let leftover = 100u32.saturating_sub(assigned) as usize;

    // Largest remainder first; ties keep registration order.
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    for &(_, i) in remainders.iter().take(leftover) {
        percentages[i] += 1;
    }

    percentages
}

/// Amount owed for `percentage` of `pool`, truncated.
pub fn share_amount(pool: u64, percentage: u8) -> u64 {
    // result <= pool, so the narrowing cannot lose bits
    ((pool as u128) * (percentage as u128) / 100) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum(p: &[u8]) -> u32 {
        p.iter().map(|&x| x as u32).sum()
    }

    #[test]
    fn empty_input() {
        assert!(allocate_percentages(&[]).is_empty());
    }

    #[test]
    fn single_author_gets_everything() {
        assert_eq!(allocate_percentages(&[0]), vec![100]);
        assert_eq!(allocate_percentages(&[7]), vec![100]);
    }

    #[test]
    fn two_zero_scores_split_evenly() {
        assert_eq!(allocate_percentages(&[0, 0]), vec![50, 50]);
    }

    #[test]
    fn three_equal_scores_favor_first_registrant() {
        assert_eq!(allocate_percentages(&[5, 5, 5]), vec![34, 33, 33]);
        assert_eq!(allocate_percentages(&[0, 0, 0]), vec![34, 33, 33]);
    }

    #[test]
    fn largest_remainder_wins_leftover() {
        // exact: 16.6.., 33.3.., 50.0 -> floors 16, 33, 50 -> leftover 1 to index 0
        assert_eq!(allocate_percentages(&[1, 2, 3]), vec![17, 33, 50]);
    }

    #[test]
    fn zero_weight_beside_positive_weights_gets_zero() {
        assert_eq!(allocate_percentages(&[0, 1, 1]), vec![0, 50, 50]);
    }

    #[test]
    fn many_equal_authors_more_than_one_hundred() {
        let p = allocate_percentages(&vec![3u64; 150]);
        assert_eq!(sum(&p), 100);
        assert!(p[..100].iter().all(|&x| x == 1));
        assert!(p[100..].iter().all(|&x| x == 0));
    }

    #[test]
    fn always_sums_to_one_hundred() {
        let cases: Vec<Vec<u64>> = vec![
            vec![333_333, 333_333, 333_334],
            vec![1, 1_000_000],
            vec![u64::MAX, u64::MAX, 1],
            vec![17, 0, 4, 99, 1, 1, 1],
            (1..=37).collect(),
        ];
        for weights in cases {
            let p = allocate_percentages(&weights);
            assert_eq!(sum(&p), 100, "weights {:?}", weights);
        }
    }

    #[test]
    fn share_amount_truncates() {
        assert_eq!(share_amount(10, 33), 3);
        assert_eq!(share_amount(0, 50), 0);
        assert_eq!(share_amount(u64::MAX, 100), u64::MAX);
        assert_eq!(share_amount(1_000, 0), 0);
    }
}
