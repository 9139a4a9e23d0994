//! Lane Mask Enumeration
//!
//! Masked operations should be tested with more than the all-true and
//! single-lane masks, but every one of the `2^N` masks is too many for wide
//! tuples. [`all_masks`] walks a fixed, deterministic selection.

/// Largest number of set lanes a partial mask is enumerated with
pub const MAX_SET_LANES: usize = 7;

/// Masks for an `N`-lane tuple
///
/// Yields the all-true mask first, then every mask with exactly one set lane,
/// then every mask with two, and so on up to [`MAX_SET_LANES`]. Partial masks
/// with `k >= 2` set lanes only appear when `k < N`. Within one count, masks
/// come in lexicographic order of their set lane indices.
///
/// ```ignore
/// for mask in all_masks::<4>() {
///     compare!(ctx, select(mask, a, b), reference(mask, a, b));
/// }
/// ```
pub fn all_masks<const N: usize>() -> impl Iterator<Item = [bool; N]> {
    let mut masks = vec![[true; N]];
    for set in 1..=MAX_SET_LANES.min(N) {
        if set > 1 && set >= N {
            break;
        }
        push_combinations(set, &mut masks);
    }
    masks.into_iter()
}

fn push_combinations<const N: usize>(set: usize, out: &mut Vec<[bool; N]>) {
    let mut indexes: Vec<usize> = (0..set).collect();
    loop {
        let mut mask = [false; N];
        for &i in &indexes {
            mask[i] = true;
        }
        out.push(mask);

        // Advance the rightmost index that still has room
        let Some(pos) = (0..set).rev().find(|&p| indexes[p] < N - set + p) else {
            return;
        };
        indexes[pos] += 1;
        for p in pos + 1..set {
            indexes[p] = indexes[p - 1] + 1;
        }
    }
}
