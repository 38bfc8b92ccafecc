//! Determinism utilities: explicit stable sorting & float ordering.
//!
//! Every "sort descending then take index 0" in the engines resolves exact
//! ties by the caller's candidate order. `slice::sort_by` is documented stable
//! and is used for total orders. Comparators that are not guaranteed to be a
//! total order (the pairwise tie-break waterfall) go through
//! [`merge_sort_by`], which is stable and well-defined for any comparator.

use core::cmp::Ordering;

/* -------------------------------------------------------------------------- */
/*                               Float ordering                               */
/* -------------------------------------------------------------------------- */

/// Descending comparison of two floats (larger first), total over NaN.
#[inline]
pub fn cmp_f64_desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/* -------------------------------------------------------------------------- */
/*                            Canonical sort helpers                           */
/* -------------------------------------------------------------------------- */

/// Indices `0..values.len()` ordered by descending value; ties keep index order.
pub fn indices_by_desc_u64(values: &[u64]) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..values.len()).collect();
    idx.sort_by(|&a, &b| values[b].cmp(&values[a]));
    idx
}

/// Indices `0..values.len()` ordered by descending value; ties keep index order.
pub fn indices_by_desc_f64(values: &[f64]) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..values.len()).collect();
    idx.sort_by(|&a, &b| cmp_f64_desc(values[a], values[b]));
    idx
}

/// First index holding the maximum (first found on ties), `None` on empty input.
pub fn first_max_by<T, F>(items: &[T], mut cmp: F) -> Option<usize>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut best: Option<usize> = None;
    for (i, it) in items.iter().enumerate() {
        match best {
            None => best = Some(i),
            Some(b) if cmp(it, &items[b]) == Ordering::Greater => best = Some(i),
            _ => {}
        }
    }
    best
}

/// First index holding the minimum (first found on ties), `None` on empty input.
pub fn first_min_by<T, F>(items: &[T], mut cmp: F) -> Option<usize>
where
    F: FnMut(&T, &T) -> Ordering,
{
    first_max_by(items, |a, b| cmp(b, a))
}

/* -------------------------------------------------------------------------- */
/*                               Stable merge sort                             */
/* -------------------------------------------------------------------------- */

/// Stable top-down merge sort.
///
/// Equal elements keep their relative order. Never panics for comparators
/// that violate transitivity; the output is then still a permutation of the
/// input, fixed for a given input order.
pub fn merge_sort_by<T, F>(items: &mut Vec<T>, mut cmp: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return;
    }
    let n = items.len();
    let mut buf = items.clone();
    sort_range(items.as_mut_slice(), &mut buf, 0, n, &mut cmp);
}

fn sort_range<T, F>(xs: &mut [T], buf: &mut [T], lo: usize, hi: usize, cmp: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    if hi - lo <= 1 {
        return;
    }
    let mid = lo + (hi - lo) / 2;
    sort_range(xs, buf, lo, mid, cmp);
    sort_range(xs, buf, mid, hi, cmp);

    let (mut i, mut j, mut k) = (lo, mid, lo);
    while i < mid && j < hi {
        // Take from the right run only when strictly smaller: keeps stability.
        if cmp(&xs[j], &xs[i]) == Ordering::Less {
            buf[k] = xs[j].clone();
            j += 1;
        } else {
            buf[k] = xs[i].clone();
            i += 1;
        }
        k += 1;
    }
    while i < mid {
        buf[k] = xs[i].clone();
        i += 1;
        k += 1;
    }
    while j < hi {
        buf[k] = xs[j].clone();
        j += 1;
        k += 1;
    }
    xs[lo..hi].clone_from_slice(&buf[lo..hi]);
}

/* ---------------------------------- Tests --------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn desc_indices_keep_insertion_order_on_ties() {
        assert_eq!(indices_by_desc_u64(&[1, 3, 3, 0]), vec![1, 2, 0, 3]);
        assert_eq!(indices_by_desc_f64(&[0.5, 0.5, 2.0]), vec![2, 0, 1]);
    }

    #[test]
    fn first_found_extremes() {
        assert_eq!(first_max_by(&[2, 5, 5], |a, b| a.cmp(b)), Some(1));
        assert_eq!(first_min_by(&[2, 1, 1], |a, b| a.cmp(b)), Some(1));
        assert_eq!(first_max_by::<u8, _>(&[], |a, b| a.cmp(b)), None);
    }

    #[test]
    fn merge_sort_is_stable() {
        let mut v = vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')];
        merge_sort_by(&mut v, |a, b| a.0.cmp(&b.0));
        assert_eq!(v, vec![(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c')]);
    }

    #[test]
    fn merge_sort_survives_cyclic_comparator() {
        // rock < paper < scissors < rock
        let beats = |a: &u8, b: &u8| -> Ordering {
            match (a, b) {
                (x, y) if x == y => Ordering::Equal,
                (0, 1) | (1, 2) | (2, 0) => Ordering::Less,
                _ => Ordering::Greater,
            }
        };
        let mut v = vec![0u8, 1, 2];
        merge_sort_by(&mut v, beats);
        let mut sorted = v.clone();
        sorted.sort();
        assert_eq!(sorted, vec![0, 1, 2]);
    }

    proptest! {
        #[test]
        fn merge_sort_matches_std_stable_sort(xs in proptest::collection::vec((0u8..4, any::<u16>()), 0..40)) {
            let mut a = xs.clone();
            let mut b = xs;
            merge_sort_by(&mut a, |x, y| x.0.cmp(&y.0));
            b.sort_by(|x, y| x.0.cmp(&y.0));
            prop_assert_eq!(a, b);
        }
    }
}
