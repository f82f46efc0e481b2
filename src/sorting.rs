//! Comparison sorts.
//!
//! Heapsort, randomized quicksort, and mergesort under one contract: sort a
//! slice in place into ascending order, either by the elements' own `Ord`
//! or by a key-extraction function (`_by_key` variants). The output is
//! always a permutation of the input, non-decreasing under the key.
//!
//! Stability: **mergesort is stable** (equal keys keep their input order);
//! heapsort and quicksort are not and callers must not rely on the
//! relative order of equal keys there.
//!
//! # References
//!
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 2.3, 6.4, 7.3
//! - Sedgewick & Wayne (2011), "Algorithms", Ch. 2

use std::cmp::Ordering;

use rand::Rng;

/// In-place heapsort. O(n log n) worst case, O(1) auxiliary. Not stable.
pub fn heapsort<T: Ord>(items: &mut [T]) {
    heapsort_impl(items, &|a, b| a.cmp(b));
}

/// Heapsort into ascending order of `key(item)`.
pub fn heapsort_by_key<T, K: Ord>(items: &mut [T], key: impl Fn(&T) -> K) {
    heapsort_impl(items, &|a, b| key(a).cmp(&key(b)));
}

/// In-place quicksort with uniformly random pivots. Expected O(n log n).
/// Not stable.
pub fn randomized_quicksort<T: Ord>(items: &mut [T]) {
    let mut rng = rand::rng();
    quicksort_impl(items, &mut rng, &|a, b| a.cmp(b));
}

/// Randomized quicksort into ascending order of `key(item)`.
pub fn randomized_quicksort_by_key<T, K: Ord>(items: &mut [T], key: impl Fn(&T) -> K) {
    let mut rng = rand::rng();
    quicksort_impl(items, &mut rng, &|a, b| key(a).cmp(&key(b)));
}

/// Mergesort. O(n log n), O(n) auxiliary. **Stable**.
pub fn mergesort<T: Ord + Clone>(items: &mut [T]) {
    mergesort_impl(items, &|a, b| a.cmp(b));
}

/// Mergesort into ascending order of `key(item)`. **Stable**.
pub fn mergesort_by_key<T: Clone, K: Ord>(items: &mut [T], key: impl Fn(&T) -> K) {
    mergesort_impl(items, &|a, b| key(a).cmp(&key(b)));
}

fn heapsort_impl<T>(items: &mut [T], cmp: &impl Fn(&T, &T) -> Ordering) {
    let n = items.len();
    build_heap(items, cmp);
    for end in (1..n).rev() {
        items.swap(0, end);
        sift_down(items, 0, end, cmp);
    }
}

/// Bottom-up max-heap construction in O(n): sift down from the last parent.
fn build_heap<T>(items: &mut [T], cmp: &impl Fn(&T, &T) -> Ordering) {
    let n = items.len();
    for root in (0..n / 2).rev() {
        sift_down(items, root, n, cmp);
    }
}

/// Restores the max-heap property of `items[..end]` below `root`.
fn sift_down<T>(items: &mut [T], mut root: usize, end: usize, cmp: &impl Fn(&T, &T) -> Ordering) {
    loop {
        let left = 2 * root + 1;
        let right = left + 1;
        let mut largest = root;
        if left < end && cmp(&items[left], &items[largest]) == Ordering::Greater {
            largest = left;
        }
        if right < end && cmp(&items[right], &items[largest]) == Ordering::Greater {
            largest = right;
        }
        if largest == root {
            return;
        }
        items.swap(root, largest);
        root = largest;
    }
}

fn quicksort_impl<T, R: Rng>(items: &mut [T], rng: &mut R, cmp: &impl Fn(&T, &T) -> Ordering) {
    let n = items.len();
    if n <= 1 {
        return;
    }
    // Lomuto partition around a uniformly random pivot moved to the tail.
    let pivot = rng.random_range(0..n);
    items.swap(pivot, n - 1);
    let mut store = 0;
    for i in 0..n - 1 {
        if cmp(&items[i], &items[n - 1]) != Ordering::Greater {
            items.swap(store, i);
            store += 1;
        }
    }
    items.swap(store, n - 1);

    let (left, rest) = items.split_at_mut(store);
    quicksort_impl(left, rng, cmp);
    quicksort_impl(&mut rest[1..], rng, cmp);
}

fn mergesort_impl<T: Clone>(items: &mut [T], cmp: &impl Fn(&T, &T) -> Ordering) {
    let n = items.len();
    if n <= 1 {
        return;
    }
    let mid = n / 2;
    mergesort_impl(&mut items[..mid], cmp);
    mergesort_impl(&mut items[mid..], cmp);

    let mut merged = Vec::with_capacity(n);
    {
        let (left, right) = items.split_at(mid);
        let (mut i, mut j) = (0, 0);
        while i < left.len() && j < right.len() {
            // Left wins ties: this is what makes the sort stable.
            if cmp(&left[i], &right[j]) != Ordering::Greater {
                merged.push(left[i].clone());
                i += 1;
            } else {
                merged.push(right[j].clone());
                j += 1;
            }
        }
        merged.extend_from_slice(&left[i..]);
        merged.extend_from_slice(&right[j..]);
    }
    items.clone_from_slice(&merged);
}
