//! Comparison sorts over slices.
//!
//! Every sort comes in two flavours: one for `T: Ord`, and a `_by` variant taking
//! a comparator, like [`slice::sort_by`]. All of them sort in place.
//!
//! | sort        | time              | stable | notes                          |
//! |-------------|-------------------|--------|--------------------------------|
//! | [`selection`] | `O(N^2)`        | no     | `N - 1` exchanges at most      |
//! | [`insertion`] | `O(N^2)`        | yes    | linear for nearly sorted input |
//! | [`shell`]     | about `O(N^1.5)`| no     | `3x + 1` gaps                  |
//! | [`merge`]     | `O(N log N)`    | yes    | `O(N)` extra memory, needs `Clone` |
//! | [`quick`]     | `O(N log N)` expected | no | shuffles first, 3-way partitioning |
//! | [`heap`]      | `O(N log N)`    | no     | no extra memory                |

use std::cmp::Ordering;

use rand::seq::SliceRandom;
use rand::Rng;

pub fn is_sorted<T: Ord>(a: &[T]) -> bool {
    is_sorted_by(a, T::cmp)
}

pub fn is_sorted_by<T, F: FnMut(&T, &T) -> Ordering>(a: &[T], mut compare: F) -> bool {
    a.windows(2)
        .all(|pair| compare(&pair[0], &pair[1]) != Ordering::Greater)
}

pub fn selection<T: Ord>(a: &mut [T]) {
    selection_by(a, T::cmp)
}

pub fn selection_by<T, F: FnMut(&T, &T) -> Ordering>(a: &mut [T], mut compare: F) {
    for i in 0..a.len() {
        let mut min = i;
        for j in i + 1..a.len() {
            if compare(&a[j], &a[min]) == Ordering::Less {
                min = j;
            }
        }
        a.swap(i, min);
    }
}

pub fn insertion<T: Ord>(a: &mut [T]) {
    insertion_by(a, T::cmp)
}

pub fn insertion_by<T, F: FnMut(&T, &T) -> Ordering>(a: &mut [T], mut compare: F) {
    for i in 1..a.len() {
        let mut j = i;
        while j > 0 && compare(&a[j], &a[j - 1]) == Ordering::Less {
            a.swap(j, j - 1);
            j -= 1;
        }
    }
}

pub fn shell<T: Ord>(a: &mut [T]) {
    shell_by(a, T::cmp)
}

pub fn shell_by<T, F: FnMut(&T, &T) -> Ordering>(a: &mut [T], mut compare: F) {
    let n = a.len();
    let mut gap = 1;
    while gap < n / 3 {
        gap = 3 * gap + 1;
    }
    while gap >= 1 {
        // insertion sort with stride `gap`
        for i in gap..n {
            let mut j = i;
            while j >= gap && compare(&a[j], &a[j - gap]) == Ordering::Less {
                a.swap(j, j - gap);
                j -= gap;
            }
        }
        gap /= 3;
    }
}

pub fn merge<T: Ord + Clone>(a: &mut [T]) {
    merge_by(a, T::cmp)
}

/// Top-down merge sort. Equal elements keep their relative order.
pub fn merge_by<T: Clone, F: FnMut(&T, &T) -> Ordering>(a: &mut [T], mut compare: F) {
    let mut aux = a.to_vec();
    merge_sort_range(a, &mut aux, 0, a.len(), &mut compare);
}

fn merge_sort_range<T: Clone, F: FnMut(&T, &T) -> Ordering>(
    a: &mut [T],
    aux: &mut [T],
    lo: usize,
    hi: usize,
    compare: &mut F,
) {
    if hi - lo <= 1 {
        return;
    }
    let mid = lo + (hi - lo) / 2;
    merge_sort_range(a, aux, lo, mid, compare);
    merge_sort_range(a, aux, mid, hi, compare);
    // already in order
    if compare(&a[mid - 1], &a[mid]) != Ordering::Greater {
        return;
    }

    aux[lo..hi].clone_from_slice(&a[lo..hi]);
    let (mut i, mut j) = (lo, mid);
    for slot in a[lo..hi].iter_mut() {
        // take from the left half on ties, for stability
        let take_right = i >= mid || (j < hi && compare(&aux[j], &aux[i]) == Ordering::Less);
        if take_right {
            *slot = aux[j].clone();
            j += 1;
        } else {
            *slot = aux[i].clone();
            i += 1;
        }
    }
}

pub fn quick<T: Ord, R: Rng + ?Sized>(a: &mut [T], rng: &mut R) {
    quick_by(a, rng, T::cmp)
}

/// Quicksort with 3-way partitioning. The slice is shuffled with `rng` first,
/// so that no input is consistently bad.
pub fn quick_by<T, R, F>(a: &mut [T], rng: &mut R, mut compare: F)
where
    R: Rng + ?Sized,
    F: FnMut(&T, &T) -> Ordering,
{
    a.shuffle(rng);
    quick_sort_range(a, &mut compare);
}

fn quick_sort_range<T, F: FnMut(&T, &T) -> Ordering>(a: &mut [T], compare: &mut F) {
    if a.len() <= 1 {
        return;
    }
    // `a[..lt]` is less than the pivot, `a[lt..i]` equal to it, `a[gt + 1..]` greater.
    // The pivot is `a[0]` initially, and a copy of it always stays at `a[lt]`.
    let (mut lt, mut i, mut gt) = (0, 1, a.len() - 1);
    while i <= gt {
        match compare(&a[i], &a[lt]) {
            Ordering::Less => {
                a.swap(lt, i);
                lt += 1;
                i += 1;
            }
            Ordering::Greater => {
                a.swap(i, gt);
                gt -= 1;
            }
            Ordering::Equal => i += 1,
        }
    }
    let (left, rest) = a.split_at_mut(lt);
    quick_sort_range(left, compare);
    quick_sort_range(&mut rest[gt + 1 - lt..], compare);
}

pub fn heap<T: Ord>(a: &mut [T]) {
    heap_by(a, T::cmp)
}

/// Builds a max-heap in the slice bottom-up, then repeatedly moves the top to the end.
pub fn heap_by<T, F: FnMut(&T, &T) -> Ordering>(a: &mut [T], mut compare: F) {
    let n = a.len();
    for i in (0..n / 2).rev() {
        sink(a, i, n, &mut compare);
    }
    for end in (1..n).rev() {
        a.swap(0, end);
        sink(a, 0, end, &mut compare);
    }
}

fn sink<T, F: FnMut(&T, &T) -> Ordering>(a: &mut [T], mut i: usize, len: usize, compare: &mut F) {
    loop {
        let mut child = 2 * i + 1;
        if child >= len {
            break;
        }
        if child + 1 < len && compare(&a[child + 1], &a[child]) == Ordering::Greater {
            child += 1;
        }
        if compare(&a[child], &a[i]) != Ordering::Greater {
            break;
        }
        a.swap(i, child);
        i = child;
    }
}
