//! Lexicographic permutations of `0..n`.

/// Iterator over every permutation of `0..size` in lexicographic order.
///
/// The first item is the identity `[0, 1, .., size - 1]` and the last is its
/// reverse. A size of zero yields a single empty permutation.
///
/// # Examples
/// ```
/// use dispatch_solver_exhaustive::Permutations;
///
/// let all: Vec<Vec<usize>> = Permutations::new(3).collect();
/// assert_eq!(
///     all,
///     vec![
///         vec![0, 1, 2],
///         vec![0, 2, 1],
///         vec![1, 0, 2],
///         vec![1, 2, 0],
///         vec![2, 0, 1],
///         vec![2, 1, 0],
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Permutations {
    indices: Vec<usize>,
    started: bool,
    exhausted: bool,
}

impl Permutations {
    /// Start enumerating permutations of `0..size`.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            indices: (0..size).collect(),
            started: false,
            exhausted: false,
        }
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        if self.started {
            if !advance(&mut self.indices) {
                self.exhausted = true;
                return None;
            }
        } else {
            self.started = true;
        }
        Some(self.indices.clone())
    }
}

/// Rearrange `indices` into the next permutation in lexicographic order.
///
/// Returns `false`, leaving `indices` untouched, once the last permutation has
/// been reached.
fn advance(indices: &mut [usize]) -> bool {
    let Some(pivot) = indices
        .windows(2)
        .rposition(|pair| matches!(pair, [left, right] if left < right))
    else {
        return false;
    };
    let Some(pivot_value) = indices.get(pivot).copied() else {
        return false;
    };
    // The suffix after the pivot is descending, so the rightmost larger value
    // is the smallest one that still exceeds the pivot.
    let Some(successor) = indices.iter().rposition(|&value| value > pivot_value) else {
        return false;
    };
    indices.swap(pivot, successor);
    if let Some(suffix) = indices.get_mut(pivot + 1..) {
        suffix.reverse();
    }
    true
}
