/// Number of k-subsets of an n-set.
pub const fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = if k > n - k { n - k } else { k };
    let mut result = 1usize;
    let mut i = 0;
    while i < k {
        result = result * (n - i) / (i + 1);
        i += 1;
    }
    result
}

/// Lazy cursor over every k-subset of `0..n`, each as ascending indices, in
/// lexicographic order. Only the current subset is held in memory.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    k: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            k,
            indices: (0..k).collect(),
            started: false,
            done: k > n,
        }
    }

    /// Rewinds to the first subset.
    pub fn reset(&mut self) {
        *self = Self::new(self.n, self.k);
    }

    pub fn total(&self) -> usize {
        binomial(self.n, self.k)
    }

    /// Advances the cursor and exposes the subset without allocating.
    pub fn advance(&mut self) -> Option<&[usize]> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(&self.indices);
        }

        // Rightmost slot that can still move right.
        let mut slot = self.k;
        while slot > 0 {
            slot -= 1;
            if self.indices[slot] < self.n - self.k + slot {
                self.indices[slot] += 1;
                for next in slot + 1..self.k {
                    self.indices[next] = self.indices[next - 1] + 1;
                }
                return Some(&self.indices);
            }
        }

        self.done = true;
        None
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().map(<[usize]>::to_vec)
    }
}

/// Every k-subset of `items`, keeping the input's relative order.
pub fn combinations_of<T: Copy>(items: &[T], k: usize) -> impl Iterator<Item = Vec<T>> + '_ {
    Combinations::new(items.len(), k).map(move |indices| indices.iter().map(|&i| items[i]).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn binomial_matches_known_values() {
        assert_eq!(binomial(13, 3), 286);
        assert_eq!(binomial(10, 5), 252);
        assert_eq!(binomial(5, 0), 1);
        assert_eq!(binomial(5, 5), 1);
        assert_eq!(binomial(3, 4), 0);
        assert_eq!(binomial(52, 13), 635_013_559_600);
    }

    #[test]
    fn yields_every_subset_once_in_order() {
        for n in 0..=8 {
            for k in 0..=n {
                let subsets: Vec<Vec<usize>> = Combinations::new(n, k).collect();
                assert_eq!(subsets.len(), binomial(n, k), "n={n} k={k}");
                let unique: HashSet<_> = subsets.iter().cloned().collect();
                assert_eq!(unique.len(), subsets.len());
                for subset in &subsets {
                    assert_eq!(subset.len(), k);
                    assert!(subset.windows(2).all(|w| w[0] < w[1]));
                    assert!(subset.iter().all(|&i| i < n));
                }
                assert!(subsets.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }

    #[test]
    fn edge_sizes() {
        assert_eq!(Combinations::new(4, 0).collect::<Vec<_>>(), vec![Vec::<usize>::new()]);
        assert_eq!(Combinations::new(3, 3).collect::<Vec<_>>(), vec![vec![0, 1, 2]]);
        assert_eq!(Combinations::new(2, 3).count(), 0);
        assert_eq!(Combinations::new(0, 0).count(), 1);
    }

    #[test]
    fn reset_restarts_the_sequence() {
        let mut combos = Combinations::new(5, 2);
        let first: Vec<_> = combos.by_ref().take(4).collect();
        combos.reset();
        let again: Vec<_> = combos.by_ref().take(4).collect();
        assert_eq!(first, again);
        assert_eq!(combos.total(), 10);
    }

    #[test]
    fn exhausted_cursor_stays_exhausted() {
        let mut combos = Combinations::new(3, 2);
        assert_eq!(combos.by_ref().count(), 3);
        assert!(combos.next().is_none());
        assert!(combos.advance().is_none());
    }

    #[test]
    fn combinations_of_preserves_item_order() {
        let items = ['a', 'b', 'c', 'd'];
        let subsets: Vec<Vec<char>> = combinations_of(&items, 2).collect();
        assert_eq!(subsets.first(), Some(&vec!['a', 'b']));
        assert_eq!(subsets.last(), Some(&vec!['c', 'd']));
        assert_eq!(subsets.len(), 6);
    }
}
