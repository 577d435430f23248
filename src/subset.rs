//! Bitmask subsets of non-start cities and their enumeration.
//!
//! City 0 is the fixed tour start and is never a member. A [`Subset`] is a
//! `u32` mask whose bit `i` marks city `i`, so instances are limited to
//! [`MAX_CITIES`] cities.
//!
//! [`KSubsets`] yields every subset of a given size in increasing mask
//! order (Gosper's hack), which is exactly colexicographic order. The
//! position of a subset in that sequence is its colex rank, computed
//! directly by [`SubsetRanker`]; the DP table uses the rank as a dense row
//! index.

use std::fmt;

/// Largest supported instance: bits 1..=31 of a `u32`.
pub const MAX_CITIES: usize = u32::BITS as usize;

/// A set of city indices drawn from `{1, …, n-1}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Subset(u32);

impl Subset {
    pub const EMPTY: Subset = Subset(0);

    /// All non-start cities of an `n`-city instance: `{1, …, n-1}`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_heldkarp::subset::Subset;
    ///
    /// let full = Subset::full(4);
    /// assert_eq!(full.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    /// assert!(Subset::full(1).is_empty());
    /// ```
    pub fn full(n: usize) -> Self {
        debug_assert!(n <= MAX_CITIES);
        if n <= 1 {
            return Self::EMPTY;
        }
        Subset((((1u64 << (n - 1)) - 1) << 1) as u32)
    }

    /// Wraps a raw mask. Bit 0 (the start city) is cleared.
    pub fn from_bits(bits: u32) -> Self {
        Subset(bits & !1)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn contains(self, city: usize) -> bool {
        city < MAX_CITIES && self.0 & (1 << city) != 0
    }

    /// Returns a copy with `city` added.
    #[inline]
    pub fn with(self, city: usize) -> Self {
        debug_assert!(city >= 1 && city < MAX_CITIES);
        Subset(self.0 | (1 << city))
    }

    /// Returns a copy with `city` removed.
    #[inline]
    pub fn without(self, city: usize) -> Self {
        Subset(self.0 & !(1 << city))
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in ascending order.
    pub fn iter(self) -> Members {
        Members(self.0)
    }
}

impl FromIterator<usize> for Subset {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        iter.into_iter().fold(Subset::EMPTY, Subset::with)
    }
}

impl fmt::Display for Subset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, city) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{city}")?;
        }
        write!(f, "}}")
    }
}

/// Ascending iterator over the members of a [`Subset`].
#[derive(Debug, Clone)]
pub struct Members(u32);

impl Iterator for Members {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let city = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(city)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Members {}

/// Lazily enumerates every size-`k` subset of `{1, …, n-1}`.
///
/// Subsets come out in increasing mask order without repeats. `k = 0`
/// yields the empty subset once; `k > n-1` yields nothing.
///
/// # Examples
///
/// ```
/// use u_heldkarp::subset::KSubsets;
///
/// let pairs: Vec<String> = KSubsets::new(4, 2).map(|s| s.to_string()).collect();
/// assert_eq!(pairs, vec!["{1, 2}", "{1, 3}", "{2, 3}"]);
/// ```
#[derive(Debug, Clone)]
pub struct KSubsets {
    /// Next combination over positions `0..n-1` (city = position + 1).
    next: Option<u64>,
    limit: u64,
}

impl KSubsets {
    pub fn new(n: usize, k: usize) -> Self {
        debug_assert!(n <= MAX_CITIES);
        let positions = n.saturating_sub(1);
        let next = if k > positions {
            None
        } else {
            Some((1u64 << k) - 1)
        };
        Self {
            next,
            limit: 1u64 << positions,
        }
    }
}

impl Iterator for KSubsets {
    type Item = Subset;

    fn next(&mut self) -> Option<Subset> {
        let c = self.next?;
        self.next = if c == 0 {
            None
        } else {
            // Gosper's hack: next larger integer with the same popcount.
            let lowest = c & c.wrapping_neg();
            let ripple = c + lowest;
            let successor = ripple | (((c ^ ripple) >> 2) / lowest);
            (successor < self.limit).then_some(successor)
        };
        Some(Subset((c << 1) as u32))
    }
}

/// Colex ranking of subsets within their size class.
///
/// For an `n`-city instance, `rank` maps every size-`k` subset of
/// `{1, …, n-1}` onto `0..count(k)` and agrees with the position of that
/// subset in [`KSubsets::new(n, k)`](KSubsets).
#[derive(Debug, Clone)]
pub struct SubsetRanker {
    positions: usize,
    /// `binomial[p][r] = C(p, r)` for `p, r <= positions`.
    binomial: Vec<Vec<usize>>,
}

impl SubsetRanker {
    pub fn new(n: usize) -> Self {
        let positions = n.saturating_sub(1);
        let mut binomial = vec![vec![0usize; positions + 2]; positions + 1];
        for p in 0..=positions {
            binomial[p][0] = 1;
            for r in 1..=p {
                binomial[p][r] = binomial[p - 1][r - 1] + binomial[p - 1][r];
            }
        }
        Self {
            positions,
            binomial,
        }
    }

    /// `C(p, r)`, zero when `r > p`.
    #[inline]
    pub fn binomial(&self, p: usize, r: usize) -> usize {
        if r > p {
            0
        } else {
            self.binomial[p][r]
        }
    }

    /// Number of subsets of size `k`, i.e. `C(n-1, k)`.
    pub fn count(&self, k: usize) -> usize {
        self.binomial(self.positions, k)
    }

    /// Dense index of `subset` among subsets of the same size.
    #[inline]
    pub fn rank(&self, subset: Subset) -> usize {
        subset
            .iter()
            .enumerate()
            .map(|(i, city)| self.binomial(city - 1, i + 1))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_membership_ops() {
        let s = Subset::EMPTY.with(3).with(5);
        assert!(s.contains(3));
        assert!(s.contains(5));
        assert!(!s.contains(0));
        assert!(!s.contains(4));
        assert_eq!(s.len(), 2);

        let t = s.without(3);
        assert!(!t.contains(3));
        assert_eq!(t.len(), 1);
        // removing a non-member is a no-op
        assert_eq!(t.without(7), t);
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let a: Subset = [4, 1, 2].into_iter().collect();
        let b: Subset = [2, 4, 1].into_iter().collect();
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_full_subset() {
        assert_eq!(Subset::full(0), Subset::EMPTY);
        assert_eq!(Subset::full(2).iter().collect::<Vec<_>>(), vec![1]);
        assert_eq!(Subset::full(MAX_CITIES).len(), MAX_CITIES - 1);
        assert!(!Subset::full(MAX_CITIES).contains(0));
    }

    #[test]
    fn test_members_ascending() {
        let s = Subset::from_bits(0b1010_0110);
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![1, 2, 5, 7]);
        assert_eq!(s.iter().len(), 4);
    }

    #[test]
    fn test_from_bits_drops_start_city() {
        let s = Subset::from_bits(0b1011);
        assert!(!s.contains(0));
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![1, 3]);

        let ranker = SubsetRanker::new(4);
        let position = KSubsets::new(4, 2).position(|t| t == s);
        assert_eq!(Some(ranker.rank(s)), position);
    }

    #[test]
    fn test_display() {
        assert_eq!(Subset::EMPTY.to_string(), "{}");
        assert_eq!(Subset::EMPTY.with(2).with(9).to_string(), "{2, 9}");
    }

    #[test]
    fn test_ksubsets_zero_yields_empty_once() {
        let all: Vec<_> = KSubsets::new(5, 0).collect();
        assert_eq!(all, vec![Subset::EMPTY]);
    }

    #[test]
    fn test_ksubsets_too_large_is_empty() {
        assert_eq!(KSubsets::new(4, 4).count(), 0);
        assert_eq!(KSubsets::new(1, 1).count(), 0);
        assert_eq!(KSubsets::new(2, 0).count(), 1);
    }

    #[test]
    fn test_ksubsets_counts_match_binomials() {
        for n in 1..=12 {
            let ranker = SubsetRanker::new(n);
            for k in 0..n {
                let subsets: Vec<_> = KSubsets::new(n, k).collect();
                assert_eq!(subsets.len(), ranker.count(k), "n={n} k={k}");

                let unique: HashSet<_> = subsets.iter().copied().collect();
                assert_eq!(unique.len(), subsets.len(), "duplicates for n={n} k={k}");

                for s in &subsets {
                    assert_eq!(s.len(), k);
                    assert!(!s.contains(0));
                    assert!(s.iter().all(|c| c < n));
                }
            }
        }
    }

    #[test]
    fn test_ksubsets_increasing_order() {
        let subsets: Vec<_> = KSubsets::new(9, 4).collect();
        for w in subsets.windows(2) {
            assert!(w[0] < w[1]);
        }
    }

    #[test]
    fn test_ksubsets_largest_universe() {
        let last = KSubsets::new(MAX_CITIES, MAX_CITIES - 1).collect::<Vec<_>>();
        assert_eq!(last, vec![Subset::full(MAX_CITIES)]);
        assert_eq!(KSubsets::new(MAX_CITIES, 1).count(), MAX_CITIES - 1);
    }

    #[test]
    fn test_rank_matches_enumeration_position() {
        for n in 1..=10 {
            let ranker = SubsetRanker::new(n);
            for k in 0..n {
                for (pos, s) in KSubsets::new(n, k).enumerate() {
                    assert_eq!(ranker.rank(s), pos, "n={n} subset={s}");
                }
            }
        }
    }

    #[test]
    fn test_binomial_edges() {
        let r = SubsetRanker::new(6);
        assert_eq!(r.binomial(5, 0), 1);
        assert_eq!(r.binomial(5, 2), 10);
        assert_eq!(r.binomial(2, 3), 0);
        assert_eq!(r.count(5), 1);
        assert_eq!(r.count(6), 0);
    }
}
