//! Values stored in the DP table and the tours read back from it.

use crate::matrix::DistanceMatrix;
use std::fmt;

/// Best known way to reach a `(vertex, subset)` state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DpValue {
    /// Minimal length of a path that starts at city 0, visits exactly the
    /// subset, and ends at the vertex.
    pub cost: f64,
    /// City visited immediately before the vertex. `0` is the start city.
    pub parent: usize,
}

/// A closed tour, stored as the visiting order starting at city 0.
///
/// The edge from the last city back to city 0 is implied.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    order: Vec<usize>,
}

impl Tour {
    pub fn new(order: Vec<usize>) -> Self {
        Self { order }
    }

    /// Visiting order, beginning with city 0.
    pub fn cities(&self) -> &[usize] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Total length including the closing edge.
    pub fn length(&self, dist: &DistanceMatrix) -> f64 {
        dist.tour_length(&self.order)
    }

    /// Whether this tour starts at 0 and visits each of `0..n` exactly once.
    pub fn is_permutation_of(&self, n: usize) -> bool {
        if self.order.len() != n || self.order.first() != Some(&0) {
            return false;
        }
        let mut seen = vec![false; n];
        for &city in &self.order {
            if city >= n || seen[city] {
                return false;
            }
            seen[city] = true;
        }
        true
    }
}

impl fmt::Display for Tour {
    /// Prints the cycle with the start city repeated at the end.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, city) in self.order.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{city}")?;
        }
        if let Some(first) = self.order.first() {
            if self.order.len() > 1 {
                write!(f, " {first}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permutation_check() {
        assert!(Tour::new(vec![0, 2, 1, 3]).is_permutation_of(4));
        assert!(Tour::new(vec![0]).is_permutation_of(1));
        assert!(!Tour::new(vec![1, 0, 2]).is_permutation_of(3));
        assert!(!Tour::new(vec![0, 1, 1]).is_permutation_of(3));
        assert!(!Tour::new(vec![0, 1]).is_permutation_of(3));
        assert!(!Tour::new(vec![0, 5]).is_permutation_of(2));
    }

    #[test]
    fn test_display_closes_cycle() {
        assert_eq!(Tour::new(vec![0, 3, 1, 2]).to_string(), "0 3 1 2 0");
        assert_eq!(Tour::new(vec![0]).to_string(), "0");
    }
}
