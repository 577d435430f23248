//! Exhaustive tour search.
//!
//! Tries every ordering of cities `1..n` after the fixed start city in
//! lexicographic order. `O(n!)`, so only useful as a reference for small
//! instances.

use crate::error::{Result, TspError};
use crate::heldkarp::Tour;
use crate::matrix::DistanceMatrix;

/// Largest instance [`solve`] accepts: 11! orderings of the non-start cities.
pub const MAX_BRUTE_FORCE_CITIES: usize = 12;

#[derive(Debug, Clone)]
pub struct BruteForceResult {
    pub tour: Tour,
    pub cost: f64,
    /// Number of complete tours evaluated.
    pub tours_evaluated: usize,
}

/// Finds an optimal tour by enumerating all permutations.
///
/// Ties keep the lexicographically first ordering.
///
/// # Examples
///
/// ```
/// use u_heldkarp::brute_force;
/// use u_heldkarp::geometry::City;
/// use u_heldkarp::matrix::DistanceMatrix;
///
/// let cities = [City::new(0, 0.0, 0.0), City::new(1, 3.0, 0.0), City::new(2, 0.0, 4.0)];
/// let best = brute_force::solve(&DistanceMatrix::from_cities(&cities)).unwrap();
/// assert!((best.cost - 12.0).abs() < 1e-9);
/// assert_eq!(best.tours_evaluated, 2);
/// ```
pub fn solve(dist: &DistanceMatrix) -> Result<BruteForceResult> {
    let n = dist.len();
    if n == 0 {
        return Err(TspError::invalid_input("at least one city is required"));
    }
    if n > MAX_BRUTE_FORCE_CITIES {
        return Err(TspError::invalid_input(format!(
            "brute force is limited to {MAX_BRUTE_FORCE_CITIES} cities, got {n}"
        )));
    }

    let mut order: Vec<usize> = (0..n).collect();
    let mut best_order = order.clone();
    let mut best_cost = dist.tour_length(&order);
    let mut tours_evaluated = 1;

    while next_permutation(&mut order[1..]) {
        tours_evaluated += 1;
        let cost = dist.tour_length(&order);
        if cost < best_cost {
            best_cost = cost;
            best_order.copy_from_slice(&order);
        }
    }

    Ok(BruteForceResult {
        tour: Tour::new(best_order),
        cost: best_cost,
        tours_evaluated,
    })
}

/// Rearranges `items` into the next lexicographic permutation.
///
/// Returns `false` (leaving `items` sorted ascending) once the last
/// permutation has been passed.
fn next_permutation<T: Ord>(items: &mut [T]) -> bool {
    if items.len() < 2 {
        return false;
    }
    let Some(pivot) = (0..items.len() - 1).rev().find(|&i| items[i] < items[i + 1]) else {
        items.reverse();
        return false;
    };
    let successor = (pivot + 1..items.len())
        .rev()
        .find(|&j| items[j] > items[pivot])
        .unwrap_or(pivot + 1);
    items.swap(pivot, successor);
    items[pivot + 1..].reverse();
    true
}
