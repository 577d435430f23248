//! Held-Karp execution loop.
//!
//! # Algorithm
//!
//! 1. Base layer: `cost(v, ∅) = d(0, v)` for every `v ≥ 1`
//! 2. For `s = 1 ..= n-2`, build layer `s` from layer `s - 1`
//! 3. Close the tour: `min over m of cost(m, F \ {m}) + d(m, 0)` where
//!    `F = {1, …, n-1}`
//! 4. Optionally walk the stored predecessors back to recover the tour
//!
//! Cancellation and the time limit are checked once per subset size.
//!
//! # Reference
//!
//! Held, M. & Karp, R. M. (1962). "A Dynamic Programming Approach to
//! Sequencing Problems", *Journal of SIAM* 10(1), 196-210.

use super::config::HeldKarpConfig;
use super::table::{Layer, ParentColumn};
use super::types::Tour;
use crate::error::{Result, TspError};
use crate::geometry::City;
use crate::matrix::DistanceMatrix;
use crate::subset::{Subset, SubsetRanker};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Result of a Held-Karp run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeldKarpResult {
    /// Length of the optimal closed tour.
    pub cost: f64,

    /// The optimal tour, when [`HeldKarpConfig::reconstruct_tour`] is set.
    pub tour: Option<Tour>,

    /// Number of subset layers built, including the size-0 base layer.
    pub layers: usize,

    /// Number of `(vertex, subset)` states computed.
    pub states: usize,

    /// Wall-clock time spent, in milliseconds.
    pub elapsed_ms: u64,
}

impl HeldKarpResult {
    /// Tour cost rounded down to an integer.
    pub fn floored_cost(&self) -> i64 {
        self.cost.floor() as i64
    }
}

/// Executes the Held-Karp dynamic program.
///
/// # Examples
///
/// ```
/// use u_heldkarp::geometry::City;
/// use u_heldkarp::heldkarp::{HeldKarpConfig, HeldKarpRunner};
///
/// let cities = [
///     City::new(0, 0.0, 0.0),
///     City::new(1, 3.0, 0.0),
///     City::new(2, 0.0, 4.0),
/// ];
/// let result = HeldKarpRunner::solve(&cities, &HeldKarpConfig::default()).unwrap();
/// assert_eq!(result.floored_cost(), 12);
/// ```
pub struct HeldKarpRunner;

impl HeldKarpRunner {
    /// Builds the distance matrix for `cities` and runs the solver.
    pub fn solve(cities: &[City], config: &HeldKarpConfig) -> Result<HeldKarpResult> {
        Self::run(&DistanceMatrix::from_cities(cities), config)
    }

    /// Runs the solver on a precomputed distance matrix.
    pub fn run(dist: &DistanceMatrix, config: &HeldKarpConfig) -> Result<HeldKarpResult> {
        Self::run_with_cancel(dist, config, None)
    }

    /// Runs the solver with an optional cancellation token.
    ///
    /// If `cancel` is set to `true`, the run fails with
    /// [`TspError::Cancelled`] before the next layer is built. No partial
    /// result is returned.
    pub fn run_with_cancel(
        dist: &DistanceMatrix,
        config: &HeldKarpConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<HeldKarpResult> {
        run_from(dist, config, cancel.as_deref(), Instant::now())
    }
}

/// Runs the solver with the clock already started at `start`.
fn run_from(
    dist: &DistanceMatrix,
    config: &HeldKarpConfig,
    cancel: Option<&AtomicBool>,
    start: Instant,
) -> Result<HeldKarpResult> {
    config.validate().map_err(TspError::InvalidInput)?;

    let n = dist.len();
    if n == 0 {
        return Err(TspError::invalid_input("at least one city is required"));
    }
    if n > config.max_cities {
        return Err(TspError::invalid_input(format!(
            "{n} cities exceeds the configured maximum of {}",
            config.max_cities
        )));
    }
    check_distances(dist)?;

    if n == 1 {
        log::debug!("heldkarp: single city, empty tour");
        return Ok(HeldKarpResult {
            cost: 0.0,
            tour: config.reconstruct_tour.then(|| Tour::new(vec![0])),
            layers: 0,
            states: 0,
            elapsed_ms: 0,
        });
    }

    let ranker = SubsetRanker::new(n);
    let mut layer = Layer::base(dist);
    let mut states = layer.populated();
    let mut columns: Vec<ParentColumn> = Vec::new();
    if config.reconstruct_tour {
        columns.push(layer.parent_column());
    }

    for size in 1..=n.saturating_sub(2) {
        check_interrupt(cancel, config, start, size)?;

        layer = Layer::next(&layer, dist, &ranker, config.parallel)?;
        let populated = layer.populated();
        states += populated;
        log::debug!(
            "heldkarp: layer={size} subsets={} states={populated}",
            ranker.count(size)
        );

        if config.reconstruct_tour {
            columns.push(layer.parent_column());
        }
    }

    let (cost, last) = close_tour(&layer, dist, &ranker)?;

    let tour = if config.reconstruct_tour {
        Some(walk_back(&columns, last, n, &ranker)?)
    } else {
        None
    };

    let elapsed_ms = start.elapsed().as_millis() as u64;
    log::info!("heldkarp: done n={n} cost={cost:.4} states={states} elapsed_ms={elapsed_ms}");

    Ok(HeldKarpResult {
        cost,
        tour,
        layers: layer.size() + 1,
        states,
        elapsed_ms,
    })
}

/// Rejects distances that are not finite or whose tour sums could overflow.
///
/// Every tour is at most `n * max(d)` long, so bounding that keeps each
/// DP comparison between finite values.
fn check_distances(dist: &DistanceMatrix) -> Result<()> {
    let n = dist.len();
    let mut longest = 0.0f64;
    for i in 0..n {
        for j in (i + 1)..n {
            let d = dist.get(i, j);
            if !d.is_finite() || d < 0.0 {
                return Err(TspError::invalid_input(format!(
                    "distance between cities {i} and {j} is {d}, expected a finite non-negative value"
                )));
            }
            longest = longest.max(d);
        }
    }
    if !(longest * n as f64).is_finite() {
        return Err(TspError::invalid_input(format!(
            "distances up to {longest} are too large to sum over {n} cities"
        )));
    }
    Ok(())
}

fn check_interrupt(
    cancel: Option<&AtomicBool>,
    config: &HeldKarpConfig,
    start: Instant,
    completed_layers: usize,
) -> Result<()> {
    if let Some(flag) = cancel {
        if flag.load(Ordering::Relaxed) {
            log::warn!("heldkarp: cancelled after {completed_layers} layers");
            return Err(TspError::Cancelled { completed_layers });
        }
    }
    if let Some(limit) = config.time_limit_ms {
        let elapsed_ms = start.elapsed().as_millis() as u64;
        if elapsed_ms >= limit {
            log::warn!("heldkarp: time limit {limit} ms reached at layer {completed_layers}");
            return Err(TspError::TimeLimit { elapsed_ms });
        }
    }
    Ok(())
}

/// Returns the optimal tour cost and the last city before returning to 0.
///
/// `layer` must be the size `n-2` layer.
fn close_tour(layer: &Layer, dist: &DistanceMatrix, ranker: &SubsetRanker) -> Result<(f64, usize)> {
    let full = Subset::full(dist.len());
    let mut best_cost = f64::INFINITY;
    let mut last = 0;
    for m in full.iter() {
        let cost = layer.get(m, full.without(m), ranker)?.cost + dist.get(m, 0);
        if cost < best_cost {
            best_cost = cost;
            last = m;
        }
    }
    if last == 0 {
        return Err(TspError::internal("no finite tour closes back to city 0"));
    }
    Ok((best_cost, last))
}

/// Follows predecessor links from `last` back to city 0.
///
/// `columns[s]` holds the predecessors of the size-`s` layer.
fn walk_back(
    columns: &[ParentColumn],
    last: usize,
    n: usize,
    ranker: &SubsetRanker,
) -> Result<Tour> {
    let mut reversed = Vec::with_capacity(n);
    let mut current = last;
    let mut remaining = Subset::full(n).without(last);

    loop {
        reversed.push(current);
        let column = columns.get(remaining.len()).ok_or_else(|| {
            TspError::internal(format!("no predecessor layer for size {}", remaining.len()))
        })?;
        debug_assert_eq!(column.size(), remaining.len());
        let parent = column.get(current, remaining, ranker)?;
        if parent == 0 {
            break;
        }
        if !remaining.contains(parent) {
            return Err(TspError::internal(format!(
                "predecessor {parent} of {current} is not in {remaining}"
            )));
        }
        remaining = remaining.without(parent);
        current = parent;
    }

    if !remaining.is_empty() {
        return Err(TspError::internal(format!(
            "walk back reached the start with {remaining} unvisited"
        )));
    }

    reversed.push(0);
    reversed.reverse();
    Ok(Tour::new(reversed))
}
