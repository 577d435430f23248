//! One subset size worth of DP states.
//!
//! A [`Layer`] for size `s` holds a row per size-`s` subset, in colex
//! rank order, and one slot per vertex in each row. Slot `(S, k)` is
//! populated iff `k != 0` and `k ∉ S`. Building layer `s` reads only layer
//! `s - 1`, so the runner keeps at most two layers of costs alive.

use super::types::DpValue;
use crate::error::{Result, TspError};
use crate::matrix::DistanceMatrix;
use crate::subset::{KSubsets, Subset, SubsetRanker};
use rayon::prelude::*;

/// Marks an unpopulated slot in a [`ParentColumn`].
const NO_PARENT: u8 = u8::MAX;

#[derive(Debug, Clone)]
pub(crate) struct Layer {
    size: usize,
    n: usize,
    slots: Vec<Option<DpValue>>,
}

impl Layer {
    /// Size-0 layer: direct edges out of the start city.
    pub(crate) fn base(dist: &DistanceMatrix) -> Self {
        let n = dist.len();
        let slots = (0..n)
            .map(|v| {
                (v != 0).then(|| DpValue {
                    cost: dist.get(0, v),
                    parent: 0,
                })
            })
            .collect();
        Self {
            size: 0,
            n,
            slots,
        }
    }

    /// Builds the layer one size larger than `prev`.
    pub(crate) fn next(
        prev: &Layer,
        dist: &DistanceMatrix,
        ranker: &SubsetRanker,
        parallel: bool,
    ) -> Result<Self> {
        let n = prev.n;
        let size = prev.size + 1;
        let rows = ranker.count(size);
        let mut slots = vec![None; rows * n];

        if parallel {
            let subsets: Vec<Subset> = KSubsets::new(n, size).collect();
            slots
                .par_chunks_mut(n)
                .zip(subsets.par_iter())
                .try_for_each(|(row, &subset)| fill_row(row, subset, prev, dist, ranker))?;
        } else {
            for (row, subset) in slots.chunks_mut(n).zip(KSubsets::new(n, size)) {
                fill_row(row, subset, prev, dist, ranker)?;
            }
        }

        Ok(Self { size, n, slots })
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }

    /// Number of populated slots.
    pub(crate) fn populated(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Looks up the state `(vertex, subset)`.
    ///
    /// A miss means the layers were built out of order and is reported as
    /// [`TspError::InternalError`].
    pub(crate) fn get(
        &self,
        vertex: usize,
        subset: Subset,
        ranker: &SubsetRanker,
    ) -> Result<DpValue> {
        self.index(vertex, subset, ranker)
            .and_then(|i| self.slots[i])
            .ok_or_else(|| {
                TspError::internal(format!(
                    "no DP state for vertex {vertex} after visiting {subset} (layer {})",
                    self.size
                ))
            })
    }

    /// Predecessor-only copy of this layer for tour reconstruction.
    pub(crate) fn parent_column(&self) -> ParentColumn {
        ParentColumn {
            size: self.size,
            n: self.n,
            parents: self
                .slots
                .iter()
                .map(|slot| slot.map_or(NO_PARENT, |v| v.parent as u8))
                .collect(),
        }
    }

    fn index(&self, vertex: usize, subset: Subset, ranker: &SubsetRanker) -> Option<usize> {
        slot_index(self.size, self.n, self.slots.len(), vertex, subset, ranker)
    }
}

/// `cost(k, S) = min over m in S of cost(m, S \ {m}) + d(m, k)`.
///
/// Candidates are scanned in ascending `m` with a strict `<`, so the
/// lowest-indexed predecessor wins ties.
fn fill_row(
    row: &mut [Option<DpValue>],
    subset: Subset,
    prev: &Layer,
    dist: &DistanceMatrix,
    ranker: &SubsetRanker,
) -> Result<()> {
    for (k, slot) in row.iter_mut().enumerate().skip(1) {
        if subset.contains(k) {
            continue;
        }
        let mut best = DpValue {
            cost: f64::INFINITY,
            parent: 0,
        };
        for m in subset.iter() {
            let cost = prev.get(m, subset.without(m), ranker)?.cost + dist.get(m, k);
            if cost < best.cost {
                best = DpValue { cost, parent: m };
            }
        }
        if best.parent == 0 {
            return Err(TspError::internal(format!(
                "no finite predecessor for vertex {k} after visiting {subset}"
            )));
        }
        *slot = Some(best);
    }
    Ok(())
}

fn slot_index(
    size: usize,
    n: usize,
    len: usize,
    vertex: usize,
    subset: Subset,
    ranker: &SubsetRanker,
) -> Option<usize> {
    if vertex >= n || subset.len() != size {
        return None;
    }
    let i = ranker.rank(subset) * n + vertex;
    (i < len).then_some(i)
}

/// Predecessors of one layer, one byte per slot.
#[derive(Debug, Clone)]
pub(crate) struct ParentColumn {
    size: usize,
    n: usize,
    parents: Vec<u8>,
}

impl ParentColumn {
    pub(crate) fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn get(&self, vertex: usize, subset: Subset, ranker: &SubsetRanker) -> Result<usize> {
        slot_index(self.size, self.n, self.parents.len(), vertex, subset, ranker)
            .map(|i| self.parents[i])
            .filter(|&p| p != NO_PARENT)
            .map(usize::from)
            .ok_or_else(|| {
                TspError::internal(format!(
                    "no predecessor recorded for vertex {vertex} after visiting {subset}"
                ))
            })
    }
}
