//! Held-Karp exact TSP solver.
//!
//! Dynamic programming over `(vertex, visited subset)` states. Subsets are
//! processed in increasing size, and each size's states depend only on the
//! previous size, so working memory is two layers unless the tour itself
//! is requested. `O(n² · 2ⁿ)` time.
//!
//! # References
//!
//! - Bellman, R. (1962). "Dynamic Programming Treatment of the Travelling
//!   Salesman Problem", *Journal of the ACM* 9(1), 61-63.
//! - Held, M. & Karp, R. M. (1962). "A Dynamic Programming Approach to
//!   Sequencing Problems", *Journal of SIAM* 10(1), 196-210.

mod config;
mod runner;
mod table;
mod types;

pub use config::{HeldKarpConfig, DEFAULT_MAX_CITIES};
pub use runner::{HeldKarpResult, HeldKarpRunner};
pub use types::{DpValue, Tour};
