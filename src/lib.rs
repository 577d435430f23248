//! Exact traveling-salesman solving for small planar instances.
//!
//! - **Held-Karp**: subset dynamic program over `(vertex, visited set)`
//!   states, processed one subset size at a time with optional tour
//!   reconstruction, rayon-parallel layers and cooperative cancellation.
//! - **Brute force**: exhaustive permutation search, kept as a reference
//!   for cross-checking small instances.
//! - **Instances**: the plain-text `n` / `x y` input format and seeded
//!   random instances.
//!
//! # Example
//!
//! ```
//! use u_heldkarp::heldkarp::{HeldKarpConfig, HeldKarpRunner};
//! use u_heldkarp::instance::Instance;
//!
//! let instance = Instance::parse("4\n0 0\n0 1\n1 1\n1 0\n").unwrap();
//! let result = HeldKarpRunner::solve(instance.cities(), &HeldKarpConfig::default()).unwrap();
//! assert_eq!(result.floored_cost(), 4);
//! assert_eq!(result.tour.unwrap().len(), 4);
//! ```
//!
//! Subsets are `u32` bitmasks, so instances are capped at
//! [`subset::MAX_CITIES`] cities; in practice memory runs out well before
//! that.

pub mod brute_force;
pub mod error;
pub mod geometry;
pub mod heldkarp;
pub mod instance;
pub mod logging;
pub mod matrix;
pub mod subset;

pub use error::{Result, TspError};
