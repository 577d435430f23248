//! Pairwise distance table.

use crate::geometry::City;

/// Square symmetric distance matrix with a zero diagonal.
///
/// Stored row-major in a single `Vec` for cache locality. Built once and
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Builds the Euclidean distance matrix for `cities`.
    ///
    /// Each unordered pair is computed once and mirrored.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_heldkarp::geometry::City;
    /// use u_heldkarp::matrix::DistanceMatrix;
    ///
    /// let cities = [City::new(0, 0.0, 0.0), City::new(1, 3.0, 4.0)];
    /// let m = DistanceMatrix::from_cities(&cities);
    /// assert_eq!(m.get(0, 1), 5.0);
    /// assert_eq!(m.get(1, 0), 5.0);
    /// assert_eq!(m.get(1, 1), 0.0);
    /// ```
    pub fn from_cities(cities: &[City]) -> Self {
        let n = cities.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = cities[i].distance_to(&cities[j]);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self { n, data }
    }

    /// Builds a matrix from an arbitrary distance function.
    ///
    /// Only `f(i, j)` for `i < j` is evaluated; the result is mirrored so
    /// the matrix stays symmetric.
    pub fn from_fn<F: FnMut(usize, usize) -> f64>(n: usize, mut f: F) -> Self {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = f(i, j);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self { n, data }
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    /// Distances from city `i` to every city.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Length of the closed tour visiting `order` and returning to `order[0]`.
    pub fn tour_length(&self, order: &[usize]) -> f64 {
        if order.len() < 2 {
            return 0.0;
        }
        let open: f64 = order.windows(2).map(|w| self.get(w[0], w[1])).sum();
        open + self.get(order[order.len() - 1], order[0])
    }
}
