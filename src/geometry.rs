//! Planar cities and the Euclidean metric.

/// A city in the plane, identified by its 0-based position in the input.
///
/// City 0 is the fixed start and end of every tour.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    /// 0-based index in the instance.
    pub id: usize,
    pub x: f64,
    pub y: f64,
}

impl City {
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Straight-line distance to `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_heldkarp::geometry::City;
    ///
    /// let a = City::new(0, 0.0, 0.0);
    /// let b = City::new(1, 3.0, 4.0);
    /// assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
    /// ```
    pub fn distance_to(&self, other: &City) -> f64 {
        euclidean(self.x, self.y, other.x, other.y)
    }
}

#[inline]
pub fn euclidean(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    (x1 - x2).hypot(y1 - y2)
}
