//! TSP instances and the plain-text input format.
//!
//! The format is the city count on the first line followed by one
//! `x y` pair per line:
//!
//! ```text
//! 3
//! 0 0
//! 3 0
//! 0 4
//! ```
//!
//! Blank lines are ignored.

use crate::error::{Result, TspError};
use crate::geometry::City;
use crate::matrix::DistanceMatrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

/// Side length of the square [`Instance::random`] samples from.
pub const RANDOM_EXTENT: f64 = 100.0;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    cities: Vec<City>,
}

impl Instance {
    /// Wraps `cities`, renumbering them by position.
    pub fn from_cities(cities: impl IntoIterator<Item = City>) -> Self {
        let cities = cities
            .into_iter()
            .enumerate()
            .map(|(id, c)| City::new(id, c.x, c.y))
            .collect();
        Self { cities }
    }

    /// Reads and parses an instance file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("instance: reading {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parses the text format described in the module docs.
    ///
    /// # Errors
    ///
    /// [`TspError::InvalidInput`] when the count is missing, zero or
    /// malformed, when a coordinate line is malformed or non-finite, or
    /// when the number of coordinate lines differs from the count.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_heldkarp::instance::Instance;
    ///
    /// let instance = Instance::parse("2\n0 0\n1.5 -2\n").unwrap();
    /// assert_eq!(instance.len(), 2);
    /// assert_eq!(instance.cities()[1].y, -2.0);
    ///
    /// assert!(Instance::parse("3\n0 0\n1 1\n").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let mut lines = input
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (count_line, count_text) = lines
            .next()
            .ok_or_else(|| TspError::invalid_input("empty input: missing city count"))?;
        let declared: usize = count_text.parse().map_err(|_| {
            TspError::invalid_input(format!(
                "line {count_line}: invalid city count '{count_text}'"
            ))
        })?;
        if declared == 0 {
            return Err(TspError::invalid_input("city count must be at least 1"));
        }

        let mut cities = Vec::with_capacity(declared);
        for (line_no, line) in lines {
            if cities.len() == declared {
                return Err(TspError::invalid_input(format!(
                    "line {line_no}: more coordinate lines than the declared {declared} cities"
                )));
            }
            let (x, y) = parse_coordinate(line_no, line)?;
            cities.push(City::new(cities.len(), x, y));
        }

        if cities.len() != declared {
            return Err(TspError::invalid_input(format!(
                "declared {declared} cities but found {}",
                cities.len()
            )));
        }

        Ok(Self { cities })
    }

    /// Uniformly random cities in `[0, RANDOM_EXTENT)²`, reproducible from `seed`.
    pub fn random(n: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let cities = (0..n)
            .map(|id| {
                City::new(
                    id,
                    rng.random_range(0.0..RANDOM_EXTENT),
                    rng.random_range(0.0..RANDOM_EXTENT),
                )
            })
            .collect();
        Self { cities }
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn distance_matrix(&self) -> DistanceMatrix {
        DistanceMatrix::from_cities(&self.cities)
    }
}

fn parse_coordinate(line_no: usize, line: &str) -> Result<(f64, f64)> {
    let mut fields = line.split_whitespace();
    let (Some(x_text), Some(y_text), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(TspError::invalid_input(format!(
            "line {line_no}: expected 'x y' but got '{line}'"
        )));
    };
    let x = parse_number(line_no, "x", x_text)?;
    let y = parse_number(line_no, "y", y_text)?;
    Ok((x, y))
}

fn parse_number(line_no: usize, axis: &str, text: &str) -> Result<f64> {
    let value: f64 = text.parse().map_err(|_| {
        TspError::invalid_input(format!("line {line_no}: invalid {axis} coordinate '{text}'"))
    })?;
    if !value.is_finite() {
        return Err(TspError::invalid_input(format!(
            "line {line_no}: {axis} coordinate '{text}' is not finite"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid(input: &str) -> String {
        match Instance::parse(input) {
            Err(TspError::InvalidInput(msg)) => msg,
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_basic() {
        let instance = Instance::parse("4\n0 0\n0 1\n1 1\n1 0\n").unwrap();
        assert_eq!(instance.len(), 4);
        assert_eq!(instance.cities()[2], City::new(2, 1.0, 1.0));
    }

    #[test]
    fn test_parse_tolerates_blank_lines_and_padding() {
        let instance = Instance::parse("\n  2 \n\n 20833.3333  17100.0000\n\t1e3 -4\n\n").unwrap();
        assert_eq!(instance.len(), 2);
        assert_eq!(instance.cities()[0].x, 20833.3333);
        assert_eq!(instance.cities()[1].x, 1000.0);
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(invalid("").contains("missing city count"));
        assert!(invalid("   \n\n").contains("missing city count"));
    }

    #[test]
    fn test_parse_rejects_zero_count() {
        assert!(invalid("0\n").contains("at least 1"));
    }

    #[test]
    fn test_parse_rejects_bad_count() {
        assert!(invalid("three\n0 0\n").contains("invalid city count"));
        assert!(invalid("-1\n").contains("invalid city count"));
    }

    #[test]
    fn test_parse_rejects_truncated() {
        assert!(invalid("3\n0 0\n1 1\n").contains("declared 3 cities but found 2"));
    }

    #[test]
    fn test_parse_rejects_extra_lines() {
        assert!(invalid("1\n0 0\n1 1\n").contains("line 3"));
    }

    #[test]
    fn test_parse_rejects_malformed_coordinates() {
        assert!(invalid("1\n0\n").contains("expected 'x y'"));
        assert!(invalid("1\n0 1 2\n").contains("expected 'x y'"));
        assert!(invalid("1\n0 abc\n").contains("invalid y coordinate"));
        assert!(invalid("1\nNaN 0\n").contains("not finite"));
        assert!(invalid("1\n1e999 0\n").contains("not finite"));
    }

    #[test]
    fn test_random_is_reproducible() {
        let a = Instance::random(10, 42);
        let b = Instance::random(10, 42);
        let c = Instance::random(10, 43);
        assert_eq!(a, b);
        assert_ne!(a, c);
        for city in a.cities() {
            assert!((0.0..RANDOM_EXTENT).contains(&city.x));
            assert!((0.0..RANDOM_EXTENT).contains(&city.y));
        }
    }

    #[test]
    fn test_from_cities_renumbers() {
        let instance = Instance::from_cities([City::new(7, 1.0, 2.0), City::new(3, 4.0, 5.0)]);
        assert_eq!(instance.cities()[0].id, 0);
        assert_eq!(instance.cities()[1].id, 1);
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = Instance::from_path("/nonexistent/u-heldkarp/cities.txt").unwrap_err();
        assert!(matches!(err, TspError::Io(_)));
    }
}
