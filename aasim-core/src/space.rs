//! Observation and action spaces.
use serde::{Deserialize, Serialize};

/// A box in `R^n`, possibly unbounded in each dimension.
///
/// The training loop reads the shape of the box to size the input layer of
/// its policy network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSpace {
    /// Lower bounds, one per element.
    pub low: Vec<f64>,

    /// Upper bounds, one per element.
    pub high: Vec<f64>,

    /// Shape of the space.
    pub shape: Vec<usize>,
}

impl BoxSpace {
    /// Creates a box with the given bounds.
    ///
    /// Panics if the lengths of the bounds do not match the number of elements
    /// implied by `shape`.
    pub fn new(low: Vec<f64>, high: Vec<f64>, shape: Vec<usize>) -> Self {
        let n: usize = shape.iter().product();
        assert_eq!(low.len(), n);
        assert_eq!(high.len(), n);
        Self { low, high, shape }
    }

    /// Creates a box of the given shape spanning `[-inf, inf]` in every element.
    pub fn unbounded(shape: &[usize]) -> Self {
        let n: usize = shape.iter().product();
        Self {
            low: vec![f64::NEG_INFINITY; n],
            high: vec![f64::INFINITY; n],
            shape: shape.to_vec(),
        }
    }

    /// Returns the number of elements in the space.
    pub fn dim(&self) -> usize {
        self.shape.iter().product()
    }

    /// Returns `true` if `x` has the right number of elements and lies within the bounds.
    pub fn contains(&self, x: &[f64]) -> bool {
        x.len() == self.dim()
            && x
                .iter()
                .zip(self.low.iter().zip(self.high.iter()))
                .all(|(v, (lo, hi))| lo <= v && v <= hi)
    }
}

#[cfg(test)]
mod tests {
    use super::BoxSpace;

    #[test]
    fn test_unbounded() {
        let space = BoxSpace::unbounded(&[4]);
        assert_eq!(space.dim(), 4);
        assert!(space.low.iter().all(|v| *v == f64::NEG_INFINITY));
        assert!(space.high.iter().all(|v| *v == f64::INFINITY));
        assert!(space.contains(&[1e9, -1e9, 0.0, 3.0]));
        assert!(!space.contains(&[0.0, 0.0, 0.0]));
    }

    #[test]
    fn test_bounded() {
        let space = BoxSpace::new(vec![-1.0, 0.0], vec![1.0, 2.0], vec![2]);
        assert!(space.contains(&[0.5, 2.0]));
        assert!(!space.contains(&[1.5, 1.0]));
    }
}
