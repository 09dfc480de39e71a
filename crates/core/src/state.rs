use std::ops::Index;

use crate::StepIntegrable;

/// The instantaneous condition of a physical system as a fixed-length vector.
///
/// A `State` is a value type: stepping returns a new state and never mutates
/// the old one, so every recorded trajectory entry is an independent snapshot.
/// Its dimension is fixed for the lifetime of a run and must match the
/// [`Dynamics`](crate::Dynamics) it is integrated under.
///
/// The derivative of a state is itself a `State` of the same dimension.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct State(Vec<f64>);

impl State {
    /// Creates a state from its components.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// Creates a state of the given dimension with every component zero.
    #[must_use]
    pub fn zeros(dimension: usize) -> Self {
        Self(vec![0.0; dimension])
    }

    /// Returns the number of components.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    /// Returns the components as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Returns an iterator over the components.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }

    /// Returns the component at `index`, or `None` if out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    /// Returns `true` if every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|x| x.is_finite())
    }

    /// Returns the Euclidean norm of the state vector.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.0.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    /// Consumes the state and returns its components.
    #[must_use]
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    /// Returns the linear combination `Σ wᵢ·sᵢ` of the given states.
    ///
    /// All states must share one dimension; the result has that dimension.
    /// An empty combination yields an empty state.
    #[must_use]
    pub fn weighted_sum<'a, I>(terms: I) -> Self
    where
        I: IntoIterator<Item = (f64, &'a State)>,
    {
        let mut terms = terms.into_iter();
        let Some((weight, first)) = terms.next() else {
            return Self::default();
        };

        let mut sum: Vec<f64> = first.iter().map(|x| weight * x).collect();
        for (weight, state) in terms {
            debug_assert_eq!(state.dimension(), sum.len(), "dimension mismatch");
            for (acc, x) in sum.iter_mut().zip(state.iter()) {
                *acc += weight * x;
            }
        }

        Self(sum)
    }
}

impl StepIntegrable<f64> for State {
    type Derivative = State;

    fn step(&self, derivative: State, delta: f64) -> Self {
        debug_assert_eq!(self.dimension(), derivative.dimension());
        let next = self
            .0
            .iter()
            .zip(derivative.0.iter())
            .map(|(s, d)| s + d * delta)
            .collect();
        State(next)
    }
}

impl Index<usize> for State {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl AsRef<[f64]> for State {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for State {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl<const N: usize> From<[f64; N]> for State {
    fn from(values: [f64; N]) -> Self {
        Self(values.to_vec())
    }
}

impl FromIterator<f64> for State {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a State {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
