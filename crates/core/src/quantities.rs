use crate::State;

/// One evaluation of a time-derivative law.
///
/// Holds the time and state at which the law was evaluated together with the
/// derivative it produced.
#[derive(Debug, Clone, Copy)]
pub struct Stage<'a> {
    pub time: f64,
    pub state: &'a State,
    pub derivative: &'a State,
}

impl<'a> Stage<'a> {
    #[must_use]
    pub fn new(time: f64, state: &'a State, derivative: &'a State) -> Self {
        Self {
            time,
            state,
            derivative,
        }
    }
}

/// What derived quantities are computed from for one record.
///
/// `time` and `state` are the record's own values. `stage` is the law
/// evaluation that the integrator charges to the record: the endpoint for
/// most schemes, the half step for the midpoint scheme. Positions and
/// energies belong with `state`; forces and accelerations with `stage`.
#[derive(Debug, Clone, Copy)]
pub struct Sample<'a> {
    pub time: f64,
    pub state: &'a State,
    pub stage: Stage<'a>,
}

impl<'a> Sample<'a> {
    /// Creates a sample whose bookkeeping stage may differ from the record.
    #[must_use]
    pub fn new(time: f64, state: &'a State, stage: Stage<'a>) -> Self {
        Self { time, state, stage }
    }

    /// Creates a sample charged to the record's own evaluation.
    #[must_use]
    pub fn at_endpoint(stage: Stage<'a>) -> Self {
        Self {
            time: stage.time,
            state: stage.state,
            stage,
        }
    }

    /// The derivative of the bookkeeping stage.
    #[must_use]
    pub fn derivative(&self) -> &'a State {
        self.stage.derivative
    }
}

/// Computes physically meaningful scalars (energies, forces) from a sample.
///
/// The unit type `()` is the "no derived quantities" implementation, and
/// closures taking a [`Sample`] implement this trait automatically.
pub trait DerivedQuantities {
    type Output;

    /// Computes the derived quantities for one sample.
    fn evaluate(&self, sample: &Sample<'_>) -> Self::Output;
}

/// Blanket implementation for closures.
impl<F, T> DerivedQuantities for F
where
    F: Fn(&Sample<'_>) -> T,
{
    type Output = T;

    fn evaluate(&self, sample: &Sample<'_>) -> T {
        self(sample)
    }
}

/// No derived quantities.
impl DerivedQuantities for () {
    type Output = ();

    fn evaluate(&self, _sample: &Sample<'_>) {}
}
