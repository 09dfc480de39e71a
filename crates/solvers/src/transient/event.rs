use stride_core::Record;

/// Event emitted by the driver for each appended record.
///
/// Step 0 is the initial condition before any integration.
/// Steps 1..N are emitted after each integration step.
#[derive(Debug)]
pub struct Event<'a, Q> {
    /// The step number (0 for the initial record, 1..N for integration steps).
    pub step: usize,

    /// The record appended at this step.
    pub record: &'a Record<Q>,
}
