use crate::State;

/// One time-stamped entry of a trajectory.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record<Q> {
    pub time: f64,
    pub state: State,
    pub derived: Q,
}

impl<Q> Record<Q> {
    /// Creates a record from its parts.
    pub fn new(time: f64, state: State, derived: Q) -> Self {
        Self {
            time,
            state,
            derived,
        }
    }
}

/// The ordered output of a simulation run.
///
/// Records are appended once per completed step, starting with the initial
/// condition at time zero. The driver only appends; once a run returns the
/// trajectory belongs to the caller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trajectory<Q> {
    records: Vec<Record<Q>>,
}

impl<Q> Trajectory<Q> {
    /// Creates an empty trajectory with room for `capacity` records.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Appends a record.
    pub fn push(&mut self, record: Record<Q>) {
        self.records.push(record);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns all records in time order.
    #[must_use]
    pub fn records(&self) -> &[Record<Q>] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record<Q>> {
        self.records.iter()
    }

    /// Returns the initial record, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Record<Q>> {
        self.records.first()
    }

    /// Returns the final record, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Record<Q>> {
        self.records.last()
    }

    /// Returns the time stamps of every record.
    #[must_use]
    pub fn times(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.time).collect()
    }

    /// Returns one state component across every record.
    ///
    /// Returns `None` if `index` is out of range for any record.
    #[must_use]
    pub fn component(&self, index: usize) -> Option<Vec<f64>> {
        self.records.iter().map(|r| r.state.get(index)).collect()
    }

    /// Consumes the trajectory and returns its records.
    #[must_use]
    pub fn into_records(self) -> Vec<Record<Q>> {
        self.records
    }
}

impl<Q> Default for Trajectory<Q> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<'a, Q> IntoIterator for &'a Trajectory<Q> {
    type Item = &'a Record<Q>;
    type IntoIter = std::slice::Iter<'a, Record<Q>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl<Q> IntoIterator for Trajectory<Q> {
    type Item = Record<Q>;
    type IntoIter = std::vec::IntoIter<Record<Q>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
