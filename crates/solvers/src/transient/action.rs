/// Control actions supported by the simulation driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the run and return the trajectory so far.
    ///
    /// The record that triggered the action is kept as the final record.
    StopEarly,
}
