//! The `OutputWriter` trait implemented by all backend writers.

use crate::{AgentSnapshotRow, OrderParameterRow, OutputResult};

/// Trait implemented by the CSV and SQLite writers.
///
/// The observer never propagates these errors itself; they are stored and
/// retrieved with [`FlockOutputObserver::take_error`][crate::FlockOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one order-parameter measurement.
    fn write_order_parameter(&mut self, row: &OrderParameterRow) -> OutputResult<()>;

    /// Write a batch of agent snapshots.
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
