//! `FlockOutputObserver<W>` — bridges `FlockObserver` to an `OutputWriter`.

use spp_core::Step;
use spp_sim::{FlockObserver, Frame};

use crate::row::{AgentSnapshotRow, OrderParameterRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`FlockObserver`] that writes the order-parameter series and agent
/// snapshots to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `FlockObserver`
/// methods have no return value.  After `flock.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct FlockOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> FlockOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `flock.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> FlockObserver for FlockOutputObserver<W> {
    fn on_measurement(&mut self, step: Step, order_parameter: f64) {
        let row = OrderParameterRow { step: step.0, order_parameter };
        let result = self.writer.write_order_parameter(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, step: Step, frame: &Frame<'_>) {
        let rows: Vec<AgentSnapshotRow> = frame
            .agents
            .iter()
            .enumerate()
            .map(|(i, agent)| AgentSnapshotRow::from_agent(i as u32, step, agent))
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_run_end(&mut self, _final_step: Step) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
