//! Geometry Repair Pass
//!
//! Joins touching lines through the host's bulk join command, waits for it
//! to finish and then closes every open polyline.

use crate::error::PassResult;
use crate::outcome::{classify, SkipRecord};
use facadekit_communication::{DrawingClient, Space};
use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};

/// Options for [`GeometryRepairPass`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairOptions {
    /// Command line sent to run the bulk join
    pub join_command: String,
    /// Longest wait for the join to finish
    pub settle: Duration,
    /// How often a completion signal is polled
    pub poll_interval: Duration,
}

impl Default for RepairOptions {
    fn default() -> Self {
        Self {
            join_command: "_SELALL _JOIN \n".to_string(),
            settle: Duration::from_millis(2000),
            poll_interval: Duration::from_millis(250),
        }
    }
}

/// How the pass waited for the bulk join
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinWait {
    /// The document reported completion
    Signalled,
    /// The document still reported activity when the settle time ran out
    TimedOut,
    /// No completion signal; slept for the settle time
    FixedDelay,
    /// The join command was refused
    Rejected,
}

/// Counters from a repair run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepairSummary {
    pub join: JoinWait,
    /// Object count at the start of the scan
    pub scanned: usize,
    pub fixed: usize,
    pub already_closed: usize,
    /// Objects that are not polylines
    pub ignored: usize,
    /// Polylines whose closed flag cannot be read or written
    pub unsupported: usize,
    /// Objects that could not be processed
    pub failed: usize,
    pub skips: Vec<SkipRecord>,
}

impl RepairSummary {
    fn new(join: JoinWait) -> Self {
        Self {
            join,
            scanned: 0,
            fixed: 0,
            already_closed: 0,
            ignored: 0,
            unsupported: 0,
            failed: 0,
            skips: Vec::new(),
        }
    }
}

/// Closes polylines after a bulk join
#[derive(Debug, Clone, Default)]
pub struct GeometryRepairPass {
    options: RepairOptions,
}

impl GeometryRepairPass {
    pub fn new(options: RepairOptions) -> Self {
        Self { options }
    }

    pub fn run<C: DrawingClient>(&self, client: &mut C) -> PassResult<RepairSummary> {
        tracing::info!("Joining lines");
        let join = match classify(client.send_command(&self.options.join_command))? {
            Ok(()) => self.wait_for_join(client),
            Err(reason) => {
                tracing::warn!("Join command refused: {}", reason);
                JoinWait::Rejected
            }
        };
        let mut summary = RepairSummary::new(join);

        summary.scanned = client.object_count(Space::Model)?;
        tracing::info!(objects = summary.scanned, "Checking polylines");

        for index in 0..summary.scanned {
            let id = match classify(client.object_at(Space::Model, index))? {
                Ok(id) => id,
                Err(reason) => {
                    tracing::debug!("Object {} could not be processed: {}", index, reason);
                    summary.failed += 1;
                    summary.skips.push(SkipRecord::detached(reason));
                    continue;
                }
            };

            let kind = match classify(client.kind(id))? {
                Ok(kind) => kind,
                Err(reason) => {
                    summary.failed += 1;
                    summary.skips.push(SkipRecord::new(id, reason));
                    continue;
                }
            };
            if !kind.is_polyline() {
                summary.ignored += 1;
                continue;
            }

            let outcome = match classify(client.is_closed(id))? {
                Ok(true) => {
                    summary.already_closed += 1;
                    continue;
                }
                Ok(false) => classify(client.set_closed(id, true))?,
                Err(reason) => Err(reason),
            };

            match outcome {
                Ok(()) => {
                    tracing::debug!("Closed polyline {}", id);
                    summary.fixed += 1;
                }
                Err(reason) => {
                    if reason.is_unsupported() {
                        summary.unsupported += 1;
                    } else {
                        summary.failed += 1;
                    }
                    tracing::debug!("Could not close {}: {}", id, reason);
                    summary.skips.push(SkipRecord::new(id, reason));
                }
            }
        }

        tracing::info!(
            fixed = summary.fixed,
            already_closed = summary.already_closed,
            ignored = summary.ignored,
            unsupported = summary.unsupported,
            failed = summary.failed,
            "Repair complete"
        );
        Ok(summary)
    }

    /// Poll the completion signal if there is one, else sleep the settle time
    fn wait_for_join<C: DrawingClient>(&self, client: &C) -> JoinWait {
        let started = Instant::now();
        loop {
            match client.bulk_operation_pending() {
                None => {
                    std::thread::sleep(self.options.settle);
                    return JoinWait::FixedDelay;
                }
                Some(false) => return JoinWait::Signalled,
                Some(true) => {
                    let elapsed = started.elapsed();
                    if elapsed >= self.options.settle {
                        tracing::warn!(
                            "Join still running after {} ms, continuing",
                            self.options.settle.as_millis()
                        );
                        return JoinWait::TimedOut;
                    }
                    let remaining = self.options.settle - elapsed;
                    std::thread::sleep(self.options.poll_interval.min(remaining));
                }
            }
        }
    }
}

impl fmt::Display for RepairSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Geometry repair")?;
        writeln!(f, "  Scanned:        {}", self.scanned)?;
        writeln!(f, "  Fixed (closed): {}", self.fixed)?;
        writeln!(f, "  Already closed: {}", self.already_closed)?;
        writeln!(f, "  Ignored:        {}", self.ignored)?;
        if self.unsupported > 0 {
            writeln!(f, "  Unsupported:    {}", self.unsupported)?;
        }
        if self.failed > 0 {
            writeln!(f, "  Failed:         {}", self.failed)?;
        }
        if self.join == JoinWait::Rejected {
            writeln!(f, "  Join command was rejected; existing polylines only")?;
        }
        Ok(())
    }
}
