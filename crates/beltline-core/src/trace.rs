//! Per-tick observation of the line.
//!
//! A [`TraceSink`] is handed to [`Conveyor::add_new_item_traced`] and is
//! called back at fixed points of the tick pipeline:
//!
//! - `on_loaded`: after the shift and the arrival insert, before processing.
//! - `on_slot_change`: once for every station whose slot a worker changed.
//! - `on_processed`: after every station has been processed.
//! - `on_exit`: with the outcome the measure phase recorded.
//!
//! Sinks are passed in per call, never stored globally, so the engine stays
//! deterministic and testable without any I/O. All hooks default to doing
//! nothing; implement only the ones you need.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::conveyor::{Conveyor, ExitOutcome};
use crate::fixed::Ticks;
use crate::station::SlotChange;

pub trait TraceSink {
    fn on_loaded(&mut self, _tick: Ticks, _line: &Conveyor) {}

    fn on_slot_change(&mut self, _tick: Ticks, _station: usize, _change: SlotChange) {}

    fn on_processed(&mut self, _tick: Ticks, _line: &Conveyor) {}

    fn on_exit(&mut self, _tick: Ticks, _outcome: ExitOutcome) {}
}

/// A sink that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTrace;

impl TraceSink for NullTrace {}

// ---------------------------------------------------------------------------
// RecordingTrace
// ---------------------------------------------------------------------------

/// One recorded observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    Loaded { tick: Ticks, line: String },
    SlotChanged { tick: Ticks, station: usize, change: SlotChange },
    Processed { tick: Ticks, line: String },
    Exited { tick: Ticks, outcome: ExitOutcome },
}

/// Keeps every observation in memory, in the order it was made.
#[derive(Debug, Clone, Default)]
pub struct RecordingTrace {
    events: Vec<TraceEvent>,
}

impl RecordingTrace {
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Line renderings taken before processing, one per tick.
    pub fn loaded(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                TraceEvent::Loaded { line, .. } => Some(line.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Line renderings taken after processing, one per tick.
    pub fn processed(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                TraceEvent::Processed { line, .. } => Some(line.as_str()),
                _ => None,
            })
            .collect()
    }

    /// `(tick, station, change)` for every slot change.
    pub fn slot_changes(&self) -> Vec<(Ticks, usize, SlotChange)> {
        self.events
            .iter()
            .filter_map(|e| match *e {
                TraceEvent::SlotChanged {
                    tick,
                    station,
                    change,
                } => Some((tick, station, change)),
                _ => None,
            })
            .collect()
    }

    pub fn exits(&self) -> Vec<ExitOutcome> {
        self.events
            .iter()
            .filter_map(|e| match *e {
                TraceEvent::Exited { outcome, .. } => Some(outcome),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl TraceSink for RecordingTrace {
    fn on_loaded(&mut self, tick: Ticks, line: &Conveyor) {
        self.events.push(TraceEvent::Loaded {
            tick,
            line: line.to_string(),
        });
    }

    fn on_slot_change(&mut self, tick: Ticks, station: usize, change: SlotChange) {
        self.events.push(TraceEvent::SlotChanged {
            tick,
            station,
            change,
        });
    }

    fn on_processed(&mut self, tick: Ticks, line: &Conveyor) {
        self.events.push(TraceEvent::Processed {
            tick,
            line: line.to_string(),
        });
    }

    fn on_exit(&mut self, tick: Ticks, outcome: ExitOutcome) {
        self.events.push(TraceEvent::Exited { tick, outcome });
    }
}

// ---------------------------------------------------------------------------
// WriterTrace
// ---------------------------------------------------------------------------

/// Writes one line per tick in the form
/// `<before> -----processed-----> <after>`.
///
/// The first I/O error stops all further writing and is kept until
/// [`take_error`](Self::take_error) is called; the simulation itself is
/// never interrupted by a failing sink.
#[derive(Debug)]
pub struct WriterTrace<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl WriterTrace<BufWriter<File>> {
    /// Create (or truncate) the file at `path` and trace into it.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> WriterTrace<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    fn write_with(&mut self, f: impl FnOnce(&mut W) -> io::Result<()>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = f(&mut self.out) {
            self.error = Some(e);
        }
    }

    /// The first write error, if any occurred.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Flush buffered output, surfacing any earlier write error first.
    pub fn flush(&mut self) -> io::Result<()> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TraceSink for WriterTrace<W> {
    fn on_loaded(&mut self, _tick: Ticks, line: &Conveyor) {
        self.write_with(|out| write!(out, "{line} -----processed-----> "));
    }

    fn on_processed(&mut self, _tick: Ticks, line: &Conveyor) {
        self.write_with(|out| writeln!(out, "{line}"));
    }
}

// ---------------------------------------------------------------------------
// LogTrace
// ---------------------------------------------------------------------------

/// Forwards slot changes and exits to the `log` facade at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTrace;

impl TraceSink for LogTrace {
    fn on_slot_change(&mut self, tick: Ticks, station: usize, change: SlotChange) {
        log::debug!(
            "tick {tick}: station {station} worker {} {:?}",
            change.worker,
            change.action
        );
    }

    fn on_exit(&mut self, tick: Ticks, outcome: ExitOutcome) {
        match outcome {
            ExitOutcome::Empty => {}
            ExitOutcome::Product => log::debug!("tick {tick}: product left the line"),
            ExitOutcome::Missed(id) => log::debug!("tick {tick}: component {} missed", id.0),
        }
    }
}
