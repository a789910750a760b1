//! Probe output: one line per event, plain text or JSON.

use serde::Serialize;
use sparse_array::{ArrayObserver, Change, Window};

/// Events printed while the probe drives a sparse array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProbeEvent {
    Load {
        offset: usize,
        limit: usize,
    },
    WillChange {
        start: usize,
        removed: usize,
        added: usize,
    },
    DidChange {
        start: usize,
        removed: usize,
        added: usize,
    },
    LoadFailed {
        offset: usize,
        limit: usize,
        error: String,
    },
    Read {
        index: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<u64>,
        state: ReadState,
    },
    Source {
        len: usize,
    },
    Settled {
        len: usize,
        loaded: usize,
        is_loaded: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadState {
    Loaded,
    Unloaded,
    OutOfBounds,
}

impl ProbeEvent {
    fn text(&self) -> String {
        match self {
            ProbeEvent::Load { offset, limit } => {
                format!("load      offset={offset} limit={limit}")
            }
            ProbeEvent::WillChange {
                start,
                removed,
                added,
            } => format!("will      start={start} removed={removed} added={added}"),
            ProbeEvent::DidChange {
                start,
                removed,
                added,
            } => format!("did       start={start} removed={removed} added={added}"),
            ProbeEvent::LoadFailed {
                offset,
                limit,
                error,
            } => format!("failed    offset={offset} limit={limit} error={error}"),
            ProbeEvent::Read {
                index,
                value: Some(value),
                ..
            } => format!("read      index={index} value={value}"),
            ProbeEvent::Read { index, state, .. } => {
                let state = match state {
                    ReadState::Loaded => "loaded",
                    ReadState::Unloaded => "unloaded",
                    ReadState::OutOfBounds => "out-of-bounds",
                };
                format!("read      index={index} {state}")
            }
            ProbeEvent::Source { len } => format!("source    len={len}"),
            ProbeEvent::Settled {
                len,
                loaded,
                is_loaded,
            } => format!("settled   len={len} loaded={loaded} is_loaded={is_loaded}"),
        }
    }
}

/// Prints events to stdout.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    json: bool,
}

impl Reporter {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn emit(&self, event: &ProbeEvent) {
        println!("{}", self.render(event));
    }

    pub fn render(&self, event: &ProbeEvent) -> String {
        if self.json {
            match serde_json::to_string(event) {
                Ok(json) => json,
                Err(_) => event.text(),
            }
        } else {
            event.text()
        }
    }
}

/// Forwards array notifications to the reporter.
pub struct ReportingObserver {
    reporter: Reporter,
}

impl ReportingObserver {
    pub fn new(reporter: Reporter) -> Self {
        Self { reporter }
    }
}

impl ArrayObserver for ReportingObserver {
    fn will_change(&mut self, change: Change) {
        self.reporter.emit(&ProbeEvent::WillChange {
            start: change.start,
            removed: change.removed,
            added: change.added,
        });
    }

    fn did_change(&mut self, change: Change) {
        self.reporter.emit(&ProbeEvent::DidChange {
            start: change.start,
            removed: change.removed,
            added: change.added,
        });
    }

    fn load_failed(&mut self, window: Window, error: &anyhow::Error) {
        self.reporter.emit(&ProbeEvent::LoadFailed {
            offset: window.offset,
            limit: window.limit,
            error: format!("{error:#}"),
        });
    }
}
