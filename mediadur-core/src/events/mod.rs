//! Per-file progress events.
//!
//! The aggregation engine reports what happens to each file through an
//! [`EventDispatcher`] handed to it by the caller. Every handler is registered
//! with a [`LevelFilter`], so a consumer decides per sink which events it sees
//! (for example per-file lines on stdout, skip reasons on stderr, nothing at
//! all in summary mode).

use log::{Level, LevelFilter};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A file is about to be probed
    ProbeStarted { filepath: PathBuf },

    /// Probing finished for a file, whatever the outcome. Emitted from the
    /// worker that probed it, so parallel runs see these in completion order.
    FileProbed { filepath: PathBuf },

    /// A file passed validation and was added to the totals. Counted and
    /// skipped events always arrive in input order.
    FileCounted {
        filepath: PathBuf,
        fps: u64,
        frame_count: u64,
        duration_timecode: String,
    },

    /// A file could not be probed or validated and was counted as skipped
    FileSkipped { filepath: PathBuf, reason: String },

    /// Cancellation was requested; the totals cover `attempted` files
    Cancelled { attempted: u64 },
}

impl Event {
    /// Severity used when filtering the event.
    #[must_use]
    pub fn level(&self) -> Level {
        match self {
            Event::ProbeStarted { .. } => Level::Debug,
            Event::FileProbed { .. } => Level::Trace,
            Event::FileCounted { .. } => Level::Info,
            Event::FileSkipped { .. } => Level::Error,
            Event::Cancelled { .. } => Level::Warn,
        }
    }
}

pub trait EventHandler: Send + Sync {
    fn handle(&self, event: &Event);
}

pub struct EventDispatcher {
    handlers: Vec<(LevelFilter, Arc<dyn EventHandler>)>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// A dispatcher that drops every event.
    pub fn silent() -> Self {
        Self::new()
    }

    /// Registers a handler that receives every event.
    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.add_filtered_handler(LevelFilter::Trace, handler);
    }

    /// Registers a handler that receives events at `level` or more severe.
    pub fn add_filtered_handler(&mut self, level: LevelFilter, handler: Arc<dyn EventHandler>) {
        self.handlers.push((level, handler));
    }

    pub fn emit(&self, event: Event) {
        let level = event.level();
        for (filter, handler) in &self.handlers {
            if level <= *filter {
                handler.handle(&event);
            }
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Handler that keeps every event it receives, in order.
#[derive(Default)]
pub struct CollectingEventHandler {
    events: Mutex<Vec<Event>>,
}

impl CollectingEventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events received so far.
    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl EventHandler for CollectingEventHandler {
    fn handle(&self, event: &Event) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skipped() -> Event {
        Event::FileSkipped {
            filepath: PathBuf::from("a.mov"),
            reason: "No video stream for this file".to_string(),
        }
    }

    fn counted() -> Event {
        Event::FileCounted {
            filepath: PathBuf::from("b.mov"),
            fps: 25,
            frame_count: 750,
            duration_timecode: "00:00:30:00".to_string(),
        }
    }

    #[test]
    fn test_level_filtering() {
        let everything = Arc::new(CollectingEventHandler::new());
        let errors_only = Arc::new(CollectingEventHandler::new());
        let nothing = Arc::new(CollectingEventHandler::new());

        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_handler(everything.clone());
        dispatcher.add_filtered_handler(LevelFilter::Error, errors_only.clone());
        dispatcher.add_filtered_handler(LevelFilter::Off, nothing.clone());

        dispatcher.emit(Event::ProbeStarted { filepath: PathBuf::from("b.mov") });
        dispatcher.emit(counted());
        dispatcher.emit(skipped());

        assert_eq!(everything.events().len(), 3);
        assert_eq!(errors_only.events(), vec![skipped()]);
        assert!(nothing.events().is_empty());
    }

    #[test]
    fn test_debug_filter_hides_file_probed() {
        let debug = Arc::new(CollectingEventHandler::new());
        let everything = Arc::new(CollectingEventHandler::new());
        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_filtered_handler(LevelFilter::Debug, debug.clone());
        dispatcher.add_handler(everything.clone());

        dispatcher.emit(Event::FileProbed { filepath: PathBuf::from("b.mov") });

        assert!(debug.events().is_empty());
        assert_eq!(everything.events().len(), 1);
    }

    #[test]
    fn test_info_filter_hides_debug() {
        let handler = Arc::new(CollectingEventHandler::new());
        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_filtered_handler(LevelFilter::Info, handler.clone());

        dispatcher.emit(Event::ProbeStarted { filepath: PathBuf::from("b.mov") });
        dispatcher.emit(Event::FileProbed { filepath: PathBuf::from("b.mov") });
        dispatcher.emit(counted());
        dispatcher.emit(Event::Cancelled { attempted: 1 });

        assert_eq!(
            handler.events(),
            vec![counted(), Event::Cancelled { attempted: 1 }]
        );
    }
}
