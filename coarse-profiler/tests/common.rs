#![allow(dead_code)]

use coarse_profiler::profiler::TraceWriter;
use std::sync::{Arc, Mutex};

/// A [`TraceWriter`] that keeps every event string in a shared `Vec`.
///
/// ```rust,ignore
/// let (mut writer, events) = CapturingWriter::new();
/// write_chrome_trace(&profiler, &mut writer)?;
/// let captured = events.lock().unwrap();
/// ```
pub struct CapturingWriter {
    events: Arc<Mutex<Vec<String>>>,
    pub finished: bool,
}

impl CapturingWriter {
    /// Create a new writer and return a handle to the shared event buffer.
    pub fn new() -> (Self, Arc<Mutex<Vec<String>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                events: events.clone(),
                finished: false,
            },
            events,
        )
    }
}

impl TraceWriter for CapturingWriter {
    fn write_event(&mut self, event: &str) -> std::io::Result<()> {
        self.events.lock().unwrap().push(event.to_string());
        Ok(())
    }

    fn finish(&mut self) -> std::io::Result<()> {
        self.finished = true;
        Ok(())
    }
}
