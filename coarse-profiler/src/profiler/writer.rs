use crate::profiler::clock::Clock;
use crate::profiler::format::chrome_trace_events;
use crate::profiler::recorder::Profiler;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Destination for exported trace event strings.
pub trait TraceWriter {
    fn write_event(&mut self, event: &str) -> io::Result<()>;

    fn write_batch(&mut self, events: &[String]) -> io::Result<()> {
        for event in events {
            self.write_event(event)?;
        }
        Ok(())
    }

    /// Complete the document and flush it. Further writes are rejected.
    fn finish(&mut self) -> io::Result<()>;
}

/// Writes events as a JSON array, the document shape `chrome://tracing` and
/// Perfetto load directly.
pub struct JsonArrayWriter<W: Write> {
    writer: W,
    written: usize,
    finished: bool,
}

impl JsonArrayWriter<BufWriter<File>> {
    /// Create (or truncate) `path`, creating missing parent directories.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> JsonArrayWriter<W> {
    pub fn new(mut writer: W) -> io::Result<Self> {
        writer.write_all(b"[\n")?;
        Ok(Self {
            writer,
            written: 0,
            finished: false,
        })
    }

    pub fn events_written(&self) -> usize {
        self.written
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }
}

impl<W: Write> TraceWriter for JsonArrayWriter<W> {
    fn write_event(&mut self, event: &str) -> io::Result<()> {
        if self.finished {
            return Err(io::Error::other("trace document already finished"));
        }
        if self.written > 0 {
            self.writer.write_all(b",\n")?;
        }
        self.writer.write_all(event.as_bytes())?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        if self.finished {
            return Ok(());
        }
        self.writer.write_all(b"\n]\n")?;
        self.writer.flush()?;
        self.finished = true;
        tracing::debug!(events = self.written, "trace document finished");
        Ok(())
    }
}

impl<W: Write> Drop for JsonArrayWriter<W> {
    fn drop(&mut self) {
        if !self.finished
            && let Err(e) = self.finish()
        {
            tracing::warn!(error = %e, "failed to finish trace document on drop");
        }
    }
}

/// A writer that discards all events.
pub struct NullWriter;

impl TraceWriter for NullWriter {
    fn write_event(&mut self, _event: &str) -> io::Result<()> {
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Export every sample of `profiler` into `writer` and finish the document.
pub fn write_chrome_trace<C: Clock>(
    profiler: &Profiler<'_, C>,
    writer: &mut dyn TraceWriter,
) -> io::Result<()> {
    for event in chrome_trace_events(profiler.samples()) {
        writer.write_event(&event.to_string())?;
    }
    writer.finish()
}

/// Write a complete, loadable trace file for `profiler` at `path`.
pub fn write_trace_file<C: Clock>(
    profiler: &Profiler<'_, C>,
    path: impl AsRef<Path>,
) -> io::Result<()> {
    let mut writer = JsonArrayWriter::create(path)?;
    write_chrome_trace(profiler, &mut writer)
}
