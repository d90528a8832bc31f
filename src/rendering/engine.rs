use crate::{rendering::descriptor::MapDescriptor, MapError, Result};
use std::io::Write;

/// The map surface. Any engine that can draw a styled basemap, a weighted
/// heatmap, an extrusion layer and tappable point markers fits; it reports
/// gestures back as [`crate::input::events::EngineEvent`]s.
pub trait RenderingEngine {
    fn apply(&mut self, descriptor: &MapDescriptor) -> Result<()>;
}

/// Engine that keeps every descriptor it receives. Used by headless hosts
/// and tests.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    frames: Vec<MapDescriptor>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[MapDescriptor] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&MapDescriptor> {
        self.frames.last()
    }
}

impl RenderingEngine for RecordingEngine {
    fn apply(&mut self, descriptor: &MapDescriptor) -> Result<()> {
        self.frames.push(descriptor.clone());
        Ok(())
    }
}

/// Engine bridge that streams each descriptor as one line of JSON, for a
/// rendering engine living in another process. Nothing is retained.
pub struct JsonLinesEngine<W: Write> {
    writer: W,
    frames_written: u64,
}

impl<W: Write> JsonLinesEngine<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            frames_written: 0,
        }
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RenderingEngine for JsonLinesEngine<W> {
    fn apply(&mut self, descriptor: &MapDescriptor) -> Result<()> {
        let mut line = serde_json::to_vec(descriptor)?;
        line.push(b'\n');
        self.writer
            .write_all(&line)
            .and_then(|_| self.writer.flush())
            .map_err(|e| MapError::Render(format!("descriptor stream closed: {}", e)))?;
        self.frames_written += 1;
        Ok(())
    }
}
