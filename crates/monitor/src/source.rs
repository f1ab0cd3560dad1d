//! Frame sources

use detection::VideoFrame;
use std::time::Instant;

use crate::MonitorError;

/// Anything that can hand out the next frame to analyse
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<VideoFrame, MonitorError>;

    /// Human-readable name for logs
    fn describe(&self) -> String;
}

/// Generates plain grey frames; stands in for a camera
#[derive(Debug)]
pub struct SyntheticSource {
    width: u32,
    height: u32,
    sequence: u32,
    started: Instant,
}

impl SyntheticSource {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            sequence: 0,
            started: Instant::now(),
        }
    }
}

impl FrameSource for SyntheticSource {
    fn next_frame(&mut self) -> Result<VideoFrame, MonitorError> {
        if self.width == 0 || self.height == 0 {
            return Err(MonitorError::Source(format!(
                "cannot produce {}x{} frames",
                self.width, self.height
            )));
        }
        let timestamp_ns = u64::try_from(self.started.elapsed().as_nanos()).unwrap_or(u64::MAX);
        let frame = VideoFrame::solid(self.width, self.height, [128, 128, 128], timestamp_ns, self.sequence);
        self.sequence = self.sequence.wrapping_add(1);
        Ok(frame)
    }

    fn describe(&self) -> String {
        format!("synthetic {}x{}", self.width, self.height)
    }
}
