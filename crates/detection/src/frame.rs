//! Video frame type handed to scorers

/// Decoded RGB video frame
#[derive(Debug, Clone)]
pub struct VideoFrame {
    /// RGB pixel data (width * height * 3)
    pub data: Vec<u8>,
    /// Frame width
    pub width: u32,
    /// Frame height
    pub height: u32,
    /// Capture timestamp (nanoseconds)
    pub timestamp_ns: u64,
    /// Frame sequence number
    pub sequence: u32,
}

impl VideoFrame {
    /// Create a new video frame from raw RGB data
    pub fn new(data: Vec<u8>, width: u32, height: u32, timestamp_ns: u64, sequence: u32) -> Self {
        Self {
            data,
            width,
            height,
            timestamp_ns,
            sequence,
        }
    }

    /// Create a frame filled with a single RGB colour
    pub fn solid(width: u32, height: u32, rgb: [u8; 3], timestamp_ns: u64, sequence: u32) -> Self {
        let pixels = (width as usize) * (height as usize);
        let mut data = Vec::with_capacity(pixels * 3);
        for _ in 0..pixels {
            data.extend_from_slice(&rgb);
        }
        Self::new(data, width, height, timestamp_ns, sequence)
    }

    /// Non-empty and the buffer length matches the dimensions
    pub fn is_well_formed(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.data.len() == (self.width as usize) * (self.height as usize) * 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_frame_is_well_formed() {
        let frame = VideoFrame::solid(4, 3, [10, 20, 30], 0, 1);
        assert!(frame.is_well_formed());
        assert_eq!(frame.data.len(), 36);
        assert_eq!(&frame.data[33..], &[10, 20, 30]);
    }

    #[test]
    fn test_truncated_frame_is_malformed() {
        let frame = VideoFrame::new(vec![0; 10], 4, 3, 0, 0);
        assert!(!frame.is_well_formed());
        assert!(!VideoFrame::new(Vec::new(), 0, 0, 0, 0).is_well_formed());
    }
}
