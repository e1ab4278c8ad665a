//! Video frames
//!
//! A frame is an opaque pixel buffer plus its presentation timing. The
//! pipeline owns a frame for one receive → process → render cycle and
//! never retains it beyond that, except for the timing used to stamp
//! synthetic fallback frames.

use bytes::Bytes;

use crate::MediaTime;

/// Default dimensions for blank/placeholder frames
pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;

/// Bytes per pixel for the working format (BGR24)
const BYTES_PER_PIXEL: usize = 3;

/// One video frame: pixel buffer + presentation timing
#[derive(Clone)]
pub struct VideoFrame {
    /// Pixel data, BGR24 row-major
    pub data: Bytes,
    pub width: u32,
    pub height: u32,
    pub time: MediaTime,
}

impl VideoFrame {
    pub fn new(data: Bytes, width: u32, height: u32, time: MediaTime) -> Self {
        Self {
            data,
            width,
            height,
            time,
        }
    }

    /// Solid-black frame of the given dimensions
    pub fn blank(width: u32, height: u32, time: MediaTime) -> Self {
        let len = width as usize * height as usize * BYTES_PER_PIXEL;
        Self {
            data: Bytes::from(vec![0u8; len]),
            width,
            height,
            time,
        }
    }

    /// Blank frame of default dimensions, used when frame-to-buffer
    /// conversion fails
    pub fn blank_default(time: MediaTime) -> Self {
        Self::blank(DEFAULT_WIDTH, DEFAULT_HEIGHT, time)
    }

    /// Expected buffer length for the frame's dimensions
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * BYTES_PER_PIXEL
    }

    /// Whether the buffer matches the declared dimensions
    pub fn is_well_formed(&self) -> bool {
        self.data.len() == self.expected_len()
    }
}

impl std::fmt::Debug for VideoFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Frame({}x{}, {} bytes, {:?})",
            self.width,
            self.height,
            self.data.len(),
            self.time
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_frame_dimensions() {
        let frame = VideoFrame::blank_default(MediaTime::start());
        assert_eq!(frame.width, DEFAULT_WIDTH);
        assert_eq!(frame.height, DEFAULT_HEIGHT);
        assert!(frame.is_well_formed());
        assert!(frame.data.iter().all(|b| *b == 0));
    }

    #[test]
    fn test_well_formed_check() {
        let frame = VideoFrame::new(Bytes::from(vec![0u8; 10]), 640, 480, MediaTime::start());
        assert!(!frame.is_well_formed());
    }
}
