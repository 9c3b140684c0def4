//! Frame producers
//!
//! Acquisition and decoding happen here, before validation starts: a
//! [`FrameSource`] hands out fully decoded frames and the pipeline never
//! waits on a decode callback.

use crate::errors::CaptureCheckError;
use crate::types::Frame;
use std::collections::VecDeque;
use std::path::PathBuf;

/// Anything that can produce decoded frames (camera wrapper, file, test data).
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Frame, CaptureCheckError>;
}

/// Decodes a still image file on every call.
#[derive(Debug, Clone)]
pub struct ImageFileSource {
    path: PathBuf,
}

impl ImageFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FrameSource for ImageFileSource {
    fn next_frame(&mut self) -> Result<Frame, CaptureCheckError> {
        let bytes = std::fs::read(&self.path)?;
        let frame = Frame::decode(&bytes)?;
        log::debug!(
            "Decoded {:?} into {}x{} frame",
            self.path,
            frame.width(),
            frame.height()
        );
        Ok(frame)
    }
}

/// Yields pre-built frames in order, then reports exhaustion.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    frames: VecDeque<Frame>,
}

impl MemorySource {
    pub fn new(frames: impl IntoIterator<Item = Frame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for MemorySource {
    fn next_frame(&mut self) -> Result<Frame, CaptureCheckError> {
        self.frames.pop_front().ok_or_else(|| {
            CaptureCheckError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "memory source exhausted",
            ))
        })
    }
}
