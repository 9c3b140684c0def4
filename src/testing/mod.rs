//! Testing utilities for tonguecam
//!
//! Synthetic captures reproducing the typical outcomes of the capture
//! screen: dark rooms, defocused shots, frames without a tongue, and a
//! well-framed tongue.

pub mod synthetic_data;

pub use synthetic_data::{
    checkerboard_frame, darken, target_blob_frame, uniform_frame, BACKGROUND_LEVELS,
    TARGET_COLOR,
};
