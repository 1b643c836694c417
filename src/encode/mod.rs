//! Output sinks for finished frame sequences.

/// Replays delta frames into full RGBA images.
pub mod composite;
/// Animated GIF output.
pub mod gif;
/// PNG image-sequence output.
pub mod png;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
