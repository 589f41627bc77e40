// Re-export glam for convenience
pub use glam::*;

// EGG math types
mod frames;
mod matrix;
pub use frames::FrameTable;
pub use matrix::Mat4Ext;
