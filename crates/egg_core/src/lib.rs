//! EGG Core - Scene graph and EGG parsing for Panda3D model files.
//!
//! This crate provides:
//!
//! - **EGG parsing**: lexer, entry tree builder and binder
//! - **Scene graph types**: `EggScene`, `Group` and its variants
//!
//! # Example
//!
//! ```ignore
//! use egg_core::egg::load_egg;
//!
//! // Load an EGG model
//! let scene = load_egg("model.egg")?;
//! println!("Loaded {} groups, {} polygons",
//!     scene.data.len(),
//!     scene.polygon_count());
//! ```

pub mod egg;
pub mod scene;

// Re-export commonly used types
pub use egg::{load_egg, load_eggs, parse_egg, parse_egg_with, Group, ParseError, ParseResult};
pub use scene::EggScene;
