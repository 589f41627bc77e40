//! EGG support.
//!
//! This module parses the Panda3D EGG text format into a typed scene graph
//! in three passes:
//!
//! 1. `lexer`: text → tokens
//! 2. `entry`: tokens → generic `Entry` tree
//! 3. `binder`: `Entry` tree → `Group` variants
//!
//! ## Recognized entries
//!
//! - `<Group>`, `<Texture>`, `<VertexPool>`, `<Vertex>`, `<Polygon>`
//! - `<Table>`, `<Bundle>`, `<S$Anim>`, `<Xfm$Anim_S$>`, `<Xfm$Anim>`
//! - `<Joint>` with `<Transform>` / `<DefaultPose>` matrices
//! - `<CoordinateSystem>` and `<Comment>` at the top level
//!
//! Anything else becomes a `GenericGroup`.
//!
//! ## Not Supported
//!
//! - Writing EGG files
//! - Validating references (pool indices, texture names)
//! - `<Instance>`, `<Switch>` and other group flavours beyond `<Group>`
//!
//! # Example
//!
//! ```ignore
//! use egg_core::egg::load_egg;
//!
//! let scene = load_egg("path/to/model.egg")?;
//! println!("Loaded {} polygons", scene.polygon_count());
//! ```

mod binder;
mod entry;
mod error;
mod lexer;
mod loader;
mod token;
mod types;

pub use binder::{bind, bind_all, bind_scene};
pub use entry::{build, build_with, BuildOptions, Entry, EntryTreeBuilder, TokenCursor};
pub use error::{ErrorKind, ParseError, ParseResult};
pub use lexer::{scan, split_scalars, Lexer};
pub use loader::*;
pub use token::{Span, Token, TokenKind};
pub use types::*;
