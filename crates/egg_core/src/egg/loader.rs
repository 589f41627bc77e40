//! High-level EGG loading.
//!
//! This module provides the entry points that run the whole pipeline:
//! text → tokens → entry tree → scene graph.

use std::path::Path;

use rayon::prelude::*;

use crate::egg::binder::bind_scene;
use crate::egg::entry::{build_with, BuildOptions};
use crate::egg::error::ParseResult;
use crate::egg::lexer::scan;
use crate::scene::EggScene;

/// Parse an EGG document held in memory.
///
/// # Example
///
/// ```ignore
/// use egg_core::egg::parse_egg;
///
/// let scene = parse_egg("<Group> root { }")?;
/// assert_eq!(scene.data.len(), 1);
/// ```
pub fn parse_egg(content: &str) -> ParseResult<EggScene> {
    parse_egg_with(content, BuildOptions::default())
}

/// Parse an EGG document with explicit tree-building options.
pub fn parse_egg_with(content: &str, options: BuildOptions) -> ParseResult<EggScene> {
    let tokens = scan(content)?;
    let entries = build_with(tokens, options)?;
    bind_scene(&entries)
}

/// Load an EGG file from disk.
pub fn load_egg<P: AsRef<Path>>(path: P) -> ParseResult<EggScene> {
    let path = path.as_ref();
    log::info!("Loading EGG file {}", path.display());

    let content = std::fs::read_to_string(path)?;
    let content = content.strip_prefix('\u{FEFF}').unwrap_or(&content);
    let scene = parse_egg(content)?;

    log::info!(
        "Loaded {} top-level groups, {} polygons from {}",
        scene.data.len(),
        scene.polygon_count(),
        path.display()
    );
    Ok(scene)
}

/// Load several EGG files in parallel.
///
/// Each document is parsed independently; results come back in input order.
pub fn load_eggs<P: AsRef<Path> + Sync>(paths: &[P]) -> Vec<ParseResult<EggScene>> {
    paths.par_iter().map(|path| load_egg(path)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::egg::error::{ErrorKind, ParseError};
    use crate::egg::types::Group;

    #[test]
    fn test_parse_simple_model() {
        let egg = r#"
<CoordinateSystem> { Z-Up }

<Texture> wood {
  "maps/wood.png"
  <Scalar> wrapu { repeat }
}

<Group> box {
  <VertexPool> box.verts {
    <Vertex> 0 { 0 0 0 <UV> { 0 0 } }
    <Vertex> 1 { 1 0 0 <UV> { 1 0 } }
    <Vertex> 2 { 1 1 0 <UV> { 1 1 } }
  }
  <Polygon> {
    <TRef> { wood }
    <VertexRef> { 0 1 2 <Ref> { box.verts } }
  }
}
"#;

        let scene = parse_egg(egg).unwrap();
        assert_eq!(scene.coordinate_system, "Z-Up");
        assert_eq!(scene.data.len(), 2);

        let polygon = scene.polygons().next().unwrap();
        assert_eq!(polygon.texture(&scene).unwrap().filepath, "maps/wood.png");
        assert_eq!(polygon.vertices(&scene).len(), 3);
    }

    #[test]
    fn test_format_error_leaves_no_scene() {
        let err = parse_egg("<Group> G { }\n#").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_unclosed_entry_option() {
        let egg = "<Group> G { <Polygon> { }";

        let err = parse_egg(egg).unwrap_err();
        assert!(matches!(err, ParseError::UnclosedEntry { .. }));

        let scene = parse_egg_with(egg, BuildOptions { allow_unclosed: true }).unwrap();
        assert!(matches!(&scene.data[0], Group::Entity(g) if g.members.len() == 1));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_egg("definitely/not/here.egg").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_load_egg_skips_byte_order_mark() {
        let dir = std::env::temp_dir().join(format!("egg_core_bom_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let path = dir.join("bom.egg");
        std::fs::write(&path, "\u{FEFF}<Group> g { }").unwrap();

        let result = load_egg(&path);
        std::fs::remove_dir_all(&dir).ok();

        let scene = result.unwrap();
        assert_eq!(scene.data.len(), 1);
        assert_eq!(scene.data[0].name(), "g");
    }

    #[test]
    fn test_load_eggs_keeps_order() {
        let dir = std::env::temp_dir().join(format!("egg_core_load_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let first = dir.join("first.egg");
        let second = dir.join("second.egg");
        std::fs::write(&first, "<Group> first { }").unwrap();
        std::fs::write(&second, "<Group> second { }").unwrap();
        let missing = dir.join("missing.egg");

        let results = load_eggs(&[first, missing, second]);
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().data[0].name(), "first");
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().data[0].name(), "second");
    }
}
