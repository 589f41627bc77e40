//! Binds generic entries to typed EGG groups.
//!
//! Binding is a pure bottom-up fold: each entry is turned into a group by
//! looking only at its own fields and children. Named references are copied
//! through as strings and never resolved here, so a polygon may name a pool
//! or texture defined later in the document (or not at all).

use std::str::FromStr;

use super::entry::Entry;
use super::error::{ParseError, ParseResult};
use super::types::*;
use crate::scene::EggScene;

/// Bind a single entry and its children.
pub fn bind(entry: &Entry) -> ParseResult<Group> {
    log::trace!("Binding <{}> {}", entry.type_name, entry.name);

    match entry.type_name.as_str() {
        "Group" => bind_entity_group(entry).map(Group::Entity),
        "Texture" => bind_texture(entry).map(Group::Texture),
        "VertexPool" => bind_vertex_pool(entry).map(Group::VertexPool),
        "Vertex" => bind_vertex(entry).map(Group::Vertex),
        "Polygon" => bind_polygon(entry).map(Group::Polygon),
        "Table" => bind_table(entry).map(Group::Table),
        "Bundle" => bind_bundle(entry).map(Group::Bundle),
        "S$Anim" | "Xfm$Anim_S$" | "Xfm$Anim" => bind_animation(entry).map(Group::Animation),
        "Joint" => bind_joint(entry).map(Group::Joint),
        _ => Ok(Group::Generic(bind_generic(entry))),
    }
}

/// Bind a list of entries, in order.
pub fn bind_all(entries: &[Entry]) -> ParseResult<Vec<Group>> {
    entries.iter().map(bind).collect()
}

/// Bind the top-level entries of a document into a scene.
///
/// `<CoordinateSystem>` and `<Comment>` fill the scene header; every other
/// entry is bound into `data`.
pub fn bind_scene(entries: &[Entry]) -> ParseResult<EggScene> {
    let mut scene = EggScene::default();

    for entry in entries {
        // Header types are matched without case, the same way the lexer
        // recognizes them as nameless
        match entry.type_name.to_lowercase().as_str() {
            "coordinatesystem" => match header_text(entry) {
                Some(system) => scene.coordinate_system = system,
                None => log::warn!(
                    "Empty <CoordinateSystem> at line {}, keeping {}",
                    entry.line,
                    scene.coordinate_system
                ),
            },
            "comment" => {
                let text = header_text(entry).unwrap_or_default();
                scene.comment = Some(match scene.comment.take() {
                    Some(previous) => format!("{}\n{}", previous, text),
                    None => text,
                });
            }
            _ => scene.data.push(bind(entry)?),
        }
    }

    log::debug!("Bound {} top-level groups", scene.data.len());
    Ok(scene)
}

/// Text of a header entry: the quoted form if present, else the values.
fn header_text(entry: &Entry) -> Option<String> {
    if !entry.filepath.is_empty() {
        return Some(entry.filepath.clone());
    }
    if entry.values.is_empty() {
        return None;
    }
    Some(entry.values.join(" "))
}

fn bind_generic(entry: &Entry) -> GenericGroup {
    GenericGroup {
        name: entry.name.clone(),
        value: entry.first_value().unwrap_or_default().to_string(),
        type_name: entry.type_name.clone(),
    }
}

fn bind_entity_group(entry: &Entry) -> ParseResult<EntityGroup> {
    let mut group = EntityGroup {
        name: entry.name.clone(),
        ..Default::default()
    };

    if let Some(dart) = entry.child("Dart") {
        group.dart = first_value(dart, "a dart mode")?.to_string();
    }
    if let Some(object_type) = entry.child("ObjectType") {
        group.object_type = first_value(object_type, "an object type")?.to_string();
    }
    if let Some(collide) = entry.child("Collide") {
        group.is_collision = true;
        group.collision_type = first_value(collide, "a collision type")?.to_string();
    }

    for child in &entry.children {
        if child.type_name == "Dart" || child.type_name == "ObjectType" {
            continue;
        }
        group.members.push(bind(child)?);
    }

    Ok(group)
}

fn bind_texture(entry: &Entry) -> ParseResult<TextureGroup> {
    Ok(TextureGroup {
        name: entry.name.clone(),
        filepath: entry.filepath.clone(),
        scalars: bind_all(&entry.children)?,
        ..Default::default()
    })
}

fn bind_vertex_pool(entry: &Entry) -> ParseResult<VertexPool> {
    Ok(VertexPool {
        name: entry.name.clone(),
        references: entry
            .children_of("Vertex")
            .map(bind_vertex)
            .collect::<ParseResult<_>>()?,
        ..Default::default()
    })
}

fn bind_vertex(entry: &Entry) -> ParseResult<Vertex> {
    let values = require_values(entry, 3, "x, y and z")?;

    let w = match values.get(3) {
        Some(w) => parse_number(entry, w, "float")?,
        None => 0.0,
    };

    Ok(Vertex {
        name: entry.name.clone(),
        index: parse_number(entry, &entry.name, "integer")?,
        x: parse_number(entry, &values[0], "float")?,
        y: parse_number(entry, &values[1], "float")?,
        z: parse_number(entry, &values[2], "float")?,
        w,
        uv: entry.child("UV").map(bind_uv).transpose()?,
        rgba: entry.child("RGBA").map(bind_rgba).transpose()?,
        normal: entry.child("Normal").map(bind_normal).transpose()?,
        ..Default::default()
    })
}

fn bind_uv(entry: &Entry) -> ParseResult<VertexUV> {
    let values = require_values(entry, 2, "u and v")?;

    let w = match values.get(2) {
        Some(w) => parse_number(entry, w, "float")?,
        None => 0.0,
    };

    Ok(VertexUV {
        u: parse_number(entry, &values[0], "float")?,
        v: parse_number(entry, &values[1], "float")?,
        w,
    })
}

fn bind_rgba(entry: &Entry) -> ParseResult<VertexRGBA> {
    let values = require_values(entry, 4, "r, g, b and a")?;

    Ok(VertexRGBA {
        r: parse_number(entry, &values[0], "float")?,
        g: parse_number(entry, &values[1], "float")?,
        b: parse_number(entry, &values[2], "float")?,
        a: parse_number(entry, &values[3], "float")?,
    })
}

fn bind_normal(entry: &Entry) -> ParseResult<VertexNormal> {
    let values = require_values(entry, 3, "x, y and z")?;

    Ok(VertexNormal {
        x: parse_number(entry, &values[0], "float")?,
        y: parse_number(entry, &values[1], "float")?,
        z: parse_number(entry, &values[2], "float")?,
    })
}

fn bind_polygon(entry: &Entry) -> ParseResult<Polygon> {
    let texture_ref = match entry.child("TRef") {
        Some(tref) => Some(first_value(tref, "a texture name")?.to_string()),
        None => None,
    };

    Ok(Polygon {
        name: entry.name.clone(),
        texture_ref,
        vertex_ref: entry
            .child("VertexRef")
            .map(bind_vertex_reference)
            .transpose()?,
        ..Default::default()
    })
}

fn bind_vertex_reference(entry: &Entry) -> ParseResult<VertexReference> {
    let indices = parse_all(entry, &entry.values, "integer")?;

    // The pool name is the first value of the first child, whatever its type
    let pool_entry = entry
        .children
        .first()
        .ok_or_else(|| missing(entry, "a pool reference"))?;

    Ok(VertexReference {
        indices,
        pool: first_value(pool_entry, "a pool name")?.to_string(),
    })
}

fn bind_table(entry: &Entry) -> ParseResult<Table> {
    let mut table = Table {
        name: entry.name.clone(),
        ..Default::default()
    };

    for child in &entry.children {
        match child.type_name.as_str() {
            "Table" => table.tables.push(bind_table(child)?),
            "Bundle" => table.bundles.push(bind_bundle(child)?),
            "Xfm$Anim_S$" | "S$Anim" | "Xfm$Anim" => table.animations.push(bind_animation(child)?),
            _ => {}
        }
    }

    Ok(table)
}

fn bind_bundle(entry: &Entry) -> ParseResult<Bundle> {
    Ok(Bundle {
        name: entry.name.clone(),
        tables: entry
            .children_of("Table")
            .map(bind_table)
            .collect::<ParseResult<_>>()?,
        ..Default::default()
    })
}

fn bind_animation(entry: &Entry) -> ParseResult<Animation> {
    match entry.type_name.as_str() {
        "Xfm$Anim_S$" => bind_xfm_animation_s(entry).map(Animation::XfmS),
        "Xfm$Anim" => bind_xfm_animation(entry).map(Animation::Xfm),
        _ => bind_s_animation(entry).map(Animation::S),
    }
}

fn bind_s_animation(entry: &Entry) -> ParseResult<SAnimation> {
    let variable = entry
        .name
        .chars()
        .next()
        .ok_or_else(|| missing(entry, "a component name"))?;

    let values = match entry.child("V") {
        Some(v) => parse_all(v, &v.values, "float")?,
        None => Vec::new(),
    };

    Ok(SAnimation {
        name: entry.name.clone(),
        value: String::new(),
        variable,
        values,
    })
}

fn bind_xfm_animation_s(entry: &Entry) -> ParseResult<XfmAnimationS> {
    Ok(XfmAnimationS {
        name: entry.name.clone(),
        value: String::new(),
        fps: bind_fps(entry)?,
        animations: entry
            .children_of("S$Anim")
            .map(bind_s_animation)
            .collect::<ParseResult<_>>()?,
    })
}

fn bind_xfm_animation(entry: &Entry) -> ParseResult<XfmAnimation> {
    let order = match setting(entry, "order") {
        Some(order) => first_value(order, "a component order")?.chars().collect(),
        None => DEFAULT_ORDER.to_vec(),
    };
    let contents = match setting(entry, "contents") {
        Some(contents) => first_value(contents, "component contents")?.chars().collect(),
        None => DEFAULT_CONTENTS.to_vec(),
    };

    // Exporters usually nest the table in <V>; older files put it in the body
    let raw = match entry.child("V") {
        Some(v) if entry.values.is_empty() => &v.values,
        _ => &entry.values,
    };
    let values: Vec<f32> = parse_all(entry, raw, "float")?;

    let columns = order.len();
    if columns > 0 && values.len() % columns != 0 {
        log::warn!(
            "<Xfm$Anim> {} has {} values, not a multiple of {}; dropping the partial frame",
            entry.name,
            values.len(),
            columns
        );
    }

    Ok(XfmAnimation {
        name: entry.name.clone(),
        value: String::new(),
        fps: bind_fps(entry)?,
        frames: egg_math::FrameTable::from_row_major(columns, values),
        order,
        contents,
    })
}

/// `<Scalar> fps { n }`, or the default rate.
fn bind_fps(entry: &Entry) -> ParseResult<u32> {
    match entry.named_child("Scalar", "fps") {
        Some(fps) => parse_number(fps, first_value(fps, "a frame rate")?, "integer"),
        None => Ok(DEFAULT_FPS),
    }
}

/// A named animation setting, written as `<Scalar>` or `<Char*>`.
fn setting<'a>(entry: &'a Entry, name: &str) -> Option<&'a Entry> {
    entry
        .named_child("Scalar", name)
        .or_else(|| entry.named_child("Char*", name))
}

fn bind_joint(entry: &Entry) -> ParseResult<Joint> {
    Ok(Joint {
        name: entry.name.clone(),
        value: String::new(),
        joints: entry
            .children_of("Joint")
            .map(bind_joint)
            .collect::<ParseResult<_>>()?,
        transform: bind_matrix(entry.child("Transform"))?,
        default_pose: bind_matrix(entry.child("DefaultPose"))?,
    })
}

/// Read the `<Matrix4>` nested in a `<Transform>` or `<DefaultPose>`.
///
/// A matrix without exactly 16 values yields the zero transform.
fn bind_matrix(holder: Option<&Entry>) -> ParseResult<Option<Transform>> {
    let Some(matrix) = holder.and_then(|h| h.child("Matrix4")) else {
        return Ok(None);
    };

    if matrix.values.len() != 16 {
        log::warn!(
            "<Matrix4> at line {} has {} values, expected 16; using a zero matrix",
            matrix.line,
            matrix.values.len()
        );
        return Ok(Some(Transform::default()));
    }

    let mut cells = [0.0f32; 16];
    for (cell, value) in cells.iter_mut().zip(&matrix.values) {
        *cell = parse_number(matrix, value, "float")?;
    }

    Ok(Some(Transform::from_row_major(&cells)))
}

fn parse_number<T: FromStr>(entry: &Entry, value: &str, expected: &'static str) -> ParseResult<T> {
    value.parse::<T>().map_err(|_| ParseError::InvalidNumber {
        entry: entry.type_name.clone(),
        value: value.to_string(),
        expected,
    })
}

fn parse_all<T: FromStr>(entry: &Entry, values: &[String], expected: &'static str) -> ParseResult<Vec<T>> {
    values
        .iter()
        .map(|v| parse_number(entry, v, expected))
        .collect()
}

fn first_value<'a>(entry: &'a Entry, what: &str) -> ParseResult<&'a str> {
    entry.first_value().ok_or_else(|| missing(entry, what))
}

fn require_values<'a>(entry: &'a Entry, count: usize, what: &str) -> ParseResult<&'a [String]> {
    if entry.values.len() < count {
        return Err(missing(entry, &format!("{} ({} of {} values)", what, entry.values.len(), count)));
    }
    Ok(&entry.values)
}

fn missing(entry: &Entry, what: &str) -> ParseError {
    ParseError::MissingValue {
        entry: entry.type_name.clone(),
        what: what.to_string(),
    }
}
