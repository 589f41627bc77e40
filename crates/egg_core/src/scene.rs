//! Scene graph root for a parsed EGG document.
//!
//! Lookups here resolve the names that the binder leaves unresolved
//! (texture references, vertex pools). They search depth-first through
//! `data`, descending into `<Group>` members.

use serde::Serialize;

use crate::egg::{Group, Polygon, TextureGroup, Vertex, VertexPool};

/// Coordinate system assumed when a document does not declare one.
pub const DEFAULT_COORDINATE_SYSTEM: &str = "Z-Up";

/// A parsed EGG document.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EggScene {
    /// Value of `<CoordinateSystem>`
    pub coordinate_system: String,

    /// Text of `<Comment>`, if any
    pub comment: Option<String>,

    /// Top-level groups, in document order
    pub data: Vec<Group>,
}

impl Default for EggScene {
    fn default() -> Self {
        Self {
            coordinate_system: DEFAULT_COORDINATE_SYSTEM.to_string(),
            comment: None,
            data: Vec::new(),
        }
    }
}

impl EggScene {
    /// Iterate over every group depth-first, including group members.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        let mut stack: Vec<&Group> = self.data.iter().rev().collect();
        std::iter::from_fn(move || {
            let group = stack.pop()?;
            if let Group::Entity(entity) = group {
                stack.extend(entity.members.iter().rev());
            }
            Some(group)
        })
    }

    pub fn textures(&self) -> impl Iterator<Item = &TextureGroup> {
        self.groups().filter_map(|g| match g {
            Group::Texture(t) => Some(t),
            _ => None,
        })
    }

    pub fn vertex_pools(&self) -> impl Iterator<Item = &VertexPool> {
        self.groups().filter_map(|g| match g {
            Group::VertexPool(p) => Some(p),
            _ => None,
        })
    }

    pub fn polygons(&self) -> impl Iterator<Item = &Polygon> {
        self.groups().filter_map(|g| match g {
            Group::Polygon(p) => Some(p),
            _ => None,
        })
    }

    /// Find a texture by name.
    pub fn find_texture(&self, name: &str) -> Option<&TextureGroup> {
        self.textures().find(|t| t.name == name)
    }

    /// Find a vertex pool by name.
    pub fn find_vertex_pool(&self, name: &str) -> Option<&VertexPool> {
        self.vertex_pools().find(|p| p.name == name)
    }

    /// Total number of polygons in the scene.
    pub fn polygon_count(&self) -> usize {
        self.polygons().count()
    }
}

impl Polygon {
    /// Resolve the referenced texture in `scene`.
    pub fn texture<'a>(&self, scene: &'a EggScene) -> Option<&'a TextureGroup> {
        scene.find_texture(self.texture_ref.as_deref()?)
    }

    /// Resolve the referenced vertices in `scene`, in reference order.
    ///
    /// Indices missing from the pool are skipped; an unknown pool yields an
    /// empty list.
    pub fn vertices<'a>(&self, scene: &'a EggScene) -> Vec<&'a Vertex> {
        let Some(vertex_ref) = &self.vertex_ref else {
            return Vec::new();
        };
        let Some(pool) = scene.find_vertex_pool(&vertex_ref.pool) else {
            log::debug!("Vertex pool {} not found", vertex_ref.pool);
            return Vec::new();
        };

        vertex_ref
            .indices
            .iter()
            .filter_map(|&index| pool.vertex(index))
            .collect()
    }
}
