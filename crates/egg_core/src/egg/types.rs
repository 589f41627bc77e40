//! Typed EGG groups.
//!
//! These types are the bound form of the generic entry tree. Cross-references
//! (`Polygon::texture_ref`, `VertexReference::pool`) are kept as names and are
//! resolved by lookups on [`EggScene`](crate::scene::EggScene).

use egg_math::{FrameTable, Mat4, Mat4Ext, Vec3};
use serde::Serialize;

/// A bound EGG group.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Group {
    /// An entry type the binder does not model
    Generic(GenericGroup),

    /// `<Group>`: a node holding polygons, pools and further groups
    Entity(EntityGroup),

    /// `<Texture>`
    Texture(TextureGroup),

    /// `<VertexPool>`
    VertexPool(VertexPool),

    /// `<Vertex>`
    Vertex(Vertex),

    /// `<Polygon>`
    Polygon(Polygon),

    /// `<Table>`
    Table(Table),

    /// `<Bundle>`
    Bundle(Bundle),

    /// `<S$Anim>`, `<Xfm$Anim_S$>` or `<Xfm$Anim>`
    Animation(Animation),

    /// `<Joint>`
    Joint(Joint),
}

impl Group {
    /// Entry name of the group.
    pub fn name(&self) -> &str {
        match self {
            Group::Generic(g) => &g.name,
            Group::Entity(g) => &g.name,
            Group::Texture(g) => &g.name,
            Group::VertexPool(g) => &g.name,
            Group::Vertex(g) => &g.name,
            Group::Polygon(g) => &g.name,
            Group::Table(g) => &g.name,
            Group::Bundle(g) => &g.name,
            Group::Animation(a) => a.name(),
            Group::Joint(g) => &g.name,
        }
    }

    /// Scalar value carried by the group (only set for generic groups).
    pub fn value(&self) -> &str {
        match self {
            Group::Generic(g) => &g.value,
            Group::Entity(g) => &g.value,
            Group::Texture(g) => &g.value,
            Group::VertexPool(g) => &g.value,
            Group::Vertex(g) => &g.value,
            Group::Polygon(g) => &g.value,
            Group::Table(g) => &g.value,
            Group::Bundle(g) => &g.value,
            Group::Animation(a) => a.value(),
            Group::Joint(g) => &g.value,
        }
    }
}

/// Fallback for unrecognized entry types.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GenericGroup {
    pub name: String,
    /// First scalar value of the entry, or empty
    pub value: String,
    /// The entry type, e.g. `Scalar` or `Comment`
    pub type_name: String,
}

/// A `<Group>` node.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EntityGroup {
    pub name: String,
    pub value: String,

    /// `<Dart>` mode, `structured` unless given
    pub dart: String,

    /// `<ObjectType>`, empty unless given
    pub object_type: String,

    /// Set when the group has a `<Collide>` child
    pub is_collision: bool,

    /// First value of the `<Collide>` child, e.g. `Polyset`
    pub collision_type: String,

    /// Child groups, in document order
    pub members: Vec<Group>,
}

impl Default for EntityGroup {
    fn default() -> Self {
        Self {
            name: String::new(),
            value: String::new(),
            dart: "structured".to_string(),
            object_type: String::new(),
            is_collision: false,
            collision_type: String::new(),
            members: Vec::new(),
        }
    }
}

/// A texture reference.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TextureGroup {
    pub name: String,
    pub value: String,

    /// Path to the texture file as written in the document
    pub filepath: String,

    /// Settings such as `<Scalar> wrapu { repeat }`, bound like any other group
    pub scalars: Vec<Group>,
}

/// A named collection of vertices.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct VertexPool {
    pub name: String,
    pub value: String,

    /// Vertices in document order
    pub references: Vec<Vertex>,
}

impl VertexPool {
    /// Find a vertex by its document index.
    pub fn vertex(&self, index: i32) -> Option<&Vertex> {
        self.references.iter().find(|v| v.index == index)
    }
}

/// A vertex of a [`VertexPool`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Vertex {
    pub name: String,
    pub value: String,

    /// Index as written in the document; not checked for gaps or duplicates
    pub index: i32,

    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,

    pub uv: Option<VertexUV>,
    pub rgba: Option<VertexRGBA>,
    pub normal: Option<VertexNormal>,
}

impl Vertex {
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Texture coordinates of a vertex.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct VertexUV {
    pub u: f64,
    pub v: f64,
    pub w: f64,
}

/// Vertex color.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct VertexRGBA {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Default for VertexRGBA {
    fn default() -> Self {
        Self {
            r: 1.0,
            g: 1.0,
            b: 1.0,
            a: 1.0,
        }
    }
}

/// Vertex normal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct VertexNormal {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl VertexNormal {
    pub fn to_vec3(&self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

/// A polygon referencing vertices and, optionally, a texture by name.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Polygon {
    pub name: String,
    pub value: String,

    /// Name of a [`TextureGroup`] in the same document
    pub texture_ref: Option<String>,

    pub vertex_ref: Option<VertexReference>,
}

/// Indices into a named [`VertexPool`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct VertexReference {
    /// Values matching [`Vertex::index`] in the pool
    pub indices: Vec<i32>,

    /// Name of the pool; may be defined later in the document
    pub pool: String,
}

/// An animation table.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Table {
    pub name: String,
    pub value: String,
    pub tables: Vec<Table>,
    pub bundles: Vec<Bundle>,
    pub animations: Vec<Animation>,
}

/// A character bundle; holds tables only.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Bundle {
    pub name: String,
    pub value: String,
    pub tables: Vec<Table>,
}

/// Animation data found inside a [`Table`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Animation {
    /// `<Xfm$Anim_S$>`: per-component curves
    XfmS(XfmAnimationS),

    /// `<S$Anim>`: a single component curve
    S(SAnimation),

    /// `<Xfm$Anim>`: one row of components per frame
    Xfm(XfmAnimation),
}

impl Animation {
    pub fn name(&self) -> &str {
        match self {
            Animation::XfmS(a) => &a.name,
            Animation::S(a) => &a.name,
            Animation::Xfm(a) => &a.name,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Animation::XfmS(a) => &a.value,
            Animation::S(a) => &a.value,
            Animation::Xfm(a) => &a.value,
        }
    }

    /// Frames per second, for the kinds that carry one.
    pub fn fps(&self) -> Option<u32> {
        match self {
            Animation::XfmS(a) => Some(a.fps),
            Animation::S(_) => None,
            Animation::Xfm(a) => Some(a.fps),
        }
    }
}

/// Default frame rate of transform animations.
pub const DEFAULT_FPS: u32 = 24;

/// Default component order of `<Xfm$Anim>`.
pub const DEFAULT_ORDER: [char; 5] = ['s', 'p', 'r', 'h', 't'];

/// Default component columns of `<Xfm$Anim>`.
pub const DEFAULT_CONTENTS: [char; 9] = ['i', 'j', 'k', 'p', 'r', 'h', 'x', 'y', 'z'];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct XfmAnimationS {
    pub name: String,
    pub value: String,
    pub fps: u32,
    pub animations: Vec<SAnimation>,
}

impl Default for XfmAnimationS {
    fn default() -> Self {
        Self {
            name: String::new(),
            value: String::new(),
            fps: DEFAULT_FPS,
            animations: Vec::new(),
        }
    }
}

impl XfmAnimationS {
    /// Curve for one component letter, e.g. `'x'` or `'h'`.
    pub fn channel(&self, variable: char) -> Option<&SAnimation> {
        self.animations.iter().find(|a| a.variable == variable)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SAnimation {
    pub name: String,
    pub value: String,

    /// Component letter: `ijk` scale, `prh` rotation, `xyz` translation
    pub variable: char,

    /// One value per frame
    pub values: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct XfmAnimation {
    pub name: String,
    pub value: String,
    pub fps: u32,

    /// Order in which the components are composed
    pub order: Vec<char>,

    pub contents: Vec<char>,

    /// One row per frame, `order.len()` columns
    pub frames: FrameTable,
}

impl Default for XfmAnimation {
    fn default() -> Self {
        Self {
            name: String::new(),
            value: String::new(),
            fps: DEFAULT_FPS,
            order: DEFAULT_ORDER.to_vec(),
            contents: DEFAULT_CONTENTS.to_vec(),
            frames: FrameTable::default(),
        }
    }
}

/// A skeleton joint.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Joint {
    pub name: String,
    pub value: String,

    /// Child joints
    pub joints: Vec<Joint>,

    /// Current transform
    pub transform: Option<Transform>,

    /// Rest position
    pub default_pose: Option<Transform>,
}

impl Joint {
    /// Visit this joint and all descendants depth-first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Joint)) {
        visit(self);
        for joint in &self.joints {
            joint.walk(visit);
        }
    }
}

/// A 4x4 transform as written in a `<Matrix4>` entry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Transform {
    pub matrix: Mat4,
}

impl Default for Transform {
    fn default() -> Self {
        Self { matrix: Mat4::ZERO }
    }
}

impl Transform {
    /// Build from 16 values in document (row-major) order.
    pub fn from_row_major(values: &[f32; 16]) -> Self {
        Self {
            matrix: Mat4::from_row_major(values),
        }
    }

    /// Rows as written in the document.
    pub fn rows(&self) -> [[f32; 4]; 4] {
        self.matrix.to_rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let group = EntityGroup::default();
        assert_eq!(group.dart, "structured");
        assert!(!group.is_collision);

        let rgba = VertexRGBA::default();
        assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (1.0, 1.0, 1.0, 1.0));

        let anim = XfmAnimation::default();
        assert_eq!(anim.fps, 24);
        assert_eq!(anim.order, vec!['s', 'p', 'r', 'h', 't']);

        assert_eq!(Transform::default().matrix, Mat4::ZERO);
    }

    #[test]
    fn test_group_base_accessors() {
        let generic = Group::Generic(GenericGroup {
            name: "wrapu".to_string(),
            value: "repeat".to_string(),
            type_name: "Scalar".to_string(),
        });
        assert_eq!(generic.name(), "wrapu");
        assert_eq!(generic.value(), "repeat");

        let anim = Group::Animation(Animation::S(SAnimation {
            name: "x".to_string(),
            value: String::new(),
            variable: 'x',
            values: vec![0.0],
        }));
        assert_eq!(anim.name(), "x");
    }

    #[test]
    fn test_pool_vertex_lookup() {
        let pool = VertexPool {
            references: vec![
                Vertex { index: 4, x: 1.0, ..Default::default() },
                Vertex { index: 7, y: 2.0, ..Default::default() },
            ],
            ..Default::default()
        };

        assert_eq!(pool.vertex(7).map(|v| v.y), Some(2.0));
        assert!(pool.vertex(0).is_none());
    }

    #[test]
    fn test_transform_rows() {
        let values: [f32; 16] = std::array::from_fn(|i| i as f32);
        let transform = Transform::from_row_major(&values);

        assert_eq!(transform.rows()[1], [4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_joint_walk() {
        let skeleton = Joint {
            name: "root".to_string(),
            joints: vec![
                Joint {
                    name: "spine".to_string(),
                    joints: vec![Joint { name: "head".to_string(), ..Default::default() }],
                    ..Default::default()
                },
                Joint { name: "hip".to_string(), ..Default::default() },
            ],
            ..Default::default()
        };

        let mut names = Vec::new();
        skeleton.walk(&mut |j| names.push(j.name.as_str()));
        assert_eq!(names, vec!["root", "spine", "head", "hip"]);
    }
}
