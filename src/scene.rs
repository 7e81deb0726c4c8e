//! Scene graph the gameplay core binds to
//!
//! A flat table of named transforms plus the drawables and cameras that
//! reference them. The core resolves names to `TransformId`s once at load
//! and never holds references into the table.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Index into `Scene::transforms`
pub type TransformId = usize;

/// A named position/rotation/scale node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub name: String,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Local +X axis in world space
    #[inline]
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }
}

/// Something the renderer draws at a transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drawable {
    pub transform: TransformId,
}

/// Perspective camera attached to a transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub transform: TransformId,
    /// Vertical field of view (radians)
    pub fovy: f32,
    pub aspect: f32,
    pub near: f32,
}

impl Camera {
    pub fn new(transform: TransformId) -> Self {
        Self {
            transform,
            fovy: 60.0_f32.to_radians(),
            aspect: 1.0,
            near: 0.01,
        }
    }
}

/// Owned entity table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    pub transforms: Vec<Transform>,
    pub drawables: Vec<Drawable>,
    pub cameras: Vec<Camera>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transform and return its handle
    pub fn add_transform(&mut self, transform: Transform) -> TransformId {
        self.transforms.push(transform);
        self.transforms.len() - 1
    }

    /// Add a transform together with a drawable for it
    pub fn add_drawable(&mut self, transform: Transform) -> TransformId {
        let id = self.add_transform(transform);
        self.drawables.push(Drawable { transform: id });
        id
    }

    /// Add a camera on a new transform
    pub fn add_camera(&mut self, transform: Transform) -> TransformId {
        let id = self.add_transform(transform);
        self.cameras.push(Camera::new(id));
        id
    }

    pub fn transform(&self, id: TransformId) -> &Transform {
        &self.transforms[id]
    }

    pub fn transform_mut(&mut self, id: TransformId) -> &mut Transform {
        &mut self.transforms[id]
    }

    /// All transforms with exactly this name
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = TransformId> + 'a {
        self.transforms
            .iter()
            .enumerate()
            .filter(move |(_, t)| t.name == name)
            .map(|(id, _)| id)
    }

    /// First transform with exactly this name
    pub fn find(&self, name: &str) -> Option<TransformId> {
        self.find_all(name).next()
    }

    /// Transforms whose name starts with `prefix`, in table order
    pub fn with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = TransformId> + 'a {
        self.transforms
            .iter()
            .enumerate()
            .filter(move |(_, t)| t.name.starts_with(prefix))
            .map(|(id, _)| id)
    }

    /// Drop every drawable whose transform carries `name`; returns how many went
    pub fn remove_drawables_named(&mut self, name: &str) -> usize {
        let before = self.drawables.len();
        let transforms = &self.transforms;
        self.drawables.retain(|d| transforms[d.transform].name != name);
        before - self.drawables.len()
    }

    /// Whether a drawable for `name` is still rendered
    pub fn is_drawn(&self, name: &str) -> bool {
        self.drawables
            .iter()
            .any(|d| self.transforms[d.transform].name == name)
    }

    /// Standard garden: dirt patch, opossum, 10 cabbages, 10 carrots, one camera.
    ///
    /// Foods sit on a 5x4 grid with alternating rows of cabbages and carrots;
    /// the opossum starts below the grid.
    pub fn demo_garden(settings: &Settings) -> Self {
        let names = &settings.names;
        let mut scene = Scene::new();

        scene.add_drawable(Transform::new(names.bounds.as_str(), Vec3::ZERO));
        scene.add_drawable(Transform::new(
            names.player.as_str(),
            Vec3::new(0.0, -80.0, 0.0),
        ));

        let columns = [-100.0, -50.0, 0.0, 50.0, 100.0];
        let rows = [-30.0, 10.0, 50.0, 85.0];
        let (mut cabbages, mut carrots) = (0, 0);
        for (row, &y) in rows.iter().enumerate() {
            for &x in &columns {
                let name = if row % 2 == 0 {
                    cabbages += 1;
                    format!("{}.{:03}", names.cabbage_prefix, cabbages)
                } else {
                    carrots += 1;
                    format!("{}.{:03}", names.carrot_prefix, carrots)
                };
                scene.add_drawable(Transform::new(name, Vec3::new(x, y, 0.0)));
            }
        }

        scene.add_camera(
            Transform::new("Camera", Vec3::new(0.0, -260.0, 240.0))
                .with_rotation(Quat::from_rotation_x(45.0_f32.to_radians())),
        );
        scene
    }
}
