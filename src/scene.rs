//! Minimal static scene: a list of shaded meshes with world transforms.
//!
//! Deliberately trivial: the scene exists so the frame loop has something to
//! draw; all interesting state lives elsewhere.

use crate::utils::translation;

/// One static mesh: a world transform and a flat color. Geometry lives in the
/// graphics backend; the frame loop only needs placement.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub transform: [f32; 16],
    pub color: [f32; 4],
}

impl Mesh {
    pub fn new(position: [f32; 3], color: [f32; 4]) -> Mesh {
        Mesh {
            transform: translation(position),
            color,
        }
    }
}

/// A list of static meshes rendered identically into both eye viewports.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub meshes: Vec<Mesh>,
}

impl Scene {
    pub fn empty() -> Scene {
        Scene { meshes: Vec::new() }
    }

    /// The familiar demo room: floor, ceiling, four walls and a couple of
    /// fixtures to give the head tracking something to parallax against.
    pub fn room() -> Scene {
        const GRAY: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
        const BROWN: [f32; 4] = [0.45, 0.35, 0.2, 1.0];
        const BLUE: [f32; 4] = [0.2, 0.3, 0.7, 1.0];

        let mut meshes = Vec::new();
        // floor and ceiling
        meshes.push(Mesh::new([0.0, 0.0, 0.0], GRAY));
        meshes.push(Mesh::new([0.0, 4.0, 0.0], GRAY));
        // walls
        meshes.push(Mesh::new([0.0, 2.0, -10.0], BLUE));
        meshes.push(Mesh::new([0.0, 2.0, 10.0], BLUE));
        meshes.push(Mesh::new([-10.0, 2.0, 0.0], BLUE));
        meshes.push(Mesh::new([10.0, 2.0, 0.0], BLUE));
        // fixtures
        meshes.push(Mesh::new([1.8, 0.5, 1.0], BROWN));
        meshes.push(Mesh::new([-1.8, 0.5, -1.5], BROWN));

        Scene { meshes }
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}
