//! Flat point cloud buffers.

use cgmath::Point3;

/// A point cloud stored as a flat `[x0, y0, z0, x1, y1, z1, ...]` sequence.
///
/// The layout matches a tightly packed `vec3<f32>` vertex attribute so the
/// buffer can be uploaded as-is via [`as_bytes`](Self::as_bytes).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloud {
    pub positions: Vec<f32>,
}

impl PointCloud {
    pub fn new(positions: Vec<f32>) -> Self {
        Self { positions }
    }

    /// Number of points, i.e. `positions.len() / 3`.
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.len() < 3
    }

    pub fn points(&self) -> impl Iterator<Item = Point3<f32>> + '_ {
        self.positions
            .chunks_exact(3)
            .map(|p| Point3::new(p[0], p[1], p[2]))
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn into_positions(self) -> Vec<f32> {
        self.positions
    }
}

impl From<Vec<f32>> for PointCloud {
    fn from(positions: Vec<f32>) -> Self {
        Self { positions }
    }
}
