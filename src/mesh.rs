//! Triangulated displacement mesh built from a height grid.
//!
//! One vertex per cell, laid out row-major exactly like the grid, so the
//! vertex for cell (x, y) lives at index `y * width + x`. The mesh is centred
//! on the origin in the XZ plane with +Y up.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::curve::HeightCurveMapper;
use crate::error::{Result, TerrainError};
use crate::grid::HeightField;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshArtifact {
    pub positions: Vec<Vec3>,
    /// Three indices per triangle, counter-clockwise seen from above.
    pub indices: Vec<u32>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
}

impl MeshArtifact {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Axis-aligned bounds of the vertex positions, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(
            self.positions
                .iter()
                .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p))),
        )
    }
}

/// Build the mesh for `field`, pushing every height through `mapper`.
///
/// A 1-wide or 1-tall field yields a strip of vertices with no triangles.
/// Fields with more vertices than a `u32` index can address are rejected.
pub fn build_mesh(field: &HeightField, mapper: &HeightCurveMapper) -> Result<MeshArtifact> {
    let width = field.width;
    let height = field.height;
    let vertex_count = check_index_range(width, height)?;
    let quad_count = width.saturating_sub(1) * height.saturating_sub(1);

    let mut positions = Vec::with_capacity(vertex_count);
    let mut uvs = Vec::with_capacity(vertex_count);
    let mut indices = Vec::with_capacity(quad_count * 6);

    let half_w = width as f32 / 2.0;
    let half_h = height as f32 / 2.0;
    let u_span = width.saturating_sub(1).max(1) as f32;
    let v_span = height.saturating_sub(1).max(1) as f32;

    for y in 0..height {
        for x in 0..width {
            let h = mapper.map(*field.get(x, y));
            positions.push(Vec3::new(x as f32 - half_w, h, y as f32 - half_h));
            uvs.push(Vec2::new(x as f32 / u_span, y as f32 / v_span));
        }
    }

    for y in 0..height.saturating_sub(1) {
        for x in 0..width.saturating_sub(1) {
            let i00 = (y * width + x) as u32;
            let i10 = i00 + 1;
            let i01 = i00 + width as u32;
            let i11 = i01 + 1;

            indices.extend_from_slice(&[i00, i01, i10]);
            indices.extend_from_slice(&[i10, i01, i11]);
        }
    }

    let normals = vertex_normals(&positions, &indices);

    Ok(MeshArtifact {
        positions,
        indices,
        normals,
        uvs,
    })
}

/// Vertex count of a `width` x `height` mesh, if every index fits a `u32`.
fn check_index_range(width: usize, height: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .filter(|&n| u32::try_from(n).is_ok())
        .ok_or(TerrainError::MeshTooLarge { width, height })
}

/// Per-vertex normals as the normalized sum of the unit normals of every
/// adjacent face. Vertices with no faces point straight up.
fn vertex_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut accum = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        let face = face.normalize_or_zero();
        accum[a] += face;
        accum[b] += face;
        accum[c] += face;
    }

    accum
        .into_iter()
        .map(|n| {
            let n = n.normalize_or_zero();
            if n == Vec3::ZERO { Vec3::Y } else { n }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::HeightCurve;
    use crate::grid::Grid;

    fn flat(width: usize, height: usize, v: f32) -> HeightField {
        Grid::new_with(width, height, v)
    }

    fn identity(curve: &HeightCurve) -> HeightCurveMapper<'_> {
        HeightCurveMapper::new(curve, 1.0, 1.0).unwrap()
    }

    #[test]
    fn test_counts() {
        let curve = HeightCurve::linear();
        for (w, h) in [(1, 1), (1, 5), (5, 1), (2, 2), (4, 3), (10, 7)] {
            let mesh = build_mesh(&flat(w, h, 0.5), &identity(&curve)).unwrap();
            assert_eq!(mesh.vertex_count(), w * h);
            assert_eq!(mesh.triangle_count(), 2 * (w - 1) * (h - 1));
            assert_eq!(mesh.normals.len(), w * h);
            assert_eq!(mesh.uvs.len(), w * h);
        }
    }

    #[test]
    fn test_indices_in_bounds() {
        let curve = HeightCurve::linear();
        let mesh = build_mesh(&flat(6, 4, 0.0), &identity(&curve)).unwrap();
        let n = mesh.vertex_count() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n));
    }

    #[test]
    fn test_flat_mesh_faces_up() {
        let curve = HeightCurve::linear();
        let mesh = build_mesh(&flat(4, 4, 0.3), &identity(&curve)).unwrap();
        for tri in mesh.triangles() {
            let [a, b, c] = tri.map(|i| mesh.positions[i as usize]);
            assert!((b - a).cross(c - a).y > 0.0);
        }
        for n in &mesh.normals {
            assert!((*n - Vec3::Y).length() < 1e-6);
        }
    }

    #[test]
    fn test_positions_centred_and_mapped() {
        let curve = HeightCurve::linear();
        let mapper = HeightCurveMapper::new(&curve, 2.0, 1.0).unwrap();
        let field = Grid::from_vec(2, 2, vec![0.0f32, 0.25, 0.5, 1.0]).unwrap();
        let mesh = build_mesh(&field, &mapper).unwrap();
        assert_eq!(mesh.positions[0], Vec3::new(-1.0, 0.0, -1.0));
        assert_eq!(mesh.positions[1], Vec3::new(0.0, 0.5, -1.0));
        assert_eq!(mesh.positions[2], Vec3::new(-1.0, 1.0, 0.0));
        assert_eq!(mesh.positions[3], Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_uv_corners() {
        let curve = HeightCurve::linear();
        let mesh = build_mesh(&flat(3, 5, 0.0), &identity(&curve)).unwrap();
        assert_eq!(mesh.uvs[0], Vec2::ZERO);
        assert_eq!(mesh.uvs[2], Vec2::new(1.0, 0.0));
        assert_eq!(mesh.uvs[14], Vec2::ONE);
    }

    #[test]
    fn test_strip_mesh_is_valid() {
        let curve = HeightCurve::linear();
        let mesh = build_mesh(&flat(1, 4, 0.7), &identity(&curve)).unwrap();
        assert!(mesh.indices.is_empty());
        assert!(mesh.normals.iter().all(|&n| n == Vec3::Y));
        assert!(mesh.uvs.iter().all(|uv| uv.x == 0.0));
    }

    #[test]
    fn test_index_range() {
        assert_eq!(check_index_range(4, 3).unwrap(), 12);
        assert_eq!(check_index_range(65536, 65535).unwrap(), 65536 * 65535);
        assert!(matches!(
            check_index_range(70000, 70000),
            Err(TerrainError::MeshTooLarge { width: 70000, height: 70000 })
        ));
    }

    #[test]
    fn test_slope_normal_tilts_downhill() {
        // Height rises with x, so normals should lean towards -x.
        let curve = HeightCurve::linear();
        let field = Grid::from_vec(3, 3, vec![0.0f32, 0.5, 1.0, 0.0, 0.5, 1.0, 0.0, 0.5, 1.0]).unwrap();
        let mesh = build_mesh(&field, &identity(&curve)).unwrap();
        for n in &mesh.normals {
            assert!(n.x < 0.0);
            assert!(n.y > 0.0);
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }
}
