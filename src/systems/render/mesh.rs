//! Meshes for spheres, rings and orbit paths
//! Bevy spheres have their poles on Y, ours spin about Z so every sphere is turned onto its side

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use bevy::render::mesh::MeshBuilder;

/// how finely a sphere is tessellated
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Detail {
    /// follows the scene resolution
    Scene,
    Fixed(u32),
}

// rebuilt whenever resolution or shading change
#[derive(Component, Clone, Copy, Debug)]
pub struct Tessellated {
    pub radius: f32,
    pub detail: Detail,
}

impl Tessellated {
    pub fn resolution(&self, scene_resolution: u32) -> u32 {
        match self.detail {
            Detail::Scene => scene_resolution,
            Detail::Fixed(n) => n,
        }
    }
}

pub fn sphere_mesh(radius: f32, resolution: u32, flat: bool) -> Mesh {
    let resolution = resolution.max(3);
    let mut mesh = Sphere::new(radius)
        .mesh()
        .uv(resolution, resolution)
        .rotated_by(Quat::from_rotation_x(FRAC_PI_2));

    if flat {
        mesh.duplicate_vertices();
        mesh.compute_flat_normals();
    }
    mesh
}

// zero-height ring in the XY plane
pub fn ring_mesh(inner: f32, outer: f32, resolution: u32) -> Mesh {
    Annulus::new(inner, outer)
        .mesh()
        .resolution(resolution)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(mesh: &Mesh) -> Vec<[f32; 3]> {
        mesh.attribute(Mesh::ATTRIBUTE_POSITION)
            .and_then(|values| values.as_float3())
            .unwrap()
            .to_vec()
    }

    #[test]
    fn sphere_poles_are_on_z() {
        let points = positions(&sphere_mesh(2.0, 8, false));
        let top = points
            .iter()
            .copied()
            .fold([0.0, 0.0, f32::MIN], |best, p| if p[2] > best[2] { p } else { best });
        assert!((top[2] - 2.0).abs() < 1e-4);
        assert!(top[0].abs() < 1e-4 && top[1].abs() < 1e-4);
    }

    #[test]
    fn flat_spheres_drop_shared_vertices() {
        let smooth = sphere_mesh(1.0, 8, false);
        let flat = sphere_mesh(1.0, 8, true);
        assert!(flat.indices().is_none());
        assert!(flat.count_vertices() > smooth.count_vertices());
    }

    #[test]
    fn tiny_resolution_is_raised() {
        let mesh = sphere_mesh(1.0, 0, false);
        assert!(mesh.count_vertices() > 0);
    }

    #[test]
    fn ring_lies_flat() {
        let points = positions(&ring_mesh(1.0, 1.5, 16));
        assert!(points.iter().all(|p| p[2].abs() < 1e-6));
        assert!(points.iter().all(|p| {
            let r = (p[0] * p[0] + p[1] * p[1]).sqrt();
            (1.0 - 1e-4..=1.5 + 1e-4).contains(&r)
        }));
    }

    #[test]
    fn fixed_detail_ignores_scene() {
        let moon = Tessellated { radius: 0.1, detail: Detail::Fixed(5) };
        let planet = Tessellated { radius: 1.0, detail: Detail::Scene };
        assert_eq!(moon.resolution(80), 5);
        assert_eq!(planet.resolution(80), 80);
    }
}
