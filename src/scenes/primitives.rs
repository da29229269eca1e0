use std::f32::consts::{PI, TAU};

use crate::types::{Geometry, Vertex};

/// UV sphere centred at the origin
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Geometry {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);

    let vertices = (0..=height_segments)
        .flat_map(|i| {
            let theta = i as f32 / height_segments as f32 * PI;
            (0..=width_segments).map(move |j| {
                let phi = j as f32 / width_segments as f32 * TAU;
                let normal = [phi.cos() * theta.sin(), theta.cos(), phi.sin() * theta.sin()];
                Vertex::new(
                    [normal[0] * radius, normal[1] * radius, normal[2] * radius],
                    normal,
                )
            })
        })
        .collect();

    let row = width_segments + 1;
    let indices = (0..height_segments)
        .flat_map(|i| {
            (0..width_segments).flat_map(move |j| {
                let first = i * row + j;
                let second = first + row;
                [first, second, first + 1, second, second + 1, first + 1]
            })
        })
        .collect();

    Geometry::new(vertices, indices)
}

/// Capped cylinder along the Y axis, centred at the origin
pub fn cylinder(radius: f32, height: f32, radial_segments: u32) -> Geometry {
    let segments = radial_segments.max(3);
    let half = height * 0.5;
    let mut vertices = Vec::with_capacity((segments as usize + 1) * 4 + 2);
    let mut indices = Vec::new();

    // Side wall: two rings with outward normals
    for j in 0..=segments {
        let phi = j as f32 / segments as f32 * TAU;
        let (sin, cos) = phi.sin_cos();
        let normal = [cos, 0.0, sin];
        vertices.push(Vertex::new([cos * radius, half, sin * radius], normal));
        vertices.push(Vertex::new([cos * radius, -half, sin * radius], normal));
    }
    for j in 0..segments {
        let top = j * 2;
        let bottom = top + 1;
        let next_top = top + 2;
        let next_bottom = top + 3;
        indices.extend_from_slice(&[top, bottom, next_top, bottom, next_bottom, next_top]);
    }

    // Caps
    for (y, normal_y) in [(half, 1.0), (-half, -1.0)] {
        let center = vertices.len() as u32;
        vertices.push(Vertex::new([0.0, y, 0.0], [0.0, normal_y, 0.0]));
        let ring_start = vertices.len() as u32;
        for j in 0..=segments {
            let phi = j as f32 / segments as f32 * TAU;
            let (sin, cos) = phi.sin_cos();
            vertices.push(Vertex::new([cos * radius, y, sin * radius], [0.0, normal_y, 0.0]));
        }
        for j in 0..segments {
            let a = ring_start + j;
            let b = a + 1;
            if normal_y > 0.0 {
                indices.extend_from_slice(&[center, b, a]);
            } else {
                indices.extend_from_slice(&[center, a, b]);
            }
        }
    }

    Geometry::new(vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let geometry = sphere(2.0, 16, 8);
        for vertex in &geometry.vertices {
            let [x, y, z] = vertex.position;
            let distance = (x * x + y * y + z * z).sqrt();
            assert!((distance - 2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn sphere_index_counts() {
        let geometry = sphere(1.0, 32, 32);
        assert_eq!(geometry.vertices.len(), 33 * 33);
        assert_eq!(geometry.triangle_count(), 32 * 32 * 2);
        let max = *geometry.indices.iter().max().unwrap() as usize;
        assert!(max < geometry.vertices.len());
    }

    #[test]
    fn cylinder_bounds_match_dimensions() {
        let geometry = cylinder(0.2, 0.8, 16);
        let bounds = geometry.bounds().unwrap();
        assert!((bounds.max.y - 0.4).abs() < 1e-5);
        assert!((bounds.min.y + 0.4).abs() < 1e-5);
        assert!((bounds.max.x - 0.2).abs() < 1e-5);
        // 16 side quads + 16 triangles per cap
        assert_eq!(geometry.triangle_count(), 16 * 2 + 16 * 2);
    }
}
