use anyhow::{Context, Result};
use glam::{Mat4, Vec3};
use log::{debug, warn};
use std::collections::HashSet;

use crate::types::{Geometry, Material, Mesh, Model, Transform, Vertex};

/// Decodes a glTF asset (binary `.glb` or self-contained `.gltf`) into a model.
/// The model may come back with no meshes; callers decide whether that is usable.
pub fn load_gltf_model(bytes: &[u8], name: &str) -> Result<Model> {
    let (document, buffers, _images) = gltf::import_slice(bytes)
        .context(format!("Failed to decode glTF asset '{}'", name))?;

    debug!(
        "glTF '{}': {} scenes, {} nodes, {} meshes, {} materials",
        name,
        document.scenes().count(),
        document.nodes().count(),
        document.meshes().count(),
        document.materials().count()
    );

    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .context(format!("glTF asset '{}' has no scenes", name))?;

    let mut meshes = Vec::new();
    let mut visited = HashSet::new();
    for node in scene.nodes() {
        process_node(&node, &buffers, &Mat4::IDENTITY, &mut visited, &mut meshes)?;
    }

    debug!("Extracted {} mesh primitives from '{}'", meshes.len(), name);

    let mut model = Model::new(name, meshes);
    model.prepare_for_animation();
    Ok(model)
}

/// Recursively processes glTF nodes. A node reached twice means the
/// hierarchy is not a tree and the asset is rejected.
fn process_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent_transform: &Mat4,
    visited: &mut HashSet<usize>,
    meshes: &mut Vec<Mesh>,
) -> Result<()> {
    if !visited.insert(node.index()) {
        anyhow::bail!("cyclic node hierarchy at node {}", node.index());
    }

    let local_transform = Mat4::from_cols_array_2d(&node.transform().matrix());
    let global_transform = *parent_transform * local_transform;

    if let Some(mesh) = node.mesh() {
        process_mesh(&mesh, buffers, &global_transform, meshes)?;
    }

    for child in node.children() {
        process_node(&child, buffers, &global_transform, visited, meshes)?;
    }

    Ok(())
}

/// Converts every triangle primitive of a glTF mesh
fn process_mesh(
    mesh: &gltf::Mesh,
    buffers: &[gltf::buffer::Data],
    transform: &Mat4,
    meshes: &mut Vec<Mesh>,
) -> Result<()> {
    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            warn!(
                "Skipping {:?} primitive in mesh {:?}",
                primitive.mode(),
                mesh.name()
            );
            continue;
        }

        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

        let positions: Vec<[f32; 3]> = reader
            .read_positions()
            .context("Mesh primitive has no positions")?
            .collect();

        if positions.is_empty() {
            continue;
        }

        let indices: Vec<u32> = match reader.read_indices() {
            Some(indices) => indices.into_u32().collect(),
            None => (0..positions.len() as u32).collect(),
        };

        let normals: Vec<[f32; 3]> = match reader.read_normals() {
            Some(normals) => normals.collect(),
            None => flat_normals(&positions, &indices),
        };

        let vertices = positions
            .iter()
            .zip(normals.iter())
            .map(|(p, n)| Vertex::new(*p, *n))
            .collect();

        let pbr = primitive.material().pbr_metallic_roughness();
        let [r, g, b, a] = pbr.base_color_factor();
        let material = Material::new([r, g, b], a, pbr.metallic_factor(), pbr.roughness_factor());

        let mut converted = Mesh::new(Geometry::new(vertices, indices), material)
            .with_local(Transform::from_matrix(transform));
        converted.name = mesh.name().map(str::to_string);
        meshes.push(converted);
    }

    Ok(())
}

/// Area-weighted vertex normals for primitives that ship without them
pub fn flat_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut accumulated = vec![Vec3::ZERO; positions.len()];

    for triangle in indices.chunks_exact(3) {
        let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let (p0, p1, p2) = (
            Vec3::from_array(positions[a]),
            Vec3::from_array(positions[b]),
            Vec3::from_array(positions[c]),
        );
        let face = (p1 - p0).cross(p2 - p0);
        for i in [a, b, c] {
            accumulated[i] += face;
        }
    }

    accumulated
        .into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y).to_array())
        .collect()
}
