use scroll_scene::loaders::{load_gltf_model, AssetLoader, AssetSource, LoadFailure, LoadState};
use scroll_scene::traits::AssetFetcher;
use std::sync::Arc;
use std::time::Duration;

/// One red, half-transparent triangle under a node translated to y = 2
const TRIANGLE_GLTF: &str = r#"{"asset":{"version":"2.0"},"scene":0,"scenes":[{"nodes":[0]}],"nodes":[{"mesh":0,"name":"tri","translation":[0,2,0]}],"meshes":[{"name":"tri","primitives":[{"attributes":{"POSITION":0},"indices":1,"material":0}]}],"materials":[{"pbrMetallicRoughness":{"baseColorFactor":[1,0,0,0.5],"metallicFactor":0.25,"roughnessFactor":0.75}}],"buffers":[{"byteLength":44,"uri":"data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAAAAABAAIAAAA="}],"bufferViews":[{"buffer":0,"byteOffset":0,"byteLength":36},{"buffer":0,"byteOffset":36,"byteLength":6}],"accessors":[{"bufferView":0,"componentType":5126,"count":3,"type":"VEC3","min":[0,0,0],"max":[1,1,0]},{"bufferView":1,"componentType":5123,"count":3,"type":"SCALAR"}]}"#;

/// A scene whose only node carries no mesh
const EMPTY_GLTF: &str = r#"{"asset":{"version":"2.0"},"scene":0,"scenes":[{"nodes":[0]}],"nodes":[{"name":"empty"}]}"#;

/// Two nodes that are each other's child
const CYCLIC_GLTF: &str = r#"{"asset":{"version":"2.0"},"scene":0,"scenes":[{"nodes":[0]}],"nodes":[{"children":[1]},{"children":[0]}]}"#;

struct StaticFetcher(&'static str);

impl AssetFetcher for StaticFetcher {
    fn fetch(&self, _path: &str) -> anyhow::Result<Vec<u8>> {
        Ok(self.0.as_bytes().to_vec())
    }
}

fn wait(loader: &AssetLoader, source: AssetSource) -> scroll_scene::loaders::LoadOutcome {
    let mut handle = loader.load(source);
    for _ in 0..500 {
        if let LoadState::Ready(outcome) = handle.poll(0.0) {
            return outcome;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    panic!("load never settled");
}

#[cfg(test)]
mod gltf_loader_tests {
    use super::*;

    #[test]
    fn test_decodes_embedded_triangle() {
        let model = load_gltf_model(TRIANGLE_GLTF.as_bytes(), "tri.gltf").unwrap();

        assert_eq!(model.name, "tri.gltf");
        assert_eq!(model.meshes.len(), 1);
        assert_eq!(model.triangle_count(), 1);

        let mesh = &model.meshes[0];
        assert_eq!(mesh.name.as_deref(), Some("tri"));
        assert_eq!(mesh.material.color, [1.0, 0.0, 0.0]);
        assert_eq!(mesh.material.opacity, 0.5);
        assert_eq!(mesh.material.metalness, 0.25);
        assert_eq!(mesh.material.roughness, 0.75);
        assert!(mesh.material.transparent, "loaded meshes are prepared for fading");
        assert!(mesh.cast_shadow && mesh.receive_shadow);
        assert!((mesh.local.position.y - 2.0).abs() < 1e-6);

        // no normals in the file, so they are generated from the winding
        for vertex in &mesh.geometry.vertices {
            assert_eq!(vertex.normal, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_model_bounds_include_node_transform() {
        let model = load_gltf_model(TRIANGLE_GLTF.as_bytes(), "tri.gltf").unwrap();
        let bounds = model.bounds().unwrap();
        assert!((bounds.min.y - 2.0).abs() < 1e-6);
        assert!((bounds.max.y - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_loader_delivers_decoded_model() {
        let loader = AssetLoader::new(Arc::new(StaticFetcher(TRIANGLE_GLTF)), 10.0);
        let outcome = wait(&loader, AssetSource::Path("/models/tri.gltf".into()));

        assert!(!outcome.is_fallback());
        assert_eq!(outcome.model().name, "/models/tri.gltf");
    }

    #[test]
    fn test_meshless_asset_falls_back() {
        assert!(load_gltf_model(EMPTY_GLTF.as_bytes(), "empty.gltf")
            .unwrap()
            .meshes
            .is_empty());

        let loader = AssetLoader::new(Arc::new(StaticFetcher(EMPTY_GLTF)), 10.0);
        let outcome = wait(&loader, AssetSource::Path("/models/empty.gltf".into()));

        assert!(outcome.is_fallback());
        assert!(matches!(outcome.failure(), Some(LoadFailure::Empty)));
        assert_eq!(outcome.model().meshes.len(), 1);
    }

    #[test]
    fn test_cyclic_hierarchy_falls_back() {
        let loader = AssetLoader::new(Arc::new(StaticFetcher(CYCLIC_GLTF)), 10.0);
        let outcome = wait(
            &loader,
            AssetSource::Bytes {
                name: "cyclic.gltf".into(),
                bytes: CYCLIC_GLTF.as_bytes().to_vec(),
            },
        );

        assert!(outcome.is_fallback());
        match outcome.failure() {
            Some(LoadFailure::Decode(reason)) => assert!(reason.contains("cyclic node hierarchy")),
            other => panic!("expected a decode failure, got {:?}", other),
        }
        assert_eq!(outcome.model().meshes.len(), 1);
    }
}
