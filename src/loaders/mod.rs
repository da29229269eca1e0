pub mod asset;
pub mod gltf;

pub use asset::{AssetLoader, AssetSource, FsFetcher, LoadFailure, LoadHandle, LoadOutcome, LoadState};
pub use self::gltf::load_gltf_model;
