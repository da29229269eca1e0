use anyhow::{Context, Result};
use futures::channel::oneshot;
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use thiserror::Error;

use super::gltf::load_gltf_model;
use crate::core::Countdown;
use crate::scenes::{fallback_model, procedural_orb};
use crate::traits::AssetFetcher;
use crate::types::Model;

/// Where a model comes from
#[derive(Debug, Clone, PartialEq)]
pub enum AssetSource {
    /// Fetched through the loader's [`AssetFetcher`]
    Path(String),
    /// Already in memory
    Bytes { name: String, bytes: Vec<u8> },
    /// Built in code, no fetch
    Procedural,
}

impl AssetSource {
    pub fn name(&self) -> &str {
        match self {
            AssetSource::Path(path) => path,
            AssetSource::Bytes { name, .. } => name,
            AssetSource::Procedural => "procedural-orb",
        }
    }
}

/// Why the real asset was replaced by the fallback
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadFailure {
    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("decode failed: {0}")]
    Decode(String),

    #[error("asset contains no renderable meshes")]
    Empty,

    #[error("timed out after {0:.1}s")]
    Timeout(f32),

    #[error("loader stopped before producing a result")]
    Disconnected,
}

/// A settled load. Failures still carry a usable model.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    Loaded(Model),
    Fallback { model: Model, reason: LoadFailure },
}

impl LoadOutcome {
    fn fallback(source: &str, reason: LoadFailure) -> Self {
        warn!("Asset '{}' unavailable ({}), using fallback model", source, reason);
        LoadOutcome::Fallback {
            model: fallback_model(),
            reason,
        }
    }

    pub fn model(&self) -> &Model {
        match self {
            LoadOutcome::Loaded(model) | LoadOutcome::Fallback { model, .. } => model,
        }
    }

    pub fn into_model(self) -> Model {
        match self {
            LoadOutcome::Loaded(model) | LoadOutcome::Fallback { model, .. } => model,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, LoadOutcome::Fallback { .. })
    }

    pub fn failure(&self) -> Option<&LoadFailure> {
        match self {
            LoadOutcome::Loaded(_) => None,
            LoadOutcome::Fallback { reason, .. } => Some(reason),
        }
    }
}

/// Result of polling a [`LoadHandle`]
#[derive(Debug, Clone)]
pub enum LoadState {
    Pending,
    Ready(LoadOutcome),
}

type WorkerResult = std::result::Result<Model, LoadFailure>;

/// An in-flight load, polled once per frame from the event loop.
/// Dropping the handle abandons the load; the worker's result is discarded.
pub struct LoadHandle {
    source: String,
    receiver: Option<oneshot::Receiver<WorkerResult>>,
    timeout: Countdown,
    timeout_secs: f32,
}

impl LoadHandle {
    pub fn source(&self) -> &str {
        &self.source
    }

    /// True once `Ready` has been handed out
    pub fn is_settled(&self) -> bool {
        self.receiver.is_none()
    }

    /// Check for a result, counting `delta` seconds toward the timeout.
    /// Returns `Ready` exactly once; afterwards the handle stays `Pending`.
    pub fn poll(&mut self, delta: f32) -> LoadState {
        let Some(receiver) = self.receiver.as_mut() else {
            return LoadState::Pending;
        };

        let outcome = match receiver.try_recv() {
            Ok(Some(Ok(model))) => {
                info!("Loaded '{}' ({} meshes)", self.source, model.meshes.len());
                LoadOutcome::Loaded(model)
            }
            Ok(Some(Err(reason))) => LoadOutcome::fallback(&self.source, reason),
            Ok(None) => {
                if !self.timeout.tick(delta) {
                    return LoadState::Pending;
                }
                LoadOutcome::fallback(&self.source, LoadFailure::Timeout(self.timeout_secs))
            }
            Err(oneshot::Canceled) => LoadOutcome::fallback(&self.source, LoadFailure::Disconnected),
        };

        self.receiver = None;
        self.timeout.cancel();
        LoadState::Ready(outcome)
    }

    /// Wait for the load without a timeout
    pub async fn settle(mut self) -> LoadOutcome {
        let Some(receiver) = self.receiver.take() else {
            return LoadOutcome::fallback(&self.source, LoadFailure::Disconnected);
        };

        match receiver.await {
            Ok(Ok(model)) => LoadOutcome::Loaded(model),
            Ok(Err(reason)) => LoadOutcome::fallback(&self.source, reason),
            Err(oneshot::Canceled) => LoadOutcome::fallback(&self.source, LoadFailure::Disconnected),
        }
    }
}

/// Starts model loads off the event loop. Never fails: every load settles to a model.
#[derive(Clone)]
pub struct AssetLoader {
    fetcher: Arc<dyn AssetFetcher>,
    timeout_secs: f32,
}

impl AssetLoader {
    pub fn new(fetcher: Arc<dyn AssetFetcher>, timeout_secs: f32) -> Self {
        Self {
            fetcher,
            timeout_secs,
        }
    }

    pub fn fetcher(&self) -> &Arc<dyn AssetFetcher> {
        &self.fetcher
    }

    /// Begin loading; returns immediately
    pub fn load(&self, source: AssetSource) -> LoadHandle {
        let name = source.name().to_string();
        let (sender, receiver) = oneshot::channel();
        let fetcher = Arc::clone(&self.fetcher);

        info!("Loading model '{}'", name);
        let spawned = thread::Builder::new()
            .name("asset-loader".to_string())
            .spawn(move || {
                // The receiver may already be gone after an unmount
                let _ = sender.send(resolve(fetcher.as_ref(), source));
            });

        if let Err(e) = spawned {
            warn!("Could not start loader thread: {}", e);
        }

        LoadHandle {
            source: name,
            receiver: Some(receiver),
            timeout: Countdown::started(self.timeout_secs),
            timeout_secs: self.timeout_secs,
        }
    }
}

fn resolve(fetcher: &dyn AssetFetcher, source: AssetSource) -> WorkerResult {
    match source {
        AssetSource::Procedural => Ok(procedural_orb()),
        AssetSource::Path(path) => {
            let bytes = fetcher
                .fetch(&path)
                .map_err(|e| LoadFailure::Fetch(format!("{:#}", e)))?;
            decode(&bytes, &path)
        }
        AssetSource::Bytes { name, bytes } => decode(&bytes, &name),
    }
}

fn decode(bytes: &[u8], name: &str) -> WorkerResult {
    let model = load_gltf_model(bytes, name).map_err(|e| LoadFailure::Decode(format!("{:#}", e)))?;
    if model.meshes.is_empty() {
        return Err(LoadFailure::Empty);
    }
    Ok(model)
}

/// Reads assets from the local filesystem. Leading slashes are treated as
/// relative to `root`, so web-style paths like `/models/x.glb` work.
#[derive(Debug, Clone, Default)]
pub struct FsFetcher {
    root: Option<PathBuf>,
}

impl FsFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    pub fn resolve_path(&self, path: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(path.trim_start_matches('/')),
            None => PathBuf::from(path),
        }
    }
}

impl AssetFetcher for FsFetcher {
    fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        let full = self.resolve_path(path);
        std::fs::read(&full).with_context(|| format!("Failed to read asset {:?}", full))
    }
}
