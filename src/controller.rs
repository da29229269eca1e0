use glam::Vec3;
use log::{debug, info, warn};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use thiserror::Error;

use crate::config::{ModelConfig, SceneConfig};
use crate::coordinator::reconcile;
use crate::core::{FrameLoop, FrameSubscription};
use crate::frame::FrameInfo;
use crate::idle::IdleAnimator;
use crate::loaders::{AssetLoader, AssetSource, LoadHandle, LoadOutcome, LoadState};
use crate::loading::{LoadingSignal, LoadingState};
use crate::scroll::{BoundaryParseError, ScrollBinder};
use crate::traits::{LoadingConsumer, ScrollTriggerEngine};
use crate::types::{Model, SharedModel};

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("invalid scroll boundary: {0}")]
    InvalidScroll(#[from] BoundaryParseError),
}

/// Everything that exists only while mounted. The frame callback reaches it
/// through a `Weak`, so dropping the controller's handle ends all activity.
struct MountState {
    engine: Rc<RefCell<dyn ScrollTriggerEngine>>,
    binder: ScrollBinder,
    idle: IdleAnimator,
    model_config: ModelConfig,
    load: Option<LoadHandle>,
    model: Option<SharedModel>,
    fallback: bool,
    loading: LoadingSignal,
}

impl MountState {
    fn on_frame(&mut self, frame: &FrameInfo) {
        if let Some(handle) = self.load.as_mut() {
            if let LoadState::Ready(outcome) = handle.poll(frame.delta) {
                self.load = None;
                self.install(outcome);
            }
        }

        if let Some(model) = &self.model {
            if let Ok(mut model) = model.try_borrow_mut() {
                self.idle.advance(&mut model, frame.delta);
            }
        }
    }

    fn install(&mut self, outcome: LoadOutcome) {
        self.fallback = outcome.is_fallback();
        if let Some(reason) = outcome.failure() {
            info!("Showing fallback model: {}", reason);
        }
        self.set_model(outcome.into_model());
    }

    /// Place `model` at the base transform and bind it to scroll
    fn set_model(&mut self, mut model: Model) {
        let cfg = &self.model_config;
        model.root.position = Vec3::from_array(cfg.position);
        model.root.rotation = Vec3::new(0.0, cfg.yaw, 0.0);
        model.root.scale = Vec3::splat(cfg.scale);
        model.prepare_for_animation();

        self.release_model();

        let shared = model.into_shared();
        let bound = self.binder.bind(&mut *self.engine.borrow_mut(), &shared);
        debug!(
            "Installed model '{}' (scroll bound: {})",
            shared.borrow().name,
            bound
        );
        self.model = Some(shared);
    }

    fn release_model(&mut self) {
        self.binder.unbind(&mut *self.engine.borrow_mut());
        self.dispose_model();
    }

    fn dispose_model(&mut self) {
        if let Some(model) = self.model.take() {
            model.borrow_mut().dispose();
        }
    }

    /// Scroll trigger, loading listeners, pending load, then the model
    fn teardown(&mut self) {
        match self.engine.try_borrow_mut() {
            Ok(mut engine) => {
                self.binder.unbind(&mut *engine);
            }
            Err(_) => warn!("Trigger engine busy, scroll trigger left registered"),
        }
        self.loading.clear();
        if self.load.take().is_some() {
            debug!("Abandoned in-flight model load");
        }
        self.dispose_model();
    }
}

struct Mounted {
    state: Rc<RefCell<MountState>>,
    subscription: FrameSubscription,
}

/// Owns one animated model bound to one scroll region.
///
/// Mounting completes the loading signal, prunes stale triggers, starts the
/// asset load and registers a per-frame callback. Unmounting tears down in
/// reverse: frame callback, scroll trigger, loading listeners, then the model.
///
/// Prefer [`SceneController::unmount`]. Dropping a mounted controller runs the
/// same teardown, but the frame loop is out of reach, so its callback stays
/// subscribed as a no-op until the loop itself is dropped.
pub struct SceneController {
    config: SceneConfig,
    engine: Rc<RefCell<dyn ScrollTriggerEngine>>,
    loader: AssetLoader,
    mounted: Option<Mounted>,
}

impl SceneController {
    pub fn new(
        config: SceneConfig,
        engine: Rc<RefCell<dyn ScrollTriggerEngine>>,
        loader: AssetLoader,
    ) -> Result<Self, ControllerError> {
        // Fail on bad boundaries now rather than on the first mount
        config.scroll.trigger_spec()?;
        Ok(Self {
            config,
            engine,
            loader,
            mounted: None,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    pub fn mount<C: LoadingConsumer + 'static>(
        &mut self,
        frames: &mut FrameLoop,
        consumer: Rc<RefCell<C>>,
    ) -> Result<(), ControllerError> {
        if self.mounted.is_some() {
            debug!("Scene already mounted");
            return Ok(());
        }

        let spec = self.config.scroll.trigger_spec()?;

        let mut loading = LoadingSignal::new();
        loading.subscribe_consumer(consumer);
        loading.complete();

        let killed = reconcile(
            &mut *self.engine.borrow_mut(),
            &self.config.retained_trigger_ids(),
        );
        if !killed.is_empty() {
            info!("Removed {} stale scroll trigger(s)", killed.len());
        }

        let source = if self.config.model.procedural {
            AssetSource::Procedural
        } else {
            AssetSource::Path(self.config.model.path.clone())
        };

        let state = Rc::new(RefCell::new(MountState {
            engine: Rc::clone(&self.engine),
            binder: ScrollBinder::new(spec, self.config.mapping, self.config.model.position[1]),
            idle: IdleAnimator::new(self.config.idle.angular_rate),
            model_config: self.config.model.clone(),
            load: Some(self.loader.load(source)),
            model: None,
            fallback: false,
            loading,
        }));

        let weak: Weak<RefCell<MountState>> = Rc::downgrade(&state);
        let subscription = frames.subscribe(Box::new(move |frame: &FrameInfo| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            match state.try_borrow_mut() {
                Ok(mut state) => state.on_frame(frame),
                Err(_) => warn!("Scene state busy, skipping frame {}", frame.number),
            };
        }));

        info!("Scene mounted ({})", self.config.scroll.trigger_id);
        self.mounted = Some(Mounted {
            state,
            subscription,
        });
        Ok(())
    }

    /// Tear down in order. A load still in flight is abandoned.
    pub fn unmount(&mut self, frames: &mut FrameLoop) -> bool {
        let Some(mounted) = self.mounted.take() else {
            return false;
        };

        frames.unsubscribe(mounted.subscription);
        mounted.state.borrow_mut().teardown();

        info!("Scene unmounted");
        true
    }

    /// Swap in a different model, rebinding the scroll trigger. Cancels any
    /// pending load so it cannot overwrite the replacement.
    pub fn replace_model(&mut self, model: Model) -> bool {
        let Some(mounted) = &self.mounted else {
            return false;
        };
        let mut state = mounted.state.borrow_mut();
        state.load = None;
        state.fallback = false;
        state.set_model(model);
        true
    }

    /// Copy of the current model, if one has been installed
    pub fn model_snapshot(&self) -> Option<Model> {
        let mounted = self.mounted.as_ref()?;
        let state = mounted.state.borrow();
        let model = state.model.as_ref()?;
        let snapshot = model.borrow().clone();
        Some(snapshot)
    }

    pub fn has_model(&self) -> bool {
        self.mounted
            .as_ref()
            .map_or(false, |m| m.state.borrow().model.is_some())
    }

    pub fn is_loading(&self) -> bool {
        self.mounted
            .as_ref()
            .map_or(false, |m| m.state.borrow().load.is_some())
    }

    pub fn is_fallback(&self) -> bool {
        self.mounted
            .as_ref()
            .map_or(false, |m| m.state.borrow().fallback)
    }

    pub fn loading_state(&self) -> LoadingState {
        self.mounted
            .as_ref()
            .map_or(LoadingState::Idle, |m| m.state.borrow().loading.state())
    }

    pub fn scroll_progress(&self) -> f32 {
        self.mounted
            .as_ref()
            .map_or(0.0, |m| m.state.borrow().binder.progress())
    }
}

impl Drop for SceneController {
    fn drop(&mut self) {
        let Some(mounted) = self.mounted.take() else {
            return;
        };
        match mounted.state.try_borrow_mut() {
            Ok(mut state) => state.teardown(),
            Err(_) => warn!("Scene state busy while dropping, teardown skipped"),
        }
        debug!("Scene dropped while mounted, frame callback left inert");
    }
}
