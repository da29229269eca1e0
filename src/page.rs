use log::debug;
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use crate::config::SceneConfig;
use crate::controller::{ControllerError, SceneController};
use crate::core::FrameLoop;
use crate::frame::FrameInfo;
use crate::gallery::PinnedGallery;
use crate::loaders::AssetLoader;
use crate::loading::LoadingScreen;
use crate::scenes::{EnvironmentLoad, Stage};
use crate::scroll::{PageLayout, SharedRegistry, TriggerRegistry};
use crate::traits::AssetFetcher;

/// A landing page: the scene controller, the pinned work gallery and a
/// loading screen sharing one trigger registry and one frame loop.
pub struct Page {
    registry: SharedRegistry,
    frames: FrameLoop,
    screen: Rc<RefCell<LoadingScreen>>,
    gallery: PinnedGallery,
    controller: SceneController,
    stage: Stage,
    environment: Option<EnvironmentLoad>,
    fetcher: Arc<dyn AssetFetcher>,
    frame_number: u64,
    time: f32,
}

impl Page {
    pub fn new(
        config: SceneConfig,
        layout: PageLayout,
        fetcher: Arc<dyn AssetFetcher>,
    ) -> Result<Self, ControllerError> {
        Self::with_registry(config, TriggerRegistry::new(layout).into_shared(), fetcher)
    }

    /// Build on an existing registry, such as [`crate::scroll::global`]
    pub fn with_registry(
        config: SceneConfig,
        registry: SharedRegistry,
        fetcher: Arc<dyn AssetFetcher>,
    ) -> Result<Self, ControllerError> {
        let loader = AssetLoader::new(Arc::clone(&fetcher), config.model.load_timeout);
        let gallery = PinnedGallery::new(&config.gallery);
        let mut stage = Stage::from_config(&config.stage);
        {
            let registry = registry.borrow();
            let layout = registry.layout();
            stage.resize(layout.viewport_width, layout.viewport_height);
        }
        let controller = SceneController::new(config, registry.clone(), loader)?;

        Ok(Self {
            registry,
            frames: FrameLoop::new(),
            screen: Rc::new(RefCell::new(LoadingScreen::new())),
            gallery,
            controller,
            stage,
            environment: None,
            fetcher,
            frame_number: 0,
            time: 0.0,
        })
    }

    /// Mount the scene first so the loading screen is dismissed right away.
    /// The backdrop is fetched in the background and installed by [`Self::tick`].
    pub fn mount(&mut self) -> Result<(), ControllerError> {
        self.controller.mount(&mut self.frames, Rc::clone(&self.screen))?;
        if !self.gallery.is_mounted() {
            let viewport_width = self.registry.borrow().layout().viewport_width;
            self.gallery.mount(&mut *self.registry.borrow_mut(), viewport_width);
        }
        if self.stage.environment.is_none() && self.environment.is_none() {
            self.environment = self.stage.begin_environment(Arc::clone(&self.fetcher));
        }
        Ok(())
    }

    pub fn unmount(&mut self) {
        self.environment = None;
        self.controller.unmount(&mut self.frames);
        self.gallery.unmount(&mut *self.registry.borrow_mut());
    }

    /// Full teardown followed by a fresh mount
    pub fn remount(&mut self) -> Result<(), ControllerError> {
        debug!("Remounting page");
        self.unmount();
        self.mount()
    }

    pub fn scroll_to(&mut self, scroll_y: f32) {
        self.registry.borrow_mut().scroll_to(scroll_y);
    }

    pub fn scroll_by(&mut self, delta_y: f32) {
        let scroll_y = self.scroll_y() + delta_y;
        self.scroll_to(scroll_y);
    }

    pub fn scroll_y(&self) -> f32 {
        self.registry.borrow().scroll_y()
    }

    /// Change the viewport. Trigger boundaries are recomputed and the
    /// gallery is re-pinned for the new width.
    pub fn resize(&mut self, width: f32, height: f32) {
        let layout = self.registry.borrow().layout().resized(width, height);
        self.set_layout(layout);
    }

    pub fn set_layout(&mut self, layout: PageLayout) {
        let (width, height) = (layout.viewport_width, layout.viewport_height);
        self.registry.borrow_mut().set_layout(layout);
        self.stage.resize(width, height);
        if self.gallery.is_mounted() {
            self.gallery.mount(&mut *self.registry.borrow_mut(), width);
        }
    }

    /// One animation frame: scrub smoothing first, then frame callbacks
    pub fn advance(&mut self, delta: f32) -> FrameInfo {
        self.time += delta;
        let frame = FrameInfo::new(self.frame_number, self.time, delta);
        self.frame_number += 1;
        self.tick(&frame);
        frame
    }

    /// Drive a frame from an external [`crate::traits::FrameSource`]
    pub fn tick(&mut self, frame: &FrameInfo) {
        self.registry.borrow_mut().tick(frame.delta);
        self.frames.tick(frame);

        if let Some(load) = self.environment.as_mut() {
            if self.stage.poll_environment(load).is_some() {
                self.environment = None;
            }
        }
    }

    /// True while the backdrop fetch is in flight
    pub fn is_environment_loading(&self) -> bool {
        self.environment.is_some()
    }

    pub fn controller(&self) -> &SceneController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut SceneController {
        &mut self.controller
    }

    pub fn gallery(&self) -> &PinnedGallery {
        &self.gallery
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn loading_screen(&self) -> Ref<'_, LoadingScreen> {
        self.screen.borrow()
    }

    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    pub fn frame_callbacks(&self) -> usize {
        self.frames.len()
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ScrollTriggerEngine;

    fn page() -> Page {
        let mut config = SceneConfig::default();
        config.model.procedural = true;
        config.stage.environment = None;
        let layout = PageLayout::stacked(
            1280.0,
            800.0,
            [(".landing-section", 1000.0), (".work-section", 800.0)],
        );
        Page::new(config, layout, Arc::new(crate::loaders::FsFetcher::new())).unwrap()
    }

    #[test]
    fn mount_registers_both_triggers() {
        let mut page = page();
        page.mount().unwrap();

        // the model trigger is created once the load settles
        for _ in 0..600 {
            page.advance(1.0 / 60.0);
            if page.controller().has_model() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(1));
        }

        let ids = page.registry().borrow().active_ids();
        assert_eq!(ids.len(), 2);
        assert!(ids.iter().any(|id| id.as_str() == "work"));
        assert!(ids.iter().any(|id| id.as_str() == "landing-model"));
        assert!(!page.loading_screen().is_visible());
    }

    #[test]
    fn resize_repins_gallery() {
        let mut page = page();
        page.mount().unwrap();
        let before = page.gallery().scroll_amount();

        page.resize(1000.0, 800.0);
        assert_eq!(page.gallery().scroll_amount(), before + 280.0);
        assert!((page.stage().camera.aspect - 1.25).abs() < 1e-6);
    }

    #[test]
    fn unmount_clears_registry_and_frame_loop() {
        let mut page = page();
        page.mount().unwrap();
        page.unmount();
        assert!(page.registry().borrow().is_empty());
        assert_eq!(page.frame_callbacks(), 0);
    }
}
