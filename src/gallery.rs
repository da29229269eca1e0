use log::{debug, warn};
use std::cell::Cell;
use std::rc::Rc;

use crate::config::GalleryConfig;
use crate::scroll::{Boundary, Edge, Scrub, TriggerId, TriggerSpec, TriggerUpdate};
use crate::traits::ScrollTriggerEngine;

/// Horizontal card strip measured in pixels
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryLayout {
    pub card_widths: Vec<f32>,
    pub margin_left: f32,
    pub padding_right: f32,
}

impl GalleryLayout {
    pub fn from_config(config: &GalleryConfig) -> Self {
        Self {
            card_widths: config.card_widths.clone(),
            margin_left: config.margin_left,
            padding_right: config.padding_right,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.card_widths.iter().sum::<f32>() + self.margin_left + self.padding_right
    }

    /// Horizontal distance the strip travels while pinned
    pub fn scroll_amount(&self, viewport_width: f32, buffer: f32) -> f32 {
        (self.content_width() - viewport_width + buffer).max(0.0)
    }
}

/// The pinned work gallery. Owns one trigger that lives alongside the model's.
pub struct PinnedGallery {
    id: TriggerId,
    selector: String,
    layout: GalleryLayout,
    end_buffer: f32,
    scroll_amount: f32,
    offset_x: Rc<Cell<f32>>,
    mounted: bool,
}

impl PinnedGallery {
    pub fn new(config: &GalleryConfig) -> Self {
        Self {
            id: TriggerId::new(config.trigger_id.as_str()),
            selector: config.selector.clone(),
            layout: GalleryLayout::from_config(config),
            end_buffer: config.end_buffer,
            scroll_amount: 0.0,
            offset_x: Rc::new(Cell::new(0.0)),
            mounted: false,
        }
    }

    pub fn trigger_id(&self) -> &TriggerId {
        &self.id
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn scroll_amount(&self) -> f32 {
        self.scroll_amount
    }

    /// Current horizontal translation of the strip (zero or negative)
    pub fn offset_x(&self) -> f32 {
        self.offset_x.get()
    }

    /// Register the pin trigger sized to the engine's current viewport
    pub fn mount(&mut self, engine: &mut dyn ScrollTriggerEngine, viewport_width: f32) -> bool {
        self.scroll_amount = self.layout.scroll_amount(viewport_width, self.end_buffer);

        let spec = TriggerSpec::new(
            self.id.as_str(),
            self.selector.as_str(),
            Boundary::anchor(Edge::Top, Edge::Top),
            Boundary::Relative(self.scroll_amount),
        )
        .with_scrub(Scrub::Immediate);

        let offset_x = Rc::clone(&self.offset_x);
        let amount = self.scroll_amount;
        let on_update = Box::new(move |update: &TriggerUpdate| {
            offset_x.set(-amount * update.progress);
        });

        match engine.create(spec, on_update) {
            Ok(_) => {
                debug!("Gallery pinned for {}px", self.scroll_amount);
                self.mounted = true;
                true
            }
            Err(e) => {
                warn!("Gallery not pinned: {}", e);
                false
            }
        }
    }

    pub fn unmount(&mut self, engine: &mut dyn ScrollTriggerEngine) -> bool {
        if !std::mem::take(&mut self.mounted) {
            return false;
        }
        self.offset_x.set(0.0);
        engine.kill(self.id.as_str())
    }
}
