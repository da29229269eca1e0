use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

use super::layout::PageLayout;
use super::scrub::Scrub;
use super::trigger::{
    Direction, TriggerError, TriggerId, TriggerInfo, TriggerSpec, TriggerUpdate, UpdateCallback,
};
use crate::math::inverse_lerp;
use crate::traits::ScrollTriggerEngine;

/// Registry handle shared by everything on the page's event loop
pub type SharedRegistry = Rc<RefCell<TriggerRegistry>>;

thread_local! {
    static GLOBAL_REGISTRY: SharedRegistry = TriggerRegistry::default().into_shared();
}

/// The process-wide registry for the current (event-loop) thread
pub fn global() -> SharedRegistry {
    GLOBAL_REGISTRY.with(Rc::clone)
}

struct Entry {
    spec: TriggerSpec,
    bounds: Option<(f32, f32)>,
    raw: f32,
    progress: f32,
    reported: Option<f32>,
    on_update: UpdateCallback,
}

impl Entry {
    /// Recompute boundary offsets from scratch
    fn resolve(&mut self, layout: &PageLayout) {
        self.bounds = layout.section(&self.spec.target).map(|section| {
            let start = self.spec.start.resolve(section, layout.viewport_height, section.top);
            let end = self.spec.end.resolve(section, layout.viewport_height, start);
            (start, end)
        });
    }

    fn measure(&mut self, scroll_y: f32) {
        self.raw = match self.bounds {
            Some((start, end)) => inverse_lerp(start, end, scroll_y),
            None => 0.0,
        };
    }

    fn is_inside(&self, scroll_y: f32) -> bool {
        self.bounds
            .map_or(false, |(start, end)| scroll_y >= start && scroll_y <= end)
    }

    fn report(&mut self, scroll_y: f32, force: bool) {
        let direction = match self.reported {
            Some(last) if self.progress > last => Direction::Forward,
            Some(last) if self.progress < last => Direction::Backward,
            Some(_) if !force => return,
            _ => Direction::Still,
        };

        self.reported = Some(self.progress);
        let update = TriggerUpdate {
            progress: self.progress,
            direction,
            active: self.is_inside(scroll_y),
        };
        (self.on_update)(&update);
    }

    fn info(&self) -> TriggerInfo {
        TriggerInfo {
            id: self.spec.id.clone(),
            target: self.spec.target.clone(),
            bounds: self.bounds,
            raw_progress: self.raw,
            progress: self.progress,
        }
    }
}

/// In-process scroll-trigger engine: one table of triggers keyed by id,
/// driven by `scroll_to` (scroll events), `tick` (animation frames) and
/// `set_layout` (resize, late content).
pub struct TriggerRegistry {
    layout: PageLayout,
    scroll_y: f32,
    entries: Vec<Entry>,
}

impl TriggerRegistry {
    pub fn new(layout: PageLayout) -> Self {
        Self {
            layout,
            scroll_y: 0.0,
            entries: Vec::new(),
        }
    }

    pub fn into_shared(self) -> SharedRegistry {
        Rc::new(RefCell::new(self))
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace the page geometry; every boundary is recomputed
    pub fn set_layout(&mut self, layout: PageLayout) {
        self.layout = layout;
        self.refresh();
    }

    /// Record a scroll event. Unsmoothed triggers report immediately,
    /// smoothed ones catch up on subsequent ticks.
    pub fn scroll_to(&mut self, scroll_y: f32) {
        self.scroll_y = scroll_y.max(0.0);
        let scroll_y = self.scroll_y;

        for entry in self.entries.iter_mut() {
            entry.measure(scroll_y);
            if entry.spec.scrub == Scrub::Immediate {
                entry.progress = entry.raw;
                entry.report(scroll_y, false);
            }
        }
    }

    /// Advance scrub smoothing by one animation frame
    pub fn tick(&mut self, delta: f32) {
        let scroll_y = self.scroll_y;

        for entry in self.entries.iter_mut() {
            if let Scrub::Smoothed(_) = entry.spec.scrub {
                entry.progress = entry.spec.scrub.step(entry.progress, entry.raw, delta);
                entry.report(scroll_y, false);
            }
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.spec.id.as_str() == id)
    }
}

impl Default for TriggerRegistry {
    fn default() -> Self {
        Self::new(PageLayout::default())
    }
}

impl ScrollTriggerEngine for TriggerRegistry {
    fn create(&mut self, spec: TriggerSpec, on_update: UpdateCallback) -> Result<TriggerId, TriggerError> {
        if self.layout.section(&spec.target).is_none() {
            return Err(TriggerError::MissingTarget(spec.target));
        }

        let id = spec.id.clone();
        if self.kill(id.as_str()) {
            debug!("Replaced stale scroll trigger '{}'", id);
        }

        let scroll_y = self.scroll_y;
        let mut entry = Entry {
            spec,
            bounds: None,
            raw: 0.0,
            progress: 0.0,
            reported: None,
            on_update,
        };
        entry.resolve(&self.layout);
        entry.measure(scroll_y);
        entry.progress = entry.raw;

        debug!(
            "Created scroll trigger '{}' on {} bounds={:?}",
            id, entry.spec.target, entry.bounds
        );

        entry.report(scroll_y, true);
        self.entries.push(entry);
        Ok(id)
    }

    fn get_by_id(&self, id: &str) -> Option<TriggerInfo> {
        self.position(id).map(|i| self.entries[i].info())
    }

    fn kill(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(i) => {
                self.entries.remove(i);
                debug!("Killed scroll trigger '{}'", id);
                true
            }
            None => false,
        }
    }

    fn active_ids(&self) -> Vec<TriggerId> {
        self.entries.iter().map(|e| e.spec.id.clone()).collect()
    }

    fn refresh(&mut self) {
        let scroll_y = self.scroll_y;

        for entry in self.entries.iter_mut() {
            entry.resolve(&self.layout);
            entry.measure(scroll_y);
            if entry.bounds.is_none() || entry.spec.scrub == Scrub::Immediate {
                entry.progress = entry.raw;
            }
            entry.report(scroll_y, true);
        }
    }
}
