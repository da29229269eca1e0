use log::{trace, warn};
use std::cell::Cell;
use std::rc::Rc;

use super::trigger::{TriggerId, TriggerSpec, TriggerUpdate};
use crate::traits::ScrollTriggerEngine;
use crate::transform::{apply, map_progress, MapperConfig};
use crate::types::SharedModel;

/// Binds one scroll trigger to one model.
///
/// The trigger callback holds only a `Weak` to the model, so a model released
/// by its owner can never be mutated by a late callback. Rebinding always
/// kills the previous registration before creating the next one.
pub struct ScrollBinder {
    spec: TriggerSpec,
    mapper: MapperConfig,
    base_y: f32,
    registered: Option<TriggerId>,
    progress: Rc<Cell<f32>>,
}

impl ScrollBinder {
    pub fn new(spec: TriggerSpec, mapper: MapperConfig, base_y: f32) -> Self {
        Self {
            spec,
            mapper,
            base_y,
            registered: None,
            progress: Rc::new(Cell::new(0.0)),
        }
    }

    pub fn trigger_id(&self) -> &TriggerId {
        &self.spec.id
    }

    pub fn is_bound(&self) -> bool {
        self.registered.is_some()
    }

    /// Last progress delivered by the engine (0 while unbound)
    pub fn progress(&self) -> f32 {
        self.progress.get()
    }

    /// Register the trigger for `model`, replacing any earlier registration.
    /// Returns false when the trigger region is missing from the layout; the
    /// binder then stays unbound and reports zero progress.
    pub fn bind(&mut self, engine: &mut dyn ScrollTriggerEngine, model: &SharedModel) -> bool {
        self.unbind(engine);

        let weak = Rc::downgrade(model);
        let progress = Rc::clone(&self.progress);
        let mapper = self.mapper;
        let base_y = self.base_y;

        let on_update = Box::new(move |update: &TriggerUpdate| {
            progress.set(update.progress);

            let Some(shared) = weak.upgrade() else {
                return;
            };
            let Ok(mut model) = shared.try_borrow_mut() else {
                trace!("Model busy, skipping scroll update");
                return;
            };
            if !model.is_disposed() {
                apply(&mut model, &map_progress(update.progress, base_y, &mapper));
            }
        });

        match engine.create(self.spec.clone(), on_update) {
            Ok(id) => {
                self.registered = Some(id);
                true
            }
            Err(e) => {
                warn!("Scroll binding skipped: {}", e);
                self.progress.set(0.0);
                false
            }
        }
    }

    /// Kill the registration, if any. No callback fires after this returns.
    pub fn unbind(&mut self, engine: &mut dyn ScrollTriggerEngine) -> bool {
        match self.registered.take() {
            Some(id) => engine.kill(id.as_str()),
            None => false,
        }
    }
}
