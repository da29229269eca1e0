use log::debug;

use crate::scroll::TriggerId;
use crate::traits::ScrollTriggerEngine;

/// Kill every active trigger whose id is not in `keep`.
/// Returns the ids that were killed.
pub fn reconcile(engine: &mut dyn ScrollTriggerEngine, keep: &[&str]) -> Vec<TriggerId> {
    let stale: Vec<TriggerId> = engine
        .active_ids()
        .into_iter()
        .filter(|id| !keep.contains(&id.as_str()))
        .collect();

    for id in &stale {
        engine.kill(id.as_str());
    }

    if !stale.is_empty() {
        debug!("Reconciled scroll triggers, killed {:?}", stale);
    }
    stale
}
