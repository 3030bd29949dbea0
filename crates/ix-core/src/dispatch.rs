//! Event propagation through an interactable hierarchy
//!
//! The host's interaction manager decides which interactable an interactor
//! targets. Once it has the target and its interactable ancestors, it hands
//! them here: the target receives the event in the `Target` phase, then each
//! ancestor in the `BubbleUp` phase until a subscriber stops propagation.

use crate::interactable::{Interactable, InteractionKind, InteractorEvent, PropagationPhase};
use crate::interactor::Interactor;

/// Deliver one interaction to `chain[0]` and bubble it up the rest.
///
/// Returns how many interactables received the event.
pub fn dispatch_bubbling(
    chain: &mut [&mut Interactable],
    kind: InteractionKind,
    interactor: &Interactor,
) -> usize {
    let mut delivered = 0;
    for (depth, interactable) in chain.iter_mut().enumerate() {
        let phase = if depth == 0 {
            PropagationPhase::Target
        } else {
            PropagationPhase::BubbleUp
        };
        let mut event = InteractorEvent::new(interactor.clone()).with_phase(phase);
        interactable.handle(kind, &mut event);
        delivered += 1;

        if event.is_propagation_stopped() {
            tracing::trace!(
                "{:?} stopped at '{}' ({:?})",
                kind,
                interactable.name(),
                phase
            );
            break;
        }
    }
    delivered
}
