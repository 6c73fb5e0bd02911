use crate::database::event::{Event, EventOverType};

use super::{QuerySource, ViewerContext};

fn is_actor_or_involved(event: &Event, viewer: &ViewerContext) -> bool {
    let Some(viewer_id) = viewer.user_id else {
        return false;
    };
    event.actor == viewer_id || event.involved_user == Some(viewer_id)
}

/// Pure predicate deciding whether `viewer` may see `event` at all. Runs
/// before object resolution, so an excluded event can't leak its referenced
/// objects into the page either.
pub fn can_view(event: &Event, viewer: &ViewerContext) -> bool {
    match event.over_type {
        // Restricted to the acting moderator, the owner of the moderated
        // content, and staff.
        EventOverType::Moderation => is_actor_or_involved(event, viewer) || viewer.is_staff,
        // Once the referent is gone these stay with the involved parties
        // only, even though they used to be public.
        EventOverType::DeletedObjectActivity => {
            is_actor_or_involved(event, viewer) || viewer.is_staff
        }
        EventOverType::Activity => {
            if event.is_private && !is_actor_or_involved(event, viewer) && !viewer.is_staff {
                return false;
            }
            if viewer.source == QuerySource::Game && event.kind.is_custom() {
                return false;
            }
            true
        }
    }
}
