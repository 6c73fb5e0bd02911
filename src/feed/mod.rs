//! The activity feed engine: takes a chronological slice of the event log,
//! drops what the viewer may not see, resolves the objects the survivors
//! reference and folds them into the nested (target, actor) group forest with
//! a backward-paging time window.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    database::{event::Event, level::Level, user::User},
    error::AppError,
};

pub mod groups;
pub mod objects;
pub mod ranking;
pub mod visibility;
pub mod window;

use groups::{Group, GroupBuilder};
use objects::{ObjectStore, ReferencedObjects};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuerySource {
    Game,
    Api,
}

/// Who a page is being built for. `is_staff` is resolved by the caller from
/// the viewer's token, the engine never checks roles on its own.
#[derive(Debug, Clone, Copy)]
pub struct ViewerContext {
    pub user_id: Option<Uuid>,
    pub source: QuerySource,
    pub is_staff: bool,
}

impl ViewerContext {
    pub fn anonymous(source: QuerySource) -> ViewerContext {
        ViewerContext {
            user_id: None,
            source,
            is_staff: false,
        }
    }
}

/// The per-request result: time window, group forest and the deduplicated
/// objects the surviving events reference. Scores and photos are working
/// state of the build and are not carried on the page.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct ActivityPage {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub groups: Vec<Group>,
    pub users: Vec<User>,
    pub levels: Vec<Level>,
}

impl ActivityPage {
    /// Upper time bound for the next backward page, sentinel passed through
    /// when this page was empty.
    pub fn next_page_end(&self) -> DateTime<Utc> {
        window::next_page_end(self.end)
    }
}

/// One synchronous pass per request: filter, resolve, group, prune, window.
/// Filtering runs first so a fully-excluded event leaks none of its
/// referenced objects into the page.
pub async fn build_activity_page<S: ObjectStore>(
    store: &S,
    events: Vec<Event>,
    viewer: &ViewerContext,
) -> Result<ActivityPage, AppError> {
    let visible: Vec<Event> = events
        .into_iter()
        .filter(|event| visibility::can_view(event, viewer))
        .collect();

    let objects = ReferencedObjects::resolve(store, &visible).await?;

    let mut builder = GroupBuilder::new(&objects);
    for event in visible {
        builder.push(event);
    }
    let groups = builder.finish();

    let (start, end) = window::page_span(&groups);

    Ok(ActivityPage {
        start,
        end,
        groups,
        users: objects.users.into_iter().map(|(_, user)| user).collect(),
        levels: objects.levels.into_iter().map(|(_, level)| level).collect(),
    })
}
