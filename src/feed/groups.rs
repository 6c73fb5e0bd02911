use chrono::{DateTime, Utc};
use hashlink::LinkedHashMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::event::{Event, EventOverType, StoredData};

use super::objects::ReferencedObjects;

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(tag = "group_type", content = "group_id", rename_all = "snake_case")]
pub enum GroupKey {
    User(Uuid),
    Level(i32),
}

/// One node of the page's result forest. `timestamp` is fixed to the first
/// event that created the node and only used for ordering.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct Group {
    #[serde(flatten)]
    pub key: GroupKey,
    pub timestamp: DateTime<Utc>,
    pub events: Vec<Event>,
    pub children: Vec<Group>,
}

impl Group {
    pub fn event_count(&self) -> usize {
        self.events.len()
            + self
                .children
                .iter()
                .map(Group::event_count)
                .sum::<usize>()
    }
}

#[derive(Debug)]
struct GroupNode {
    timestamp: DateTime<Utc>,
    events: Vec<Event>,
    children: LinkedHashMap<GroupKey, GroupNode>,
}

impl GroupNode {
    fn new(timestamp: DateTime<Utc>) -> GroupNode {
        GroupNode {
            timestamp,
            events: Vec::new(),
            children: LinkedHashMap::new(),
        }
    }

    fn into_group(self, key: GroupKey) -> Group {
        Group {
            key,
            timestamp: self.timestamp,
            events: self.events,
            children: self
                .children
                .into_iter()
                .map(|(key, node)| node.into_group(key))
                .collect(),
        }
    }
}

/// Builds the nested (target, actor) forest for one page. Group lookup is a
/// composite-key map, so re-requesting an existing pair appends to the same
/// node. Scratch state lives only inside the builder and is gone after
/// [`GroupBuilder::finish`].
pub struct GroupBuilder<'a> {
    objects: &'a ReferencedObjects,
    roots: LinkedHashMap<GroupKey, GroupNode>,
}

impl<'a> GroupBuilder<'a> {
    pub fn new(objects: &'a ReferencedObjects) -> GroupBuilder<'a> {
        GroupBuilder {
            objects,
            roots: LinkedHashMap::new(),
        }
    }

    /// Events must arrive in the page's input order, which callers supply
    /// chronologically.
    pub fn push(&mut self, event: Event) {
        // ratings, reviews, comments, playlists, challenges, contests,
        // assets and pins are not grouped yet, whether their referent is
        // still alive or not
        if !matches!(
            event.data,
            StoredData::User(_) | StoredData::Level(_) | StoredData::Photo(_) | StoredData::Score(_)
        ) {
            return;
        }

        // The referent is gone, so there is nothing to group under. These
        // collapse to a flat root group per actor.
        if event.over_type == EventOverType::DeletedObjectActivity {
            self.attach_flat(GroupKey::User(event.actor), event);
            return;
        }

        match event.data {
            StoredData::User(target) => {
                if self.objects.users.contains_key(&target) {
                    self.attach_nested(GroupKey::User(target), event);
                } else {
                    self.attach_flat(GroupKey::User(event.actor), event);
                }
            }
            StoredData::Level(id) => self.attach_under_level(Some(id), event),
            StoredData::Photo(id) => {
                let level = self
                    .objects
                    .photos
                    .get(&id)
                    .and_then(|photo| photo.level_id);
                self.attach_under_level(level, event);
            }
            StoredData::Score(id) => {
                let level = self.objects.scores.get(&id).map(|score| score.level_id);
                self.attach_under_level(level, event);
            }
            // ungrouped categories returned above
            _ => {}
        }
    }

    fn attach_under_level(&mut self, level_id: Option<i32>, event: Event) {
        let resolved = level_id.filter(|id| self.objects.levels.contains_key(id));
        match resolved {
            Some(id) => self.attach_nested(GroupKey::Level(id), event),
            // orphaned photo or unresolvable level, the actor group has to do
            None => self.attach_flat(GroupKey::User(event.actor), event),
        }
    }

    /// Root group keyed by the target, actor group nested inside it.
    fn attach_nested(&mut self, root_key: GroupKey, event: Event) {
        let root = self
            .roots
            .entry(root_key)
            .or_insert_with(|| GroupNode::new(event.timestamp));
        let actor_group = root
            .children
            .entry(GroupKey::User(event.actor))
            .or_insert_with(|| GroupNode::new(event.timestamp));
        actor_group.events.push(event);
    }

    fn attach_flat(&mut self, key: GroupKey, event: Event) {
        let node = self
            .roots
            .entry(key)
            .or_insert_with(|| GroupNode::new(event.timestamp));
        node.events.push(event);
    }

    /// Converts the lookup tables into the final forest and prunes any
    /// subtree that ended up with no events anywhere under it.
    pub fn finish(self) -> Vec<Group> {
        self.roots
            .into_iter()
            .map(|(key, node)| node.into_group(key))
            .filter_map(prune_empty)
            .collect()
    }
}

fn prune_empty(mut group: Group) -> Option<Group> {
    group.children = group
        .children
        .into_iter()
        .filter_map(prune_empty)
        .collect();
    if group.events.is_empty() && group.children.is_empty() {
        None
    } else {
        Some(group)
    }
}
