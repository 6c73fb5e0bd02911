use chrono::{DateTime, Duration, Utc};
use playhub_backend_rs::{
    database::event::{EventKind, EventOverType, StoredData},
    feed::{
        build_activity_page,
        groups::GroupKey,
        objects::ReferencedObjects,
        QuerySource, ViewerContext,
    },
};
use uuid::Uuid;

use common::{at, make_event, make_level, make_photo, make_score, make_user, InMemoryStore};

mod common;

fn viewer(user_id: Option<Uuid>, source: QuerySource, is_staff: bool) -> ViewerContext {
    ViewerContext {
        user_id,
        source,
        is_staff,
    }
}

#[tokio::test]
async fn resolver_deduplicates_repeated_references() {
    let user = make_user("uploader");
    let actor_id = user.id;
    let level = make_level(10, actor_id);
    let store = InMemoryStore::default().with_user(user).with_level(level);

    let events = vec![
        make_event(EventKind::LevelUpload, actor_id, StoredData::Level(10), at(3, 9)),
        make_event(EventKind::LevelPlay, actor_id, StoredData::Level(10), at(3, 10)),
        make_event(EventKind::LevelFavourite, actor_id, StoredData::Level(10), at(3, 11)),
    ];

    let objects = ReferencedObjects::resolve(&store, &events)
        .await
        .expect("resolution failed");
    assert_eq!(objects.users.len(), 1);
    assert_eq!(objects.levels.len(), 1);

    // resolving the same batch again changes nothing
    let again = ReferencedObjects::resolve(&store, &events)
        .await
        .expect("resolution failed");
    assert_eq!(again.users.len(), 1);
    assert_eq!(again.levels.len(), 1);
}

#[tokio::test]
async fn moderation_events_leak_nothing_to_uninvolved_viewers() {
    let moderator = make_user("moderator");
    let owner = make_user("owner");
    let moderator_id = moderator.id;
    let owner_id = owner.id;
    let level = make_level(5, owner_id);
    let store = InMemoryStore::default()
        .with_user(moderator)
        .with_user(owner)
        .with_level(level);

    let mut event = make_event(
        EventKind::LevelModerated,
        moderator_id,
        StoredData::Level(5),
        at(4, 12),
    );
    event.over_type = EventOverType::Moderation;
    event.involved_user = Some(owner_id);
    event.description = Some("removed for broken checkpoints".to_string());

    for allowed in [moderator_id, owner_id] {
        let page = build_activity_page(
            &store,
            vec![event.clone()],
            &viewer(Some(allowed), QuerySource::Api, false),
        )
        .await
        .expect("page build failed");
        assert_eq!(page.groups.len(), 1);
    }

    let staff_page = build_activity_page(
        &store,
        vec![event.clone()],
        &viewer(Some(Uuid::new_v4()), QuerySource::Api, true),
    )
    .await
    .expect("page build failed");
    assert_eq!(staff_page.groups.len(), 1);

    // an unrelated viewer gets nothing, not even the referenced objects
    let hidden = build_activity_page(
        &store,
        vec![event],
        &viewer(Some(Uuid::new_v4()), QuerySource::Api, false),
    )
    .await
    .expect("page build failed");
    assert!(hidden.groups.is_empty());
    assert!(hidden.users.is_empty());
    assert!(hidden.levels.is_empty());
}

#[tokio::test]
async fn deleted_level_events_flatten_for_the_actor_only() {
    let user = make_user("player");
    let actor_id = user.id;
    // level 12 is gone from the store on purpose
    let store = InMemoryStore::default().with_user(user);

    let mut favourite = make_event(
        EventKind::LevelFavourite,
        actor_id,
        StoredData::Level(12),
        at(5, 8),
    );
    favourite.over_type = EventOverType::DeletedObjectActivity;
    let mut play = make_event(EventKind::LevelPlay, actor_id, StoredData::Level(12), at(5, 9));
    play.over_type = EventOverType::DeletedObjectActivity;
    let events = vec![favourite, play];

    let own_page = build_activity_page(
        &store,
        events.clone(),
        &viewer(Some(actor_id), QuerySource::Api, false),
    )
    .await
    .expect("page build failed");
    assert_eq!(own_page.groups.len(), 1);
    let root = &own_page.groups[0];
    assert_eq!(root.key, GroupKey::User(actor_id));
    assert_eq!(root.events.len(), 2);
    assert!(root.children.is_empty());

    let other_page = build_activity_page(
        &store,
        events,
        &viewer(Some(Uuid::new_v4()), QuerySource::Api, false),
    )
    .await
    .expect("page build failed");
    assert!(other_page.groups.is_empty());
}

#[tokio::test]
async fn game_queries_drop_custom_event_kinds() {
    let user = make_user("returning");
    let actor_id = user.id;
    let level = make_level(2, actor_id);
    let store = InMemoryStore::default().with_user(user).with_level(level);

    let events = vec![
        make_event(EventKind::FirstLogin, actor_id, StoredData::User(actor_id), at(6, 7)),
        make_event(EventKind::LevelUpload, actor_id, StoredData::Level(2), at(6, 8)),
    ];

    let game_page = build_activity_page(
        &store,
        events.clone(),
        &viewer(Some(actor_id), QuerySource::Game, false),
    )
    .await
    .expect("page build failed");
    let game_events: usize = game_page.groups.iter().map(|group| group.event_count()).sum();
    assert_eq!(game_events, 1);
    assert_eq!(game_page.groups[0].key, GroupKey::Level(2));

    let api_page = build_activity_page(
        &store,
        events,
        &viewer(Some(actor_id), QuerySource::Api, false),
    )
    .await
    .expect("page build failed");
    let api_events: usize = api_page.groups.iter().map(|group| group.event_count()).sum();
    assert_eq!(api_events, 2);
}

#[tokio::test]
async fn window_matches_surviving_events_and_cursor_steps_back() {
    let user = make_user("player");
    let actor_id = user.id;
    let level = make_level(3, actor_id);
    let store = InMemoryStore::default().with_user(user).with_level(level);

    let early = at(10, 6);
    let late = at(12, 22);
    let events = vec![
        make_event(EventKind::LevelPlay, actor_id, StoredData::Level(3), early),
        make_event(EventKind::LevelFavourite, actor_id, StoredData::Level(3), late),
    ];

    let page = build_activity_page(&store, events, &viewer(None, QuerySource::Api, false))
        .await
        .expect("page build failed");
    assert_eq!(page.start, early);
    assert_eq!(page.end, late);
    assert_eq!(page.next_page_end(), late - Duration::days(7));
}

#[tokio::test]
async fn empty_page_keeps_its_sentinels() {
    let store = InMemoryStore::default();
    let page = build_activity_page(&store, Vec::new(), &viewer(None, QuerySource::Api, false))
        .await
        .expect("page build failed");

    assert!(page.groups.is_empty());
    assert_eq!(page.start, DateTime::<Utc>::MAX_UTC);
    assert_eq!(page.end, DateTime::<Utc>::MIN_UTC);
    assert_eq!(page.next_page_end(), DateTime::<Utc>::MIN_UTC);
}

#[tokio::test]
async fn photos_pull_their_level_onto_the_page() {
    let user = make_user("photographer");
    let actor_id = user.id;
    let level = make_level(8, actor_id);
    let photo = make_photo(77, actor_id, Some(8));
    let store = InMemoryStore::default()
        .with_user(user)
        .with_level(level)
        .with_photo(photo);

    // the event only references the photo, the level comes in transitively
    let events = vec![make_event(
        EventKind::PhotoUpload,
        actor_id,
        StoredData::Photo(77),
        at(7, 15),
    )];

    let page = build_activity_page(&store, events, &viewer(None, QuerySource::Api, false))
        .await
        .expect("page build failed");
    assert_eq!(page.levels.len(), 1);
    assert_eq!(page.levels[0].id, 8);
    assert_eq!(page.groups[0].key, GroupKey::Level(8));
    assert_eq!(page.groups[0].children[0].key, GroupKey::User(actor_id));
}

#[tokio::test]
async fn score_events_group_under_the_owning_level() {
    let user = make_user("competitor");
    let actor_id = user.id;
    let level = make_level(4, actor_id);
    let score = make_score(4, actor_id, 1200);
    let score_id = score.id;
    let store = InMemoryStore::default()
        .with_user(user)
        .with_level(level)
        .with_score(score);

    let events = vec![make_event(
        EventKind::ScoreSubmit,
        actor_id,
        StoredData::Score(score_id),
        at(8, 18),
    )];

    let page = build_activity_page(&store, events, &viewer(None, QuerySource::Api, false))
        .await
        .expect("page build failed");
    assert_eq!(page.groups.len(), 1);
    assert_eq!(page.groups[0].key, GroupKey::Level(4));
    assert_eq!(page.groups[0].children[0].key, GroupKey::User(actor_id));
}

#[tokio::test]
async fn cross_user_events_nest_actors_under_the_target() {
    let target = make_user("popular");
    let first_fan = make_user("fan one");
    let second_fan = make_user("fan two");
    let target_id = target.id;
    let first_id = first_fan.id;
    let second_id = second_fan.id;
    let store = InMemoryStore::default()
        .with_user(target)
        .with_user(first_fan)
        .with_user(second_fan);

    let events = vec![
        make_event(EventKind::UserFavourite, first_id, StoredData::User(target_id), at(9, 10)),
        make_event(EventKind::UserFavourite, second_id, StoredData::User(target_id), at(9, 11)),
    ];

    let page = build_activity_page(&store, events, &viewer(None, QuerySource::Api, false))
        .await
        .expect("page build failed");
    assert_eq!(page.groups.len(), 1);
    let root = &page.groups[0];
    assert_eq!(root.key, GroupKey::User(target_id));
    assert_eq!(root.children.len(), 2);
    assert_eq!(root.children[0].key, GroupKey::User(first_id));
    assert_eq!(root.children[1].key, GroupKey::User(second_id));
}
