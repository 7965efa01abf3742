use super::*;
use planscope_config::FluentConfig;
use planscope_test::{numeric_plan, three_action_plan};

use crate::effects::{resolve_effects, PlanContext};
use crate::event::EventKind;
use crate::listener::CountingAnimationListener;

fn scheduled(plan: &Plan) -> (EventScheduler, FluentStore) {
    let resolved = resolve_effects(plan, &PlanContext::new(), &FluentConfig::default());
    let mut scheduler = EventScheduler::new();
    scheduler.schedule(plan, &resolved);
    (scheduler, resolved.store)
}

#[test]
fn test_schedule_fans_out_actions() {
    let (scheduler, _) = scheduled(&three_action_plan());
    let kinds: Vec<EventKind> = scheduler.events().iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::Move,
            EventKind::Numeric,
            EventKind::Pick,
            EventKind::Numeric,
            EventKind::Move,
            EventKind::Numeric,
        ]
    );
    assert!(scheduler.event("action-1:pick").is_some());
    assert_eq!(scheduler.completed_count(), 0);
}

#[test]
fn test_update_starts_then_completes() {
    let (mut scheduler, mut store) = scheduled(&three_action_plan());

    let report = scheduler.update(0.0, &mut store);
    assert_eq!(report, UpdateReport { started: 2, completed: 0 });
    assert_eq!(scheduler.active_events().count(), 2);
    assert_eq!(store.value("battery(r1)"), Some(100.0));

    scheduler.update(2.0, &mut store);
    assert_eq!(scheduler.event("action-0:move").unwrap().progress(), 0.5);

    let report = scheduler.update(4.0, &mut store);
    assert_eq!(report, UpdateReport { started: 2, completed: 2 });
    assert_eq!(store.value("battery(r1)"), Some(80.0));
    assert_eq!(
        scheduler.event("action-0:move").unwrap().status(),
        EventStatus::Completed
    );
}

#[test]
fn test_repeated_updates_apply_once() {
    let (mut scheduler, mut store) = scheduled(&numeric_plan());
    for _ in 0..5 {
        scheduler.update(1.0, &mut store);
    }
    assert_eq!(store.value("battery(r1)"), Some(80.0));
    for _ in 0..5 {
        scheduler.update(3.0, &mut store);
    }
    assert_eq!(store.value("battery(r1)"), Some(70.0));
    assert_eq!(scheduler.completed_count(), scheduler.len());
}

#[test]
fn test_large_seek_completes_directly() {
    let (mut scheduler, mut store) = scheduled(&numeric_plan());
    let report = scheduler.seek_to_time(3.0, &mut store);
    assert_eq!(report.completed, scheduler.len());
    assert_eq!(store.value("battery(r1)"), Some(70.0));
}

#[test]
fn test_seek_back_and_forth_never_reapplies() {
    let (mut scheduler, mut store) = scheduled(&numeric_plan());
    scheduler.update(3.0, &mut store);
    let done = store.snapshot();

    for time in [0.0, 2.5, 1.0, 3.0, 0.5, 3.0] {
        scheduler.seek_to_time(time, &mut store);
        assert_eq!(store.snapshot(), done);
    }
    assert_eq!(scheduler.completed_count(), scheduler.len());
}

#[test]
fn test_seek_resets_started_markers() {
    let (mut scheduler, mut store) = scheduled(&three_action_plan());
    scheduler.update(5.0, &mut store);
    assert_eq!(
        scheduler.event("action-1:pick").unwrap().status(),
        EventStatus::Started
    );

    scheduler.seek_to_time(3.0, &mut store);
    let pick = scheduler.event("action-1:pick").unwrap();
    assert_eq!(pick.status(), EventStatus::Pending);
    assert_eq!(pick.progress(), 0.0);
}

#[test]
fn test_clear_all_rewinds_events() {
    let (mut scheduler, mut store) = scheduled(&numeric_plan());
    scheduler.update(3.0, &mut store);
    scheduler.clear_all();
    store.reset();
    assert_eq!(scheduler.completed_count(), 0);

    scheduler.update(3.0, &mut store);
    assert_eq!(store.value("battery(r1)"), Some(70.0));
}

#[test]
fn test_listener_notifications() {
    let (mut scheduler, mut store) = scheduled(&three_action_plan());
    let listener = Arc::new(CountingAnimationListener::new());
    scheduler.add_listener(listener.clone());

    scheduler.update(1.0, &mut store);
    assert_eq!(listener.started_count(), 2);
    assert_eq!(listener.progress_count(), 2);

    scheduler.update(10.0, &mut store);
    scheduler.update(10.0, &mut store);
    assert_eq!(listener.started_count(), 6);
    assert_eq!(listener.completed_count(), 6);
}

#[test]
fn test_unknown_object_is_skipped_but_effects_apply() {
    let (mut scheduler, mut store) = scheduled(&three_action_plan());
    let listener = Arc::new(CountingAnimationListener::with_objects(["r2"]));
    scheduler.add_listener(listener.clone());

    scheduler.update(10.0, &mut store);
    assert_eq!(listener.started_count(), 0);
    assert_eq!(listener.completed_count(), 0);
    assert_eq!(scheduler.completed_count(), scheduler.len());
    assert_eq!(store.value("battery(r1)"), Some(55.0));
}

#[test]
fn test_seek_replays_completed_overlap_as_progress() {
    let (mut scheduler, mut store) = scheduled(&three_action_plan());
    scheduler.update(10.0, &mut store);

    let listener = Arc::new(CountingAnimationListener::new());
    scheduler.add_listener(listener.clone());
    scheduler.seek_to_time(5.0, &mut store);
    assert_eq!(listener.progress_count(), 2);
    assert_eq!(listener.started_count(), 0);
    assert_eq!(listener.completed_count(), 0);
}
