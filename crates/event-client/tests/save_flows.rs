use chrono::{NaiveDate, NaiveTime};
use event_client::{
    ApiError, EventApi, EventSaveOrchestrator, InMemoryEventApi, Notification, RecordingNotifier,
    SaveError, SaveMode, SaveOutcome, Severity,
};
use recurrence_engine::{EventId, EventInstance, Recurrence, RecurrenceError, RepeatRule, SeriesId};
use std::num::NonZeroU32;

type Orchestrator = EventSaveOrchestrator<InMemoryEventApi, RecordingNotifier>;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn meeting(title: &str, on: NaiveDate) -> EventInstance {
    let mut event = EventInstance::new(title, on, time(9, 0), time(10, 0));
    event.description = "team sync".to_string();
    event.location = "Room B".to_string();
    event.category = "work".to_string();
    event
}

fn stored(id: &str, title: &str, on: NaiveDate) -> EventInstance {
    let mut event = meeting(title, on);
    event.id = Some(EventId::from(id));
    event
}

fn orchestrator(events: Vec<EventInstance>) -> Orchestrator {
    let mut orchestrator = EventSaveOrchestrator::new(
        InMemoryEventApi::with_events(events),
        RecordingNotifier::new(),
    );
    orchestrator.fetch_events().unwrap();
    orchestrator
}

fn last(o: &Orchestrator) -> Notification {
    o.notifier().last().expect("a notification was sent")
}

#[test_log::test]
fn init_loads_events_and_notifies() {
    let mut o = EventSaveOrchestrator::new(
        InMemoryEventApi::with_events(vec![stored("1", "Existing", date(2025, 10, 15))]),
        RecordingNotifier::new(),
    );
    o.init().unwrap();
    assert_eq!(o.events().len(), 1);
    assert_eq!(last(&o), Notification::new(Severity::Info, "Events loaded"));
}

#[test_log::test]
fn init_failure_reports_load_error() {
    let api = InMemoryEventApi::new();
    api.set_unavailable(true);
    let mut o = EventSaveOrchestrator::new(api, RecordingNotifier::new());
    assert!(matches!(o.init(), Err(ApiError::Unavailable(_))));
    assert_eq!(
        o.notifier().notifications(),
        vec![
            Notification::new(Severity::Error, "Failed to load events"),
            Notification::new(Severity::Info, "Events loaded"),
        ]
    );
    assert!(o.events().is_empty());
}

#[test_log::test]
fn creates_single_event() {
    let mut o = orchestrator(vec![]);
    let outcome = o
        .save_event(meeting("New meeting", date(2025, 10, 16)), SaveMode::Create)
        .unwrap();

    let SaveOutcome::Created(created) = outcome else {
        panic!("expected a single create, got {outcome:?}");
    };
    assert_eq!(created.id, Some(EventId::from("1")));
    assert_eq!(o.events(), &[created]);
    assert_eq!(last(&o), Notification::new(Severity::Success, "Event added"));
}

#[test_log::test]
fn edits_existing_event_without_expanding() {
    let mut o = orchestrator(vec![
        stored("1", "Existing", date(2025, 10, 15)),
        stored("2", "Existing 2", date(2025, 10, 15)),
    ]);

    let mut edit = o.events()[0].clone();
    edit.title = "Renamed".to_string();
    edit.end_time = time(11, 0);
    edit.repeat = RepeatRule::Daily(Recurrence::every(1, date(2025, 10, 20)).unwrap());

    let outcome = o.save_event(edit, SaveMode::Edit).unwrap();
    assert!(matches!(outcome, SaveOutcome::Updated(_)));
    assert_eq!(o.events().len(), 2);
    assert_eq!(o.events()[0].title, "Renamed");
    assert_eq!(o.events()[0].end_time, time(11, 0));
    assert_eq!(last(&o), Notification::new(Severity::Success, "Event updated"));
}

#[test_log::test]
fn edit_without_id_is_rejected() {
    let mut o = orchestrator(vec![]);
    let err = o
        .save_event(meeting("Unsaved", date(2025, 10, 15)), SaveMode::Edit)
        .unwrap_err();
    assert_eq!(err, SaveError::MissingId);
    assert_eq!(last(&o), Notification::new(Severity::Error, "Failed to save event"));
}

#[test_log::test]
fn edit_of_unknown_event_fails() {
    let mut o = orchestrator(vec![]);
    let err = o
        .save_event(stored("9", "Ghost", date(2025, 10, 15)), SaveMode::Edit)
        .unwrap_err();
    assert_eq!(err, SaveError::Api(ApiError::NotFound(EventId::from("9"))));
}

#[test_log::test]
fn creates_repeating_series_in_one_batch() {
    let mut o = orchestrator(vec![]);
    let seed = meeting("Standup", date(2025, 1, 31))
        .with_repeat(RepeatRule::Monthly(Recurrence::every(1, date(2025, 5, 31)).unwrap()));

    let outcome = o.save_event(seed.clone(), SaveMode::Create).unwrap();
    let SaveOutcome::SeriesCreated(series) = outcome else {
        panic!("expected a series, got {outcome:?}");
    };

    let dates: Vec<_> = series.iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![date(2025, 1, 31), date(2025, 3, 31), date(2025, 5, 31)]);
    for instance in &series {
        assert_eq!(instance.series_id, Some(SeriesId::from("1")));
        assert_eq!(instance.title, seed.title);
        assert_eq!(instance.start_time, seed.start_time);
    }
    assert_eq!(o.events().len(), 3);
    assert_eq!(
        last(&o),
        Notification::new(Severity::Success, "Repeating events created")
    );
}

#[test_log::test]
fn unbounded_series_is_not_submitted() {
    let mut o = orchestrator(vec![]);
    let seed = meeting("Forever", date(2025, 7, 1))
        .with_repeat(RepeatRule::Daily(Recurrence::new(NonZeroU32::MIN, None)));

    let err = o.save_event(seed, SaveMode::Create).unwrap_err();
    assert_eq!(err, SaveError::Expansion(RecurrenceError::MissingEndDate));
    assert!(o.api().snapshot().is_empty());
    assert_eq!(
        o.notifier().notifications(),
        vec![Notification::new(Severity::Error, "Failed to save event")]
    );
}

#[test_log::test]
fn empty_series_is_not_submitted() {
    let mut o = orchestrator(vec![]);
    let seed = meeting("Backwards", date(2025, 7, 10))
        .with_repeat(RepeatRule::Weekly(Recurrence::every(1, date(2025, 7, 1)).unwrap()));

    assert_eq!(
        o.save_event(seed, SaveMode::Create).unwrap_err(),
        SaveError::EmptySeries
    );
    assert!(o.api().snapshot().is_empty());
}

#[test_log::test]
fn backend_failure_keeps_cached_state() {
    let mut o = orchestrator(vec![stored("1", "Existing", date(2025, 10, 15))]);
    let before = o.events().to_vec();
    o.api().set_unavailable(true);

    let seed = meeting("Weekly", date(2025, 10, 22))
        .with_repeat(RepeatRule::Weekly(Recurrence::every(1, date(2025, 12, 31)).unwrap()));
    let err = o.save_event(seed, SaveMode::Create).unwrap_err();

    assert!(matches!(err, SaveError::Api(ApiError::Unavailable(_))));
    assert_eq!(o.events(), before.as_slice());
    assert_eq!(last(&o), Notification::new(Severity::Error, "Failed to save event"));
    assert_eq!(o.notifier().notifications().len(), 1);
}

#[test_log::test]
fn deletes_event() {
    let mut o = orchestrator(vec![stored("1", "Delete me", date(2025, 10, 15))]);
    o.delete_event(&EventId::from("1")).unwrap();
    assert!(o.events().is_empty());
    assert_eq!(last(&o), Notification::new(Severity::Info, "Event deleted"));
}

#[test_log::test]
fn delete_of_unknown_event_reports_failure() {
    let mut o = orchestrator(vec![]);
    let err = o.delete_event(&EventId::from("3")).unwrap_err();
    assert_eq!(err, SaveError::Api(ApiError::NotFound(EventId::from("3"))));
    assert_eq!(last(&o), Notification::new(Severity::Error, "Failed to delete event"));
}

#[test_log::test]
fn updates_and_deletes_whole_series() {
    let mut o = orchestrator(vec![stored("1", "Standalone", date(2025, 10, 1))]);
    let seed = meeting("Standup", date(2025, 10, 16))
        .with_repeat(RepeatRule::Daily(Recurrence::every(1, date(2025, 10, 20)).unwrap()));
    o.save_event(seed, SaveMode::Create).unwrap();
    assert_eq!(o.events().len(), 6);

    let series = o.events()[1].series_id.clone().unwrap();
    let updated = o
        .update_series(&series, |e| e.location = "Online".to_string())
        .unwrap();
    assert_eq!(updated.len(), 5);
    assert!(o
        .events()
        .iter()
        .filter(|e| e.series_id.as_ref() == Some(&series))
        .all(|e| e.location == "Online"));
    assert_eq!(o.events()[0].location, "Room B");

    assert_eq!(o.delete_series(&series).unwrap(), 5);
    assert_eq!(o.events().len(), 1);
    assert_eq!(o.events()[0].title, "Standalone");
    assert_eq!(
        last(&o),
        Notification::new(Severity::Info, "Repeating events deleted")
    );
}

#[test_log::test]
fn unknown_series_is_rejected() {
    let mut o = orchestrator(vec![]);
    let series = SeriesId::from("77");
    assert_eq!(
        o.delete_series(&series).unwrap_err(),
        SaveError::UnknownSeries(series.clone())
    );
    assert_eq!(
        o.update_series(&series, |_| {}).unwrap_err(),
        SaveError::UnknownSeries(series)
    );
}

#[test]
fn event_api_is_object_safe() {
    let api: Box<dyn EventApi> = Box::new(InMemoryEventApi::new());
    assert!(api.fetch_all().unwrap().is_empty());
}
