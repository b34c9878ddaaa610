use timetable::{
    ClockTime, Event, EventDraft, InputError, MemoryStore, SubmitError, Timetable,
    TimetableConfig,
};

fn t(s: &str) -> ClockTime {
    s.parse().unwrap()
}

fn new_timetable() -> Timetable<MemoryStore> {
    let config = TimetableConfig::new(t("09:00"), t("16:00"), 30);
    Timetable::new(config, MemoryStore::new()).unwrap()
}

fn input_error(result: Result<Event, SubmitError>) -> InputError {
    match result {
        Err(SubmitError::Input(err)) => err,
        Err(other) => panic!("unexpected error: {other}"),
        Ok(event) => panic!("expected rejection, got {event:?}"),
    }
}

#[test]
fn submit_persists_trimmed_event() {
    let timetable = new_timetable();
    let draft = EventDraft::new("  Calculus ", "1", "09:00", "11:00")
        .with_location(" Room 101 ")
        .with_note("");
    let event = timetable.submit(&draft).unwrap();

    assert_eq!(event.title, "Calculus");
    assert_eq!(event.location.as_deref(), Some("Room 101"));
    assert_eq!(event.note, None);
    assert!(!event.id.is_empty());
    assert_eq!(timetable.events().unwrap(), vec![event]);
}

#[test]
fn submit_rejects_end_not_after_start() {
    let timetable = new_timetable();
    let err = input_error(timetable.submit(&EventDraft::new("Late", "2", "11:00", "11:00")));
    assert!(matches!(err, InputError::EndNotAfterStart { .. }));
    let err = input_error(timetable.submit(&EventDraft::new("Late", "2", "11:00", "10:00")));
    assert!(matches!(err, InputError::EndNotAfterStart { .. }));
    assert!(timetable.events().unwrap().is_empty());
}

#[test]
fn submit_rejects_blank_title_bad_day_and_bad_time() {
    let timetable = new_timetable();
    assert_eq!(
        input_error(timetable.submit(&EventDraft::new("   ", "1", "09:00", "10:00"))),
        InputError::EmptyTitle
    );
    assert!(matches!(
        input_error(timetable.submit(&EventDraft::new("X", "8", "09:00", "10:00"))),
        InputError::InvalidDay { .. }
    ));
    assert!(matches!(
        input_error(timetable.submit(&EventDraft::new("X", "monday", "09:00", "10:00"))),
        InputError::InvalidDay { .. }
    ));
    assert!(matches!(
        input_error(timetable.submit(&EventDraft::new("X", "1", "9am", "10:00"))),
        InputError::InvalidTime { field: "start", .. }
    ));
    assert!(timetable.events().unwrap().is_empty());
}

#[test]
fn submit_rejects_events_outside_grid_bounds() {
    let timetable = new_timetable();
    for (start, end) in [("08:00", "09:30"), ("15:30", "16:30"), ("16:00", "17:00")] {
        let err = input_error(timetable.submit(&EventDraft::new("Off grid", "1", start, end)));
        assert!(
            matches!(err, InputError::OutsideGrid { .. }),
            "{start}-{end} gave {err:?}"
        );
    }
    assert!(timetable.submit(&EventDraft::new("Edge", "1", "15:30", "16:00")).is_ok());
}

#[test]
fn misaligned_grid_bounds_use_last_boundary() {
    let config = TimetableConfig::new(t("09:00"), t("10:45"), 30);
    let timetable = Timetable::new(config, MemoryStore::new()).unwrap();
    assert_eq!(timetable.grid().end(), Some(t("10:30")));
    let err = input_error(timetable.submit(&EventDraft::new("Tail", "1", "10:30", "10:45")));
    assert!(matches!(err, InputError::OutsideGrid { .. }));
}

#[test]
fn delete_and_clear_all_update_the_collection() {
    let timetable = new_timetable();
    let first = timetable
        .submit(&EventDraft::new("One", "1", "09:00", "10:00"))
        .unwrap();
    let second = timetable
        .submit(&EventDraft::new("Two", "2", "10:00", "11:00"))
        .unwrap();

    assert!(timetable.delete_event(&first.id).unwrap());
    assert_eq!(timetable.events().unwrap(), vec![second.clone()]);
    assert_eq!(timetable.find_event(&second.id).unwrap(), Some(second));

    timetable.clear_all().unwrap();
    assert!(timetable.events().unwrap().is_empty());
}

#[test]
fn view_places_submitted_events() {
    let timetable = new_timetable();
    timetable
        .submit(&EventDraft::new("Morning", "1", "09:00", "11:00"))
        .unwrap();
    let view = timetable.view().unwrap();
    let placements: Vec<_> = view.placements().cloned().collect();
    assert_eq!(placements.len(), 1);
    assert_eq!(placements[0].row, 2);
    assert_eq!(placements[0].span, 4);
    assert_eq!(placements[0].column, 2);
}

#[test]
fn rendering_twice_does_not_duplicate_blocks() {
    let timetable = new_timetable();
    timetable
        .submit(&EventDraft::new("A", "1", "09:00", "10:00"))
        .unwrap();
    timetable
        .submit(&EventDraft::new("B", "4", "13:15", "13:45"))
        .unwrap();

    let mut view = timetable.empty_view();
    timetable.refresh_view(&mut view).unwrap();
    let first = view.clone();
    timetable.refresh_view(&mut view).unwrap();

    assert_eq!(view, first);
    assert_eq!(view.blocks().len(), 2);
    assert_eq!(view.render_text(), first.render_text());
}

#[test]
fn legacy_events_outside_grid_are_not_rendered() {
    let timetable = new_timetable();
    timetable
        .repository()
        .add_event(Event::new("Early", 1, t("07:00"), t("08:00")))
        .unwrap();
    timetable
        .repository()
        .add_event(Event::new("Inside", 1, t("10:00"), t("11:00")))
        .unwrap();
    assert_eq!(timetable.events().unwrap().len(), 2);
    assert_eq!(timetable.placements().unwrap().len(), 1);
}

#[test]
fn render_text_shows_titles_and_continuations() {
    let timetable = new_timetable();
    timetable
        .submit(&EventDraft::new("Seminar", "2", "09:00", "10:00"))
        .unwrap();
    let text = timetable.view().unwrap().render_text();
    let lines: Vec<&str> = text.lines().collect();

    assert!(lines[1].contains("Time"));
    assert!(lines[1].contains("Mon"));
    assert!(lines[1].contains("Sun"));
    let first_slot = lines.iter().find(|l| l.contains("09:00-09:30")).unwrap();
    assert!(first_slot.contains("Seminar"));
    let second_slot = lines.iter().find(|l| l.contains("09:30-10:00")).unwrap();
    assert!(second_slot.contains(" | | "));
    let third_slot = lines.iter().find(|l| l.contains("10:00-10:30")).unwrap();
    assert!(!third_slot.contains("Seminar"));
}

#[test]
fn render_text_shows_time_range_location_and_note() {
    let timetable = new_timetable();
    timetable
        .submit(
            &EventDraft::new("Physics", "3", "09:00", "10:00")
                .with_location("Room 101")
                .with_note("quiz"),
        )
        .unwrap();
    let text = timetable.view().unwrap().render_text();
    let lines: Vec<&str> = text.lines().collect();

    let start = lines.iter().position(|l| l.contains("09:00-09:30")).unwrap();
    assert!(lines[start].contains("Physics"));
    assert!(lines[start + 1].contains("09:00-10:00"));
    assert!(lines[start + 2].contains("@ Room 101"));
    assert!(lines[start + 3].contains("quiz"));
    assert!(lines[start + 4].contains("09:30-10:00"));
}

#[test]
fn render_text_omits_absent_location_and_note() {
    let timetable = new_timetable();
    timetable
        .submit(&EventDraft::new("Lab", "1", "10:00", "10:30"))
        .unwrap();
    let text = timetable.view().unwrap().render_text();
    let start = text.lines().position(|l| l.contains("Lab")).unwrap();
    let next = text.lines().nth(start + 1).unwrap();
    assert!(next.contains("10:00-10:30"));
    assert!(text.lines().nth(start + 2).unwrap().contains("10:30-11:00"));
    assert!(!text.contains('@'));
}

#[test]
fn invalid_config_is_rejected() {
    let config = TimetableConfig::new(t("10:00"), t("09:00"), 30);
    assert!(Timetable::new(config, MemoryStore::new()).is_err());
    let config = TimetableConfig::new(t("09:00"), t("10:00"), 0);
    assert!(Timetable::new(config, MemoryStore::new()).is_err());
    let config = TimetableConfig::default().with_days(0);
    assert!(Timetable::new(config, MemoryStore::new()).is_err());
    let config = TimetableConfig::new(t("09:00"), t("09:20"), 30);
    assert!(Timetable::new(config, MemoryStore::new()).is_err());
}
