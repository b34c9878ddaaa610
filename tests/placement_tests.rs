use timetable::placement::{self, column_for_day, span_for};
use timetable::{ClockTime, Event, SlotGrid};

fn t(s: &str) -> ClockTime {
    s.parse().unwrap()
}

fn event(day: u8, start: &str, end: &str) -> Event {
    Event::new("Lecture", day, t(start), t(end))
}

fn grid() -> SlotGrid {
    SlotGrid::new(t("09:00"), t("16:00"), 30)
}

#[test]
fn event_at_grid_start_lands_in_first_row() {
    let placement = placement::resolve(&event(1, "09:00", "11:00"), &grid(), 7).unwrap();
    assert_eq!(placement.row, 2);
    assert_eq!(placement.span, 4);
    assert_eq!(placement.column, 2);
    assert_eq!(placement.rows(), 2..6);
    assert_eq!(placement.slot_index(), 0);
}

#[test]
fn start_between_boundaries_uses_containing_slot() {
    let grid = SlotGrid::new(t("13:00"), t("14:00"), 30);
    let placement = placement::resolve(&event(3, "13:15", "13:45"), &grid, 7).unwrap();
    assert_eq!(placement.row, 2);
    assert_eq!(placement.span, 1);
    assert_eq!(placement.column, 4);
}

#[test]
fn span_rounds_partial_slots_up() {
    assert_eq!(span_for(t("09:00"), t("09:10"), 30), 1);
    assert_eq!(span_for(t("09:00"), t("09:30"), 30), 1);
    assert_eq!(span_for(t("09:00"), t("09:31"), 30), 2);
    assert_eq!(span_for(t("09:00"), t("10:50"), 60), 2);
}

#[test]
fn span_is_at_least_one_even_for_degenerate_ranges() {
    assert_eq!(span_for(t("10:00"), t("10:00"), 30), 1);
    assert_eq!(span_for(t("10:00"), t("09:00"), 30), 1);
}

#[test]
fn span_is_positive_for_every_valid_range() {
    let grid = grid();
    for start in (t("09:00").minutes()..t("16:00").minutes()).step_by(7) {
        for end in (start + 1..=t("16:00").minutes()).step_by(11) {
            let (start, end) = (
                ClockTime::from_minutes(start).unwrap(),
                ClockTime::from_minutes(end).unwrap(),
            );
            let lecture = event(1, &start.to_string(), &end.to_string());
            let placement = placement::resolve(&lecture, &grid, 7).unwrap();
            let expected = (start.minutes_until(end) as usize).div_ceil(30);
            assert_eq!(placement.span, expected);
            assert!(placement.span >= 1);
        }
    }
}

#[test]
fn events_outside_the_grid_are_skipped() {
    let grid = grid();
    assert!(placement::resolve(&event(1, "08:00", "09:30"), &grid, 7).is_none());
    assert!(placement::resolve(&event(1, "16:00", "17:00"), &grid, 7).is_none());
}

#[test]
fn days_beyond_the_configured_week_are_skipped() {
    let grid = grid();
    assert!(placement::resolve(&event(6, "10:00", "11:00"), &grid, 5).is_none());
    assert!(placement::resolve(&event(0, "10:00", "11:00"), &grid, 7).is_none());
    assert_eq!(column_for_day(7), 8);
}

#[test]
fn overlapping_events_are_placed_independently() {
    let events = vec![
        event(2, "10:00", "11:00"),
        event(2, "10:30", "12:00"),
        event(2, "07:00", "08:00"),
    ];
    let placements = placement::resolve_all(&events, &grid(), 7);
    assert_eq!(placements.len(), 2);
    assert_eq!(placements[0].row, 4);
    assert_eq!(placements[1].row, 5);
    assert_eq!(placements[1].span, 3);
}
