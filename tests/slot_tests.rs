use timetable::{ClockTime, SlotGrid, TimetableConfig, generate_slots};

fn t(s: &str) -> ClockTime {
    s.parse().unwrap()
}

fn labels(slots: &[ClockTime]) -> Vec<String> {
    slots.iter().map(|s| s.to_string()).collect()
}

#[test]
fn generates_inclusive_boundaries() {
    let slots = generate_slots(t("09:00"), t("11:00"), 30);
    assert_eq!(labels(&slots), vec!["09:00", "09:30", "10:00", "10:30", "11:00"]);
}

#[test]
fn misaligned_end_stops_at_last_boundary_before_end() {
    let slots = generate_slots(t("09:00"), t("10:45"), 30);
    assert_eq!(labels(&slots), vec!["09:00", "09:30", "10:00", "10:30"]);
    for pair in slots.windows(2) {
        assert_eq!(pair[0].minutes_until(pair[1]), 30);
    }
}

#[test]
fn zero_step_yields_no_boundaries() {
    assert!(generate_slots(t("09:00"), t("10:00"), 0).is_empty());
}

#[test]
fn boundaries_near_midnight_do_not_wrap() {
    let slots = generate_slots(t("22:00"), t("23:59"), 60);
    assert_eq!(labels(&slots), vec!["22:00", "23:00"]);
}

#[test]
fn default_grid_matches_hourly_day() {
    let grid = SlotGrid::from_config(&TimetableConfig::default());
    assert_eq!(grid.row_count(), 14);
    assert_eq!(grid.start(), Some(t("08:00")));
    assert_eq!(grid.end(), Some(t("22:00")));
    let first = grid.rows().next().unwrap();
    assert_eq!(first.label(), "08:00-09:00");
}

#[test]
fn every_minute_inside_grid_has_exactly_one_slot() {
    let grid = SlotGrid::new(t("09:00"), t("16:00"), 30);
    let rows: Vec<_> = grid.rows().collect();
    for minute in t("09:00").minutes()..t("16:00").minutes() {
        let time = ClockTime::from_minutes(minute).unwrap();
        let containing = rows.iter().filter(|row| row.contains(time)).count();
        assert_eq!(containing, 1, "time {time} is in {containing} slots");
        assert!(grid.slot_index(time).is_some());
    }
}

#[test]
fn slot_lookup_is_left_inclusive() {
    let grid = SlotGrid::new(t("09:00"), t("16:00"), 30);
    assert_eq!(grid.slot_index(t("09:00")), Some(0));
    assert_eq!(grid.slot_index(t("09:29")), Some(0));
    assert_eq!(grid.slot_index(t("09:30")), Some(1));
    assert_eq!(grid.slot_index(t("08:59")), None);
    assert_eq!(grid.slot_index(t("16:00")), None);
}

#[test]
fn row_accessor_matches_iterator() {
    let grid = SlotGrid::new(t("13:00"), t("14:00"), 30);
    let second = grid.row(1).unwrap();
    assert_eq!(second.start, t("13:30"));
    assert_eq!(second.end, t("14:00"));
    assert!(grid.row(2).is_none());
}
