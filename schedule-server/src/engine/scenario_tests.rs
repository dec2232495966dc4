//! End-to-end scheduling scenarios and whole-run properties.

use super::*;
use crate::domain::{ClockTime, DelayMap, Headway, Priority, StationStop, Station, Train, TrainId};

fn problem(trains: Vec<Train>, delays: &[(&str, i64)], headway: i64) -> ScheduleProblem {
    let delays: DelayMap = delays
        .iter()
        .map(|(id, m)| (TrainId::parse(id).unwrap(), *m))
        .collect();
    ScheduleProblem::new(trains, delays, Headway::new(headway).unwrap()).unwrap()
}

fn final_time(result: &ScheduleResult, train: &str, station: &str) -> String {
    result.final_schedules[train]
        .iter()
        .find(|(s, _)| s == station)
        .map(|(_, t)| t.clone())
        .unwrap()
}

#[test]
fn higher_priority_keeps_its_slot() {
    let trains = vec![
        Train::parse("T1", 1, [("X", "10:00")]).unwrap(),
        Train::parse("T2", 2, [("X", "10:00")]).unwrap(),
    ];
    let result = schedule(&problem(trains, &[], 5));

    assert_eq!(final_time(&result, "T1", "X"), "10:00");
    assert_eq!(final_time(&result, "T2", "X"), "10:05");
}

#[test]
fn equal_priority_earlier_timetable_keeps_its_slot() {
    let trains = vec![
        Train::parse("T1", 1, [("X", "09:50")]).unwrap(),
        Train::parse("T2", 1, [("X", "09:55")]).unwrap(),
    ];
    let result = schedule(&problem(trains, &[("T1", 10), ("T2", 5)], 5));

    assert_eq!(result.base_schedules["T1"][0].1, "10:00");
    assert_eq!(result.base_schedules["T2"][0].1, "10:00");
    assert_eq!(final_time(&result, "T1", "X"), "10:00");
    assert_eq!(final_time(&result, "T2", "X"), "10:05");
}

#[test]
fn earlier_timetable_wins_even_when_listed_second() {
    let trains = vec![
        Train::parse("T2", 1, [("X", "09:55")]).unwrap(),
        Train::parse("T1", 1, [("X", "09:50")]).unwrap(),
    ];
    let result = schedule(&problem(trains, &[("T1", 10), ("T2", 5)], 5));

    assert_eq!(final_time(&result, "T1", "X"), "10:00");
    assert_eq!(final_time(&result, "T2", "X"), "10:05");
}

#[test]
fn single_train_is_unchanged() {
    let trains = vec![Train::parse("T1", 4, [("A", "08:00"), ("B", "08:45"), ("C", "09:30")]).unwrap()];
    let result = schedule(&problem(trains, &[("T1", 3)], 10));

    assert_eq!(result.final_schedules, result.base_schedules);
    assert_eq!(result.num_trains, 1);
    assert!((result.span_hours - 1.5).abs() < 1e-9);
    assert!((result.throughput - 1.0 / result.span_hours).abs() < 1e-9);
}

#[test]
fn empty_input() {
    let result = schedule(&problem(Vec::new(), &[], 10));
    assert!(result.base_schedules.is_empty());
    assert!(result.final_schedules.is_empty());
    assert_eq!(result.throughput, 0.0);
    assert_eq!(result.num_trains, 0);
    assert_eq!(result.span_hours, 0.0);
}

#[test]
fn loser_shift_carries_through_itinerary() {
    let trains = vec![
        Train::parse("Express", 1, [("A", "10:00"), ("B", "10:30")]).unwrap(),
        Train::parse("Local", 3, [("A", "10:02"), ("M", "10:15"), ("N", "10:40")]).unwrap(),
    ];
    let result = schedule(&problem(trains, &[], 10));

    assert_eq!(
        result.final_schedules["Local"],
        vec![
            ("A".to_string(), "10:10".to_string()),
            ("M".to_string(), "10:23".to_string()),
            ("N".to_string(), "10:48".to_string()),
        ]
    );
    assert_eq!(result.final_schedules["Express"], result.base_schedules["Express"]);
}

#[test]
fn delay_past_midnight_formats_wrapped() {
    let trains = vec![Train::parse("Night", 1, [("A", "23:40"), ("B", "23:55")]).unwrap()];
    let result = schedule(&problem(trains, &[("Night", 30)], 10));

    assert_eq!(
        result.final_schedules["Night"],
        vec![
            ("A".to_string(), "00:10".to_string()),
            ("B".to_string(), "00:25".to_string()),
        ]
    );
    // Span is still measured across midnight
    assert!((result.span_hours - 0.25).abs() < 1e-9);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    const STATIONS: [&str; 4] = ["A", "B", "C", "D"];

    /// Trains with non-decreasing itineraries over a shared pool of stations.
    fn trains() -> impl Strategy<Value = Vec<Train>> {
        prop::collection::vec(
            (
                0i64..3,
                480i64..600,
                prop::collection::vec((0usize..STATIONS.len(), 0i64..30), 1..5),
            ),
            0..6,
        )
        .prop_map(|raw| {
            raw.into_iter()
                .enumerate()
                .map(|(i, (priority, start, stops))| {
                    let mut minutes = start;
                    let schedule = stops
                        .into_iter()
                        .map(|(station, gap)| {
                            minutes += gap;
                            StationStop::new(
                                Station::parse(STATIONS[station]).unwrap(),
                                ClockTime::from_minutes(minutes),
                            )
                        })
                        .collect();
                    Train::new(
                        TrainId::parse(&format!("T{i}")).unwrap(),
                        Priority(priority),
                        schedule,
                    )
                    .unwrap()
                })
                .collect()
        })
    }

    fn delays(n: usize) -> impl Strategy<Value = DelayMap> {
        prop::collection::vec(-10i64..40, n).prop_map(|ds| {
            ds.into_iter()
                .enumerate()
                .map(|(i, d)| (TrainId::parse(&format!("T{i}")).unwrap(), d))
                .collect()
        })
    }

    fn problems() -> impl Strategy<Value = ScheduleProblem> {
        (trains(), 0i64..15).prop_flat_map(|(trains, headway)| {
            let n = trains.len();
            delays(n).prop_map(move |delays| {
                ScheduleProblem::new(trains.clone(), delays, Headway::new(headway).unwrap())
                    .unwrap()
            })
        })
    }

    proptest! {
        /// No final stop is earlier than its base stop
        #[test]
        fn final_never_before_base(problem in problems()) {
            let outcome = Scheduler::new().run(&problem);
            for (fin, base) in outcome.final_schedules.iter().zip(&outcome.base) {
                prop_assert_eq!(fin.stops().len(), base.stops().len());
                for (f, b) in fin.stops().iter().zip(base.stops()) {
                    prop_assert_eq!(&f.station, &b.station);
                    prop_assert!(f.time >= b.time);
                }
            }
        }

        /// Itineraries stay in time order
        #[test]
        fn itineraries_stay_ordered(problem in problems()) {
            let outcome = Scheduler::new().run(&problem);
            for fin in &outcome.final_schedules {
                for pair in fin.stops().windows(2) {
                    prop_assert!(pair[0].time <= pair[1].time);
                }
            }
        }

        /// Throughput is trains over span, with the span floored at a minute
        #[test]
        fn throughput_formula(problem in problems()) {
            let outcome = Scheduler::new().run(&problem);
            let result = ScheduleResult::from(&outcome);
            prop_assert_eq!(result.num_trains, result.final_schedules.len());

            if outcome.final_schedules.is_empty() {
                prop_assert_eq!(result.throughput, 0.0);
            } else {
                let earliest = outcome.final_schedules.iter().filter_map(Itinerary::departure).min().unwrap();
                let latest = outcome.final_schedules.iter().filter_map(Itinerary::arrival).max().unwrap();
                let minutes = crate::domain::minutes_between(earliest, latest).max(1) as f64;
                let expected = result.num_trains as f64 / minutes * 60.0;
                prop_assert!((result.throughput - expected).abs() < 1e-9);
            }
        }

        /// Trains that never come within a headway of each other are left alone
        #[test]
        fn separated_trains_unchanged(
            offsets in prop::collection::vec(prop::collection::vec(0i64..100, 1..4), 1..5),
            headway in 0i64..20,
        ) {
            // Train i runs entirely inside [i * 200, i * 200 + 100)
            let trains: Vec<Train> = offsets
                .into_iter()
                .enumerate()
                .map(|(i, mut offs)| {
                    offs.sort();
                    let schedule = offs
                        .into_iter()
                        .enumerate()
                        .map(|(j, off)| {
                            StationStop::new(
                                Station::parse(STATIONS[j % STATIONS.len()]).unwrap(),
                                ClockTime::from_minutes(i as i64 * 200 + off),
                            )
                        })
                        .collect();
                    Train::new(TrainId::parse(&format!("T{i}")).unwrap(), Priority(i as i64 % 2), schedule)
                        .unwrap()
                })
                .collect();
            let problem = ScheduleProblem::new(trains, DelayMap::new(), Headway::new(headway).unwrap())
                .unwrap();

            let result = schedule(&problem);
            prop_assert_eq!(result.final_schedules, result.base_schedules);
        }
    }
}
