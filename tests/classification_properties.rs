//! Property tests for distances, circuity, classification and day patterns

use proptest::prelude::*;

use hubconn::core::circuity::CircuityCalculator;
use hubconn::{
    haversine_distance, AirportCoordinate, AirportTable, CandidateConnection, ConnectionSettings,
    DayOfWeek, DayPattern, FlightLeg, Movement, Pipeline, ScheduleRow, Thresholds,
};

fn dummy_leg(movement: Movement) -> FlightLeg {
    FlightLeg {
        airline: "XY".to_string(),
        flight_number: "1".to_string(),
        origin: "A".to_string(),
        destination: "B".to_string(),
        times: Default::default(),
        equipment: "320".to_string(),
        seats: 100,
        day: DayOfWeek::new(1).unwrap(),
        movement,
        utc_departure: 1.0,
        utc_arrival: 1.1,
    }
}

fn schedule_row(origin: &str, destination: &str, std: &str, days: &str) -> ScheduleRow {
    ScheduleRow {
        airline: "XY".to_string(),
        flight_number: format!("{origin}{destination}"),
        origin: origin.to_string(),
        destination: destination.to_string(),
        std_utc: std.to_string(),
        sta_utc: "00:00".to_string(),
        std_local: std.to_string(),
        sta_local: "00:00".to_string(),
        block_hours: "02:00".to_string(),
        days: days.to_string(),
        equipment: "320".to_string(),
        seats: 180,
    }
}

fn pattern_from_bits(bits: u8) -> DayPattern {
    (1..=7u8)
        .filter(|d| bits & (1 << (d - 1)) != 0)
        .map(|d| DayOfWeek::new(d).unwrap())
        .collect()
}

proptest! {
    #[test]
    fn prop_haversine_symmetric(
        lat1 in -90.0..90.0f64, lon1 in -180.0..180.0f64,
        lat2 in -90.0..90.0f64, lon2 in -180.0..180.0f64,
    ) {
        let ab = haversine_distance(lat1, lon1, lat2, lon2);
        let ba = haversine_distance(lat2, lon2, lat1, lon1);
        prop_assert!((ab - ba).abs() < 1e-6);
        prop_assert!(ab >= 0.0);
        prop_assert!(haversine_distance(lat1, lon1, lat1, lon1).abs() < 1e-9);
    }

    #[test]
    fn prop_detour_never_shorter_than_direct(
        o in (-80.0..80.0f64, -179.0..179.0f64),
        d in (-80.0..80.0f64, -179.0..179.0f64),
        h in (-80.0..80.0f64, -179.0..179.0f64),
    ) {
        prop_assume!(haversine_distance(o.0, o.1, d.0, d.1) > 1.0);
        let table: AirportTable = [
            AirportCoordinate::new("O", o.0, o.1),
            AirportCoordinate::new("D", d.0, d.1),
            AirportCoordinate::new("H", h.0, h.1),
        ]
        .into_iter()
        .collect();
        let calc = CircuityCalculator::new(&table);

        prop_assert!(calc.circuity_ratio("O", "D", "H").unwrap() >= 1.0 - 1e-9);
        prop_assert!(calc.absolute_circuity("O", "D", "H").unwrap() >= -1e-6);
    }

    #[test]
    fn prop_missed_disjoint_from_feasible(
        ct in -0.2..0.3f64,
        ratio in 1.0..3.0f64,
        abs_km in 0.0..3000.0f64,
    ) {
        let inbound = dummy_leg(Movement::Arrival);
        let outbound = dummy_leg(Movement::Departure);
        let candidate = CandidateConnection {
            inbound: &inbound,
            outbound: &outbound,
            connection_time: ct,
            circuity_ratio: ratio,
            absolute_circuity: abs_km,
        };
        let thresholds: Thresholds = ConnectionSettings::default().to_config().unwrap().thresholds;

        if thresholds.is_missed(&candidate) {
            prop_assert!(!thresholds.is_logical(&candidate));
            prop_assert!(!thresholds.is_illogical_feasible(&candidate));
        }
        // Every feasible connection is Logical, Illogical-Feasible or both
        if ct >= thresholds.min_connect_time() && ct <= thresholds.max_connect_time() {
            prop_assert!(
                thresholds.is_logical(&candidate) || thresholds.is_illogical_feasible(&candidate)
            );
        }
    }

    #[test]
    fn prop_pattern_text_round_trip(bits in 0u8..128) {
        let pattern = pattern_from_bits(bits);
        let text = pattern.to_string();
        prop_assert_eq!(text.len(), 7);
        prop_assert_eq!(DayPattern::parse(&text).unwrap(), pattern);
    }

    #[test]
    fn prop_pipeline_reproduces_operating_days(bits in 1u8..128) {
        let pattern = pattern_from_bits(bits);
        let table: AirportTable = [
            AirportCoordinate::new("NUM", 0.0, 0.0),
            AirportCoordinate::new("AAA", 0.0, 10.0),
            AirportCoordinate::new("BBB", 0.0, -10.0),
        ]
        .into_iter()
        .collect();
        let rows = vec![
            schedule_row("AAA", "NUM", "08:00", &pattern.to_string()),
            schedule_row("NUM", "BBB", "11:12", &pattern.to_string()),
        ];
        let config = ConnectionSettings::default().to_config().unwrap();

        let report = Pipeline::new(&table, config).run_schedule(&rows).unwrap();

        prop_assert_eq!(report.logical.len(), 1);
        prop_assert_eq!(report.logical[0].inbound_days, pattern);
        prop_assert_eq!(report.logical[0].outbound_days, pattern);
        prop_assert!(!report.logical[0].inbound_days.to_string().contains('8'));
    }
}
