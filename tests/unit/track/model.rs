use super::*;

fn at(secs: i64, lat: f64, lon: f64) -> TrackPoint {
    TrackPoint::new(
        DateTime::from_timestamp(1_600_000_000 + secs, 0).unwrap(),
        GeoPoint::new(lat, lon).unwrap(),
    )
}

#[test]
fn derives_duration_and_distance() {
    let act = Activity::new(
        Some("running".to_owned()),
        vec![at(0, 0.0, 0.0), at(60, 0.0, 0.01), at(600, 0.01, 0.01)],
    )
    .unwrap();
    assert_eq!(act.duration(), TimeDelta::seconds(600));
    assert_eq!(act.sport(), Some("running"));
    assert_eq!(act.first().pos, GeoPoint::new(0.0, 0.0).unwrap());
    assert_eq!(act.last().pos, GeoPoint::new(0.01, 0.01).unwrap());
    // Two legs of ~1.11 km each.
    assert!((act.distance_m() - 2_223.9).abs() < 2.0, "{}", act.distance_m());
}

#[test]
fn rejects_empty_activity() {
    let err = Activity::new(None, vec![]).unwrap_err();
    assert!(matches!(err, RoadsError::EmptyInput(_)));
}

#[test]
fn rejects_time_travel() {
    let err = Activity::new(None, vec![at(10, 0.0, 0.0), at(5, 0.0, 0.1)]).unwrap_err();
    assert!(matches!(err, RoadsError::Validation(_)));
}

#[test]
fn single_point_activity_has_zero_duration() {
    let act = Activity::new(None, vec![at(0, 1.0, 1.0)]).unwrap();
    assert_eq!(act.duration(), TimeDelta::zero());
    assert_eq!(act.distance_m(), 0.0);
}
