use super::*;

const ONE: &str = r#"
{
  "sport": "running",
  "points": [
    { "time": "2021-06-01T07:00:00Z", "lat": 51.50, "lon": -0.12 },
    { "time": "2021-06-01T07:10:00Z", "lat": 51.51, "lon": -0.11 }
  ]
}
"#;

const MANY: &str = r#"
[
  { "points": [ { "time": "2021-06-02T07:00:00Z", "lat": 1.0, "lon": 2.0 } ] },
  { "sport": "cycling", "points": [ { "time": "2021-06-03T07:00:00+02:00", "lat": 3.0, "lon": 4.0 } ] }
]
"#;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_input").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn parses_single_activity_document() {
    let acts = parse_track_json(ONE).unwrap();
    assert_eq!(acts.len(), 1);
    assert_eq!(acts[0].sport(), Some("running"));
    assert_eq!(acts[0].points().len(), 2);
    assert_eq!(acts[0].duration(), chrono::TimeDelta::minutes(10));
}

#[test]
fn parses_activity_arrays() {
    let acts = parse_track_json(MANY).unwrap();
    assert_eq!(acts.len(), 2);
    assert_eq!(acts[0].sport(), None);
    assert_eq!(acts[1].sport(), Some("cycling"));
    assert_eq!(acts[1].start().to_rfc3339(), "2021-06-03T05:00:00+00:00");
}

#[test]
fn rejects_bad_documents() {
    assert!(matches!(
        parse_track_json("{"),
        Err(RoadsError::Validation(_))
    ));
    assert!(matches!(
        parse_track_json(r#"{"points": []}"#),
        Err(RoadsError::EmptyInput(_))
    ));
    assert!(parse_track_json(
        r#"{"points": [{"time": "2021-06-01T07:00:00Z", "lat": 123.0, "lon": 0.0}]}"#
    )
    .is_err());
}

#[test]
fn loads_directories_recursively_and_warns_on_bad_files() {
    let dir = scratch_dir("recursive");
    std::fs::create_dir_all(dir.join("nested")).unwrap();
    std::fs::write(dir.join("a.json"), ONE).unwrap();
    std::fs::write(dir.join("nested").join("b.JSON"), MANY).unwrap();
    std::fs::write(dir.join("broken.json"), "not json").unwrap();
    std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

    let report = load_activities(&[dir]).unwrap();
    assert_eq!(report.files, 3);
    assert_eq!(report.activities.len(), 3);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("broken.json"));
}

#[test]
fn missing_input_is_an_error() {
    let err = load_activities(&[PathBuf::from("target/definitely/not/here")]).unwrap_err();
    assert!(err.to_string().contains("not found"));
}
