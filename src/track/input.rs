use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::foundation::core::GeoPoint;
use crate::foundation::error::{RoadsError, RoadsResult};
use crate::track::model::{Activity, TrackPoint};

#[derive(Deserialize)]
#[serde(untagged)]
enum TrackFile {
    One(TrackDoc),
    Many(Vec<TrackDoc>),
}

#[derive(Deserialize)]
struct TrackDoc {
    #[serde(default)]
    sport: Option<String>,
    points: Vec<PointDoc>,
}

#[derive(Deserialize)]
struct PointDoc {
    time: DateTime<Utc>,
    lat: f64,
    lon: f64,
}

/// Outcome of scanning the input paths.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Activities in scan order.
    pub activities: Vec<Activity>,
    /// Number of track files found.
    pub files: usize,
    /// One entry per file that could not be read or parsed.
    pub warnings: Vec<String>,
}

/// Parse one track document (a single activity object or an array of them).
pub fn parse_track_json(json: &str) -> RoadsResult<Vec<Activity>> {
    let file: TrackFile = serde_json::from_str(json)
        .map_err(|e| RoadsError::validation(format!("malformed track JSON: {e}")))?;
    let docs = match file {
        TrackFile::One(doc) => vec![doc],
        TrackFile::Many(docs) => docs,
    };

    docs.into_iter()
        .map(|doc| {
            let points = doc
                .points
                .into_iter()
                .map(|p| Ok(TrackPoint::new(p.time, GeoPoint::new(p.lat, p.lon)?)))
                .collect::<RoadsResult<Vec<_>>>()?;
            Activity::new(doc.sport, points)
        })
        .collect()
}

/// Scan files and directories (recursively) for `.json` track files and parse them.
///
/// A missing input path is an error; unreadable or malformed files are reported as warnings.
#[tracing::instrument(skip(inputs), fields(inputs = inputs.len()))]
pub fn load_activities(inputs: &[PathBuf]) -> RoadsResult<LoadReport> {
    let mut files = Vec::new();
    for input in inputs {
        if !input.exists() {
            return Err(RoadsError::validation(format!(
                "input path \"{}\" not found",
                input.display()
            )));
        }
        collect_track_files(input, &mut files)?;
    }
    tracing::info!(files = files.len(), "scanned activity files");

    let mut report = LoadReport {
        files: files.len(),
        ..LoadReport::default()
    };
    for path in files {
        let parsed = std::fs::read_to_string(&path)
            .map_err(RoadsError::from)
            .and_then(|json| parse_track_json(&json));
        match parsed {
            Ok(mut acts) => report.activities.append(&mut acts),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping track file");
                report.warnings.push(format!("{}: {e}", path.display()));
            }
        }
    }
    Ok(report)
}

fn collect_track_files(path: &Path, out: &mut Vec<PathBuf>) -> RoadsResult<()> {
    if path.is_dir() {
        let mut entries = std::fs::read_dir(path)?
            .map(|e| e.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()?;
        entries.sort();
        for entry in entries {
            collect_track_files(&entry, out)?;
        }
    } else if is_track_file(path) {
        out.push(path.to_path_buf());
    }
    Ok(())
}

fn is_track_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
#[path = "../../tests/unit/track/input.rs"]
mod tests;
