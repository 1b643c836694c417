use chrono::{DateTime, TimeDelta, Utc};

use crate::foundation::core::GeoPoint;
use crate::foundation::error::{RoadsError, RoadsResult};
use crate::foundation::math::haversine_distance;

/// A single timestamped sample of an activity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackPoint {
    pub time: DateTime<Utc>,
    pub pos: GeoPoint,
}

impl TrackPoint {
    pub fn new(time: DateTime<Utc>, pos: GeoPoint) -> Self {
        Self { time, pos }
    }
}

/// One recorded track: an ordered, non-empty sequence of [`TrackPoint`]s.
///
/// Duration and distance are derived once at construction; the activity is read-only afterwards.
#[derive(Clone, Debug)]
pub struct Activity {
    sport: Option<String>,
    points: Vec<TrackPoint>,
    duration: TimeDelta,
    distance_m: f64,
}

impl Activity {
    /// Build an activity, checking that it has points and that timestamps never go backwards.
    pub fn new(sport: Option<String>, points: Vec<TrackPoint>) -> RoadsResult<Self> {
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return Err(RoadsError::empty_input("activity has no points"));
        };
        if let Some(w) = points.windows(2).find(|w| w[1].time < w[0].time) {
            return Err(RoadsError::validation(format!(
                "activity timestamps must be non-decreasing ({} follows {})",
                w[1].time, w[0].time
            )));
        }

        let duration = last.time - first.time;
        let distance_m = points
            .windows(2)
            .map(|w| haversine_distance(w[0].pos, w[1].pos))
            .sum();

        Ok(Self {
            sport,
            points,
            duration,
            distance_m,
        })
    }

    pub fn sport(&self) -> Option<&str> {
        self.sport.as_deref()
    }

    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.points[0].time
    }

    pub fn first(&self) -> &TrackPoint {
        &self.points[0]
    }

    pub fn last(&self) -> &TrackPoint {
        &self.points[self.points.len() - 1]
    }

    pub fn duration(&self) -> TimeDelta {
        self.duration
    }

    /// Path length in meters.
    pub fn distance_m(&self) -> f64 {
        self.distance_m
    }
}

#[cfg(test)]
#[path = "../../tests/unit/track/model.rs"]
mod tests;
