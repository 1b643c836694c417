use chrono::{DateTime, TimeDelta, Utc};

use crate::foundation::core::GeoPoint;
use crate::foundation::error::{RoadsError, RoadsResult};
use crate::foundation::math::haversine_distance;
use crate::track::filter::Region;
use crate::track::model::Activity;

/// Aggregate statistics over the activities selected for rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct ActivitySummary {
    pub activities: usize,
    pub first_start: DateTime<Utc>,
    pub last_start: DateTime<Utc>,
    pub min_duration: TimeDelta,
    pub max_duration: TimeDelta,
    /// Meters.
    pub min_distance: f64,
    /// Meters.
    pub max_distance: f64,
    /// Centre of the lat/lon bounding box and the farthest point from it.
    pub bounds: Region,
    pub total_points: usize,
    pub total_duration: TimeDelta,
    /// Meters.
    pub total_distance: f64,
}

impl ActivitySummary {
    pub fn from_activities(activities: &[Activity]) -> RoadsResult<Self> {
        let Some(first) = activities.first() else {
            return Err(RoadsError::empty_input("no matching activities found"));
        };

        let mut s = Self {
            activities: activities.len(),
            first_start: first.start(),
            last_start: first.start(),
            min_duration: first.duration(),
            max_duration: first.duration(),
            min_distance: first.distance_m(),
            max_distance: first.distance_m(),
            bounds: Region {
                center: first.first().pos,
                radius_m: 0.0,
            },
            total_points: 0,
            total_duration: TimeDelta::zero(),
            total_distance: 0.0,
        };

        let (mut min_lat, mut min_lon) = (f64::MAX, f64::MAX);
        let (mut max_lat, mut max_lon) = (f64::MIN, f64::MIN);
        for act in activities {
            s.first_start = s.first_start.min(act.start());
            s.last_start = s.last_start.max(act.start());
            s.min_duration = s.min_duration.min(act.duration());
            s.max_duration = s.max_duration.max(act.duration());
            s.min_distance = s.min_distance.min(act.distance_m());
            s.max_distance = s.max_distance.max(act.distance_m());
            s.total_points += act.points().len();
            s.total_duration += act.duration();
            s.total_distance += act.distance_m();
            for p in act.points() {
                min_lat = min_lat.min(p.pos.lat);
                min_lon = min_lon.min(p.pos.lon);
                max_lat = max_lat.max(p.pos.lat);
                max_lon = max_lon.max(p.pos.lon);
            }
        }

        let center = GeoPoint {
            lat: (min_lat + max_lat) / 2.0,
            lon: (min_lon + max_lon) / 2.0,
        };
        let radius_m = activities
            .iter()
            .flat_map(|a| a.points())
            .map(|p| haversine_distance(center, p.pos))
            .fold(0.0, f64::max);
        s.bounds = Region { center, radius_m };
        Ok(s)
    }

    /// Emit the summary through `tracing` at INFO level.
    pub fn log(&self) {
        let (period, unit) = period_parts(self.last_start - self.first_start);
        tracing::info!(activities = self.activities, "activities");
        tracing::info!(
            "period: {period:.1} {unit}(s) ({} to {})",
            self.first_start.format("%Y-%m-%d"),
            self.last_start.format("%Y-%m-%d")
        );
        tracing::info!(
            "duration range: {} to {}",
            format_duration(self.min_duration),
            format_duration(self.max_duration)
        );
        tracing::info!(
            "distance range: {:.1}km to {:.1}km",
            self.min_distance / 1_000.0,
            self.max_distance / 1_000.0
        );
        tracing::info!("bounds: {}", self.bounds);
        tracing::info!(points = self.total_points, "total points");
        tracing::info!("total duration: {}", format_duration(self.total_duration));
        tracing::info!("total distance: {:.1}km", self.total_distance / 1_000.0);
    }
}

/// Express a period in the largest calendar unit it spans.
pub fn period_parts(d: TimeDelta) -> (f64, &'static str) {
    const HOUR: f64 = 3_600.0;
    const DAY: f64 = 24.0 * HOUR;
    const YEAR: f64 = 365.25 * DAY;
    const MONTH: f64 = YEAR / 12.0;
    let secs = d.num_milliseconds() as f64 / 1_000.0;
    match secs {
        s if s >= YEAR => (s / YEAR, "year"),
        s if s >= MONTH => (s / MONTH, "month"),
        s if s >= 7.0 * DAY => (s / (7.0 * DAY), "week"),
        s if s >= DAY => (s / DAY, "day"),
        s if s >= HOUR => (s / HOUR, "hour"),
        s if s >= 60.0 => (s / 60.0, "minute"),
        s => (s, "second"),
    }
}

fn format_duration(d: TimeDelta) -> String {
    let secs = d.num_seconds();
    let (h, m, s) = (secs / 3_600, (secs % 3_600) / 60, secs % 60);
    if h > 0 {
        format!("{h}h{m}m{s}s")
    } else if m > 0 {
        format!("{m}m{s}s")
    } else {
        format!("{s}s")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/track/summary.rs"]
mod tests;
