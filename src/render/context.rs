use chrono::{DateTime, TimeDelta, Utc};
use kurbo::Rect;

use crate::foundation::core::GeoPoint;
use crate::foundation::error::{RoadsError, RoadsResult};
use crate::foundation::math::mercator_meters;
use crate::track::model::Activity;

/// Largest derived canvas height accepted before allocation.
pub const MAX_CANVAS_HEIGHT: u32 = 1 << 15;

/// An activity point in canvas space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedPoint {
    pub x: i32,
    pub y: i32,
    /// Elapsed time since the activity start, normalized by the longest rendered activity.
    pub p: f64,
}

/// The projected point sequence of one activity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectedTrack {
    pub points: Vec<ProjectedPoint>,
}

/// Immutable reduction over every rendered activity: geographic bounds, the longest duration,
/// and the single affine fit from Mercator meters to canvas pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderContext {
    width: u32,
    height: u32,
    min_x: f64,
    max_y: f64,
    scale: f64,
    max_duration: TimeDelta,
}

impl RenderContext {
    pub fn new(activities: &[Activity], width: u32) -> RoadsResult<Self> {
        if width == 0 {
            return Err(RoadsError::canvas_size("width must be > 0"));
        }
        if activities.is_empty() {
            return Err(RoadsError::empty_input("no activities to render"));
        }

        let (mut min_lat, mut min_lon) = (f64::MAX, f64::MAX);
        let (mut max_lat, mut max_lon) = (f64::MIN, f64::MIN);
        let mut max_duration = TimeDelta::zero();
        for act in activities {
            max_duration = max_duration.max(act.duration());
            for p in act.points() {
                min_lat = min_lat.min(p.pos.lat);
                min_lon = min_lon.min(p.pos.lon);
                max_lat = max_lat.max(p.pos.lat);
                max_lon = max_lon.max(p.pos.lon);
            }
        }

        let meters = Rect::from_points(
            mercator_meters(GeoPoint {
                lat: min_lat,
                lon: min_lon,
            }),
            mercator_meters(GeoPoint {
                lat: max_lat,
                lon: max_lon,
            }),
        );
        let (dx, dy) = (meters.width(), meters.height());
        if !dx.is_finite() || !dy.is_finite() || dx <= 0.0 {
            return Err(RoadsError::invalid_bounds(
                "activities must span at least two distinct longitudes",
            ));
        }

        let mut scale = f64::from(width) / dx;
        let height = (dy * scale) as u32;
        if height == 0 {
            return Err(RoadsError::invalid_bounds(format!(
                "activities have no vertical extent at width {width}"
            )));
        }
        if height > MAX_CANVAS_HEIGHT {
            return Err(RoadsError::canvas_size(format!(
                "derived canvas height {height} exceeds {MAX_CANVAS_HEIGHT}"
            )));
        }

        // Shrink into a 5% margin on every side.
        scale *= 0.9;
        let min_x = meters.x0 - 0.05 * dx;
        let max_y = meters.y1 + 0.05 * dy;

        Ok(Self {
            width,
            height,
            min_x,
            max_y,
            scale,
            max_duration,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixels per Mercator meter, shared by both axes.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn max_duration(&self) -> TimeDelta {
        self.max_duration
    }

    pub fn project(&self, p: GeoPoint) -> (i32, i32) {
        let m = mercator_meters(p);
        let x = ((m.x - self.min_x) * self.scale) as i32;
        let y = ((self.max_y - m.y) * self.scale) as i32;
        (x, y)
    }

    pub fn progress(&self, start: DateTime<Utc>, t: DateTime<Utc>) -> f64 {
        let max_ms = self.max_duration.num_milliseconds();
        if max_ms <= 0 {
            return 0.0;
        }
        (t - start).num_milliseconds() as f64 / max_ms as f64
    }

    pub fn project_activity(&self, act: &Activity) -> ProjectedTrack {
        let start = act.start();
        let points = act
            .points()
            .iter()
            .map(|tp| {
                let (x, y) = self.project(tp.pos);
                ProjectedPoint {
                    x,
                    y,
                    p: self.progress(start, tp.time),
                }
            })
            .collect();
        ProjectedTrack { points }
    }

    pub fn project_all(&self, activities: &[Activity]) -> Vec<ProjectedTrack> {
        activities.iter().map(|a| self.project_activity(a)).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/context.rs"]
mod tests;
