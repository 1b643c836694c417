use std::str::FromStr;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

use crate::foundation::core::GeoPoint;
use crate::foundation::error::{RoadsError, RoadsResult};
use crate::foundation::math::haversine_distance;
use crate::track::model::Activity;

/// Circular geographic region, radius in meters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    pub center: GeoPoint,
    pub radius_m: f64,
}

impl Region {
    pub fn new(center: GeoPoint, radius_m: f64) -> RoadsResult<Self> {
        if !radius_m.is_finite() || radius_m < 0.0 {
            return Err(RoadsError::validation("region radius must be >= 0"));
        }
        Ok(Self { center, radius_m })
    }

    pub fn contains(&self, p: GeoPoint) -> bool {
        haversine_distance(self.center, p) <= self.radius_m
    }
}

impl FromStr for Region {
    type Err = RoadsError;

    /// Parses `lat,lon,radius`, e.g. `51.53,-0.21,1km`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [lat, lon, radius] = parts.as_slice() else {
            return Err(RoadsError::validation(format!(
                "region \"{s}\" must be formatted as lat,lon,radius"
            )));
        };
        let lat = parse_f64(lat, "region latitude")?;
        let lon = parse_f64(lon, "region longitude")?;
        Region::new(GeoPoint::new(lat, lon)?, parse_distance(radius)?)
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.4},{:.4},{}",
            self.center.lat,
            self.center.lon,
            format_distance(self.radius_m)
        )
    }
}

fn parse_f64(s: &str, what: &str) -> RoadsResult<f64> {
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RoadsError::validation(format!("invalid {what} \"{s}\"")))
}

/// Parses a distance with an optional unit suffix (`m`, `km`, `mi`, `ft`) into meters.
pub fn parse_distance(s: &str) -> RoadsResult<f64> {
    let s = s.trim();
    let split = s
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(s.len());
    let (num, unit) = s.split_at(split);
    let factor = match unit.to_ascii_lowercase().as_str() {
        "" | "m" => 1.0,
        "km" => 1_000.0,
        "mi" => 1_609.344,
        "ft" => 0.3048,
        other => {
            return Err(RoadsError::validation(format!(
                "unknown distance unit \"{other}\" in \"{s}\""
            )));
        }
    };
    let v = parse_f64(num.trim(), "distance")?;
    if v < 0.0 {
        return Err(RoadsError::validation(format!(
            "distance \"{s}\" must not be negative"
        )));
    }
    Ok(v * factor)
}

fn format_distance(m: f64) -> String {
    if m >= 1_000.0 {
        format!("{:.1}km", m / 1_000.0)
    } else {
        format!("{m:.0}m")
    }
}

/// Parses durations such as `45s`, `15m`, `1h30m` or `1.5h`.
pub fn parse_duration(s: &str) -> RoadsResult<TimeDelta> {
    let s = s.trim();
    if s.is_empty() {
        return Err(RoadsError::validation("empty duration"));
    }

    let mut total_ms = 0.0f64;
    let mut rest = s;
    while !rest.is_empty() {
        let num_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if num_end == 0 {
            return Err(RoadsError::validation(format!("invalid duration \"{s}\"")));
        }
        let value = parse_f64(&rest[..num_end], "duration")?;
        rest = &rest[num_end..];

        let unit_end = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let unit_ms = match &rest[..unit_end] {
            "ms" => 1.0,
            "s" => 1_000.0,
            "m" => 60_000.0,
            "h" => 3_600_000.0,
            unit => {
                return Err(RoadsError::validation(format!(
                    "unknown duration unit \"{unit}\" in \"{s}\""
                )));
            }
        };
        rest = &rest[unit_end..];
        total_ms += value * unit_ms;
    }

    Ok(TimeDelta::milliseconds(total_ms.round() as i64))
}

/// Parses a `YYYY-MM-DD` date as midnight UTC.
pub fn parse_date(s: &str) -> RoadsResult<DateTime<Utc>> {
    let d = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| RoadsError::validation(format!("invalid date \"{s}\": {e}")))?;
    Ok(d.and_time(chrono::NaiveTime::MIN).and_utc())
}

/// Predicates an activity must satisfy to be rendered. Unset fields always pass.
#[derive(Clone, Debug, Default)]
pub struct ActivityFilter {
    /// Case-insensitive sport names; empty means any sport.
    pub sports: Vec<String>,
    pub after: Option<DateTime<Utc>>,
    pub before: Option<DateTime<Utc>>,
    pub min_duration: Option<TimeDelta>,
    pub max_duration: Option<TimeDelta>,
    /// Meters.
    pub min_distance: Option<f64>,
    /// Meters.
    pub max_distance: Option<f64>,
    pub starts_near: Option<Region>,
    pub ends_near: Option<Region>,
    pub passes_through: Option<Region>,
    pub bounded_by: Option<Region>,
}

impl ActivityFilter {
    pub fn includes(&self, act: &Activity) -> bool {
        self.includes_sport(act)
            && self.includes_date(act)
            && self.includes_duration(act)
            && self.includes_distance(act)
            && self.includes_regions(act)
    }

    /// Keep only the activities passing every predicate, preserving order.
    pub fn apply(&self, activities: Vec<Activity>) -> Vec<Activity> {
        activities.into_iter().filter(|a| self.includes(a)).collect()
    }

    fn includes_sport(&self, act: &Activity) -> bool {
        if self.sports.is_empty() {
            return true;
        }
        act.sport()
            .is_some_and(|sport| self.sports.iter().any(|s| s.eq_ignore_ascii_case(sport)))
    }

    fn includes_date(&self, act: &Activity) -> bool {
        let start = act.start();
        if self.after.is_some_and(|min| start < min) {
            return false;
        }
        if self.before.is_some_and(|max| start > max) {
            return false;
        }
        true
    }

    fn includes_duration(&self, act: &Activity) -> bool {
        let d = act.duration();
        !(self.min_duration.is_some_and(|min| d < min)
            || self.max_duration.is_some_and(|max| d > max))
    }

    fn includes_distance(&self, act: &Activity) -> bool {
        let d = act.distance_m();
        !(self.min_distance.is_some_and(|min| d < min)
            || self.max_distance.is_some_and(|max| d > max))
    }

    fn includes_regions(&self, act: &Activity) -> bool {
        if let Some(r) = &self.starts_near
            && !r.contains(act.first().pos)
        {
            return false;
        }
        if let Some(r) = &self.ends_near
            && !r.contains(act.last().pos)
        {
            return false;
        }
        if let Some(r) = &self.bounded_by
            && !act.points().iter().all(|p| r.contains(p.pos))
        {
            return false;
        }
        match &self.passes_through {
            Some(r) => act.points().iter().any(|p| r.contains(p.pos)),
            None => true,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/track/filter.rs"]
mod tests;
