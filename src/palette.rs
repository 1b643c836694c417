use std::str::FromStr;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{RoadsError, RoadsResult};

/// Color scheme used when none is given: white-hot head fading through yellow, red and purple
/// into a dark navy background.
pub const DEFAULT_COLOR_SCHEME: &str = "#fff,#ff8@.01,#911@.03,#414@.07,#007@.15,#001";

/// Number of ink levels sampled from a [`ColorScheme`] by default (plus one transparent entry).
pub const DEFAULT_LEVELS: usize = 255;

/// Ordered, read-only frame palette.
///
/// Entries `0..len-1` are ink levels from most vivid (0) to background (`len-2`); the final entry
/// is the transparency sentinel meaning "unchanged from the previous frame".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgba8>,
}

impl Palette {
    pub fn new(colors: Vec<Rgba8>) -> RoadsResult<Self> {
        if colors.len() < 2 || colors.len() > 256 {
            return Err(RoadsError::validation(format!(
                "palette must have between 2 and 256 entries, got {}",
                colors.len()
            )));
        }
        Ok(Self { colors })
    }

    pub fn colors(&self) -> &[Rgba8] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Number of ink levels (every entry except the sentinel).
    pub fn levels(&self) -> usize {
        self.colors.len() - 1
    }

    /// Lightest ink level; fresh canvases start here.
    pub fn background_index(&self) -> u8 {
        (self.colors.len() - 2) as u8
    }

    pub fn transparent_index(&self) -> u8 {
        (self.colors.len() - 1) as u8
    }

    pub fn color(&self, index: u8) -> Rgba8 {
        self.colors
            .get(usize::from(index))
            .copied()
            .unwrap_or(Rgba8::transparent())
    }

    /// Map a trail age in `[0, 1]` linearly across the whole palette (0 = just visited).
    ///
    /// The top of the range lands on the sentinel, which never darkens a canvas, so it is capped
    /// at the background.
    pub fn ink_index(&self, age: f64) -> u8 {
        let max = self.colors.len() - 1;
        ((age.clamp(0.0, 1.0) * max as f64) as usize).min(max - 1) as u8
    }

    /// Ink indices below this value spread a glow to their neighbours.
    pub fn glow_limit(&self) -> u16 {
        (self.colors.len() / 2) as u16
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ColorStop {
    color: Rgba8,
    pos: Option<f64>,
}

/// A CSS linear-gradient inspired color scheme, e.g. `red,yellow@10%,green@.2,blue`.
///
/// Stops without a position are spread evenly between their positioned neighbours; the first
/// defaults to 0 and the last to 1.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorScheme {
    stops: Vec<(Rgba8, f64)>,
}

impl Default for ColorScheme {
    fn default() -> Self {
        DEFAULT_COLOR_SCHEME
            .parse()
            .unwrap_or_else(|_| Self::from_resolved(vec![(Rgba8::opaque(255, 255, 255), 0.0)]))
    }
}

impl ColorScheme {
    fn from_resolved(stops: Vec<(Rgba8, f64)>) -> Self {
        Self { stops }
    }

    /// Sample the gradient at `t` in `[0, 1]`.
    pub fn sample(&self, t: f64) -> Rgba8 {
        let t = t.clamp(0.0, 1.0);
        let first = self.stops[0];
        if t <= first.1 {
            return first.0;
        }
        for w in self.stops.windows(2) {
            let ((c0, p0), (c1, p1)) = (w[0], w[1]);
            if t <= p1 {
                if p1 <= p0 {
                    return c1;
                }
                return lerp_rgba(c0, c1, (t - p0) / (p1 - p0));
            }
        }
        self.stops[self.stops.len() - 1].0
    }

    /// Build a palette of `levels` ink colors followed by the transparency sentinel.
    pub fn palette(&self, levels: usize) -> RoadsResult<Palette> {
        if levels == 0 || levels > 255 {
            return Err(RoadsError::validation(format!(
                "palette levels must be in 1..=255, got {levels}"
            )));
        }
        let mut colors = Vec::with_capacity(levels + 1);
        for i in 0..levels {
            let t = if levels == 1 {
                0.0
            } else {
                i as f64 / (levels - 1) as f64
            };
            colors.push(self.sample(t));
        }
        colors.push(Rgba8::transparent());
        Palette::new(colors)
    }
}

impl FromStr for ColorScheme {
    type Err = RoadsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stops = s
            .split(',')
            .map(parse_stop)
            .collect::<RoadsResult<Vec<_>>>()?;
        if stops.is_empty() {
            return Err(RoadsError::validation("color scheme has no colors"));
        }
        Ok(Self::from_resolved(resolve_positions(&stops)))
    }
}

fn parse_stop(s: &str) -> RoadsResult<ColorStop> {
    let s = s.trim();
    let (color, pos) = match s.split_once('@') {
        Some((c, p)) => (c.trim(), Some(parse_position(p.trim())?)),
        None => (s, None),
    };
    Ok(ColorStop {
        color: parse_color(color)?,
        pos,
    })
}

fn parse_position(s: &str) -> RoadsResult<f64> {
    let (num, scale) = match s.strip_suffix('%') {
        Some(n) => (n, 0.01),
        None => (s, 1.0),
    };
    num.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v * scale)
        .ok_or_else(|| RoadsError::validation(format!("invalid color stop position \"{s}\"")))
}

fn resolve_positions(stops: &[ColorStop]) -> Vec<(Rgba8, f64)> {
    let n = stops.len();
    let mut pos: Vec<Option<f64>> = stops.iter().map(|s| s.pos).collect();
    if pos[0].is_none() {
        pos[0] = Some(0.0);
    }
    if pos[n - 1].is_none() {
        pos[n - 1] = Some(if n == 1 { 0.0 } else { 1.0 });
    }

    // Positions never go backwards.
    let mut max_so_far = f64::MIN;
    for p in pos.iter_mut().flatten() {
        max_so_far = max_so_far.max(*p);
        *p = max_so_far;
    }

    let mut i = 0;
    while i < n {
        if pos[i].is_some() {
            i += 1;
            continue;
        }
        let start = i - 1;
        let mut end = i;
        while pos[end].is_none() {
            end += 1;
        }
        let (p0, p1) = (pos[start].unwrap_or(0.0), pos[end].unwrap_or(1.0));
        let span = (end - start) as f64;
        for (k, slot) in pos.iter_mut().enumerate().take(end).skip(start + 1) {
            *slot = Some(p0 + (p1 - p0) * (k - start) as f64 / span);
        }
        i = end;
    }

    stops
        .iter()
        .zip(pos)
        .map(|(s, p)| (s.color, p.unwrap_or(0.0)))
        .collect()
}

fn lerp_rgba(a: Rgba8, b: Rgba8, t: f64) -> Rgba8 {
    fn ch(x: u8, y: u8, t: f64) -> u8 {
        (f64::from(x) + (f64::from(y) - f64::from(x)) * t)
            .round()
            .clamp(0.0, 255.0) as u8
    }
    Rgba8 {
        r: ch(a.r, b.r, t),
        g: ch(a.g, b.g, t),
        b: ch(a.b, b.b, t),
        a: ch(a.a, b.a, t),
    }
}

/// Parse `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` or a basic CSS color name.
pub fn parse_color(s: &str) -> RoadsResult<Rgba8> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex).map_err(|e| RoadsError::validation(format!("color \"{s}\": {e}")));
    }
    let named = match s.to_ascii_lowercase().as_str() {
        "black" => Rgba8::opaque(0, 0, 0),
        "white" => Rgba8::opaque(255, 255, 255),
        "red" => Rgba8::opaque(255, 0, 0),
        "lime" => Rgba8::opaque(0, 255, 0),
        "green" => Rgba8::opaque(0, 128, 0),
        "blue" => Rgba8::opaque(0, 0, 255),
        "yellow" => Rgba8::opaque(255, 255, 0),
        "cyan" | "aqua" => Rgba8::opaque(0, 255, 255),
        "magenta" | "fuchsia" => Rgba8::opaque(255, 0, 255),
        "orange" => Rgba8::opaque(255, 165, 0),
        "purple" => Rgba8::opaque(128, 0, 128),
        "navy" => Rgba8::opaque(0, 0, 128),
        "gray" | "grey" => Rgba8::opaque(128, 128, 128),
        "transparent" => Rgba8::transparent(),
        _ => {
            return Err(RoadsError::validation(format!("unknown color \"{s}\"")));
        }
    };
    Ok(named)
}

fn parse_hex(hex: &str) -> Result<Rgba8, String> {
    fn nibble(c: char) -> Result<u8, String> {
        c.to_digit(16)
            .map(|d| d as u8)
            .ok_or_else(|| format!("invalid hex digit '{c}'"))
    }

    let digits = hex.chars().map(nibble).collect::<Result<Vec<_>, _>>()?;
    let (r, g, b, a) = match digits.as_slice() {
        [r, g, b] => (r * 17, g * 17, b * 17, 255),
        [r, g, b, a] => (r * 17, g * 17, b * 17, a * 17),
        [r1, r0, g1, g0, b1, b0] => (r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0, 255),
        [r1, r0, g1, g0, b1, b0, a1, a0] => {
            (r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0, a1 * 16 + a0)
        }
        _ => return Err("expected 3, 4, 6 or 8 hex digits".to_owned()),
    };
    Ok(Rgba8 { r, g, b, a })
}

#[cfg(test)]
#[path = "../tests/unit/palette.rs"]
mod tests;
