use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CAPTURE_DELAY_SECS: u64 = 3;
pub const MAX_CAPTURE_DELAY_SECS: u64 = 30;
pub const DEFAULT_DRAG_STEPS: i64 = 30;
pub const DEFAULT_KEY: &str = "Return";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    #[default]
    Left,
    Middle,
    Right,
}

impl Button {
    /// Resolves a `button` query value. Unknown names fall back to left.
    pub fn from_query(raw: &str) -> Self {
        match raw {
            "right" => Self::Right,
            "middle" => Self::Middle,
            _ => Self::Left,
        }
    }

    /// Button number understood by the automation tool.
    pub fn code(self) -> &'static str {
        match self {
            Self::Left => "1",
            Self::Middle => "2",
            Self::Right => "3",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Middle => "middle",
            Self::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Parses an integer query value, treating anything unparsable as zero.
pub fn lenient_int(raw: Option<&str>) -> i64 {
    raw.and_then(|value| value.parse::<i64>().ok()).unwrap_or(0)
}

/// Query flags are set only by the literal value `1`.
pub fn flag(raw: Option<&str>) -> bool {
    raw == Some("1")
}

pub fn capture_delay(raw: Option<&str>) -> Duration {
    let secs = raw
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse::<i64>().ok())
        .filter(|secs| (0..=MAX_CAPTURE_DELAY_SECS as i64).contains(secs))
        .map(|secs| secs as u64)
        .unwrap_or(DEFAULT_CAPTURE_DELAY_SECS);
    Duration::from_secs(secs)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragPlan {
    pub from: Point,
    pub to: Point,
    pub steps: i64,
    pub duration_ms: i64,
}

impl DragPlan {
    pub fn new(from: Point, to: Point, steps: i64, duration_ms: i64) -> Self {
        Self {
            from,
            to,
            steps: if steps <= 0 { DEFAULT_DRAG_STEPS } else { steps },
            duration_ms: duration_ms.max(0),
        }
    }

    /// Evenly spaced points from `from` to `to`, both included, `steps` in total.
    /// A single-step plan jumps straight to `to`. Points are produced lazily.
    pub fn waypoints(&self) -> impl Iterator<Item = Point> {
        let plan = *self;
        (0..plan.steps.max(0)).map(move |k| plan.waypoint(k))
    }

    /// Waypoint `k` (0-based), clamped to the plan's range.
    pub fn waypoint(&self, k: i64) -> Point {
        if self.steps <= 1 {
            return self.to;
        }
        let span = self.steps - 1;
        let k = k.clamp(0, span);
        Point {
            x: interpolate(self.from.x, self.to.x, k, span),
            y: interpolate(self.from.y, self.to.y, k, span),
        }
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis((self.duration_ms / self.steps.max(1)).max(0) as u64)
    }
}

// Widened so any pair of i64 endpoints works; with `0 <= k <= span` the
// result lies between `from` and `to`.
fn interpolate(from: i64, to: i64, k: i64, span: i64) -> i64 {
    let delta = i128::from(to) - i128::from(from);
    (i128::from(from) + delta * i128::from(k) / i128::from(span)) as i64
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
