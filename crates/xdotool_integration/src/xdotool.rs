use std::sync::Arc;

use shared::domain::{lenient_int, Button, DragPlan, Point};
use tracing::warn;

use crate::{AutomationError, CommandRunner, ProcessRunner};

pub const DEFAULT_TYPE_DELAY_MS: u64 = 10;

/// Translates pointer and keyboard actions into `xdotool` invocations.
#[derive(Clone)]
pub struct Xdotool {
    runner: Arc<dyn CommandRunner>,
    type_delay_ms: u64,
}

impl Xdotool {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            type_delay_ms: DEFAULT_TYPE_DELAY_MS,
        }
    }

    pub fn from_program(program: impl Into<String>) -> Self {
        Self::new(Arc::new(ProcessRunner::new(program)))
    }

    pub fn with_type_delay(mut self, type_delay_ms: u64) -> Self {
        self.type_delay_ms = type_delay_ms;
        self
    }

    pub fn program(&self) -> &str {
        self.runner.program()
    }

    pub async fn location(&self) -> Result<Point, AutomationError> {
        let stdout = self.exec(["getmouselocation", "--shell"]).await?;
        Ok(parse_location(&stdout))
    }

    pub async fn move_relative(&self, dx: i64, dy: i64) -> Result<(), AutomationError> {
        self.exec([
            "mousemove_relative".to_string(),
            "--".to_string(),
            dx.to_string(),
            dy.to_string(),
        ])
        .await
        .map(drop)
    }

    pub async fn move_to(&self, point: Point) -> Result<(), AutomationError> {
        self.exec([
            "mousemove".to_string(),
            point.x.to_string(),
            point.y.to_string(),
        ])
        .await
        .map(drop)
    }

    pub async fn click(&self, button: Button) -> Result<(), AutomationError> {
        self.exec(["click", button.code()]).await.map(drop)
    }

    pub async fn mouse_down(&self, button: Button) -> Result<(), AutomationError> {
        self.exec(["mousedown", button.code()]).await.map(drop)
    }

    pub async fn mouse_up(&self, button: Button) -> Result<(), AutomationError> {
        self.exec(["mouseup", button.code()]).await.map(drop)
    }

    /// Presses at `plan.from`, walks the waypoints with the plan's pacing and
    /// releases. A failed intermediate move is skipped so the button is
    /// always released.
    pub async fn drag(&self, plan: &DragPlan, button: Button) -> Result<(), AutomationError> {
        self.move_to(plan.from).await?;
        self.mouse_down(button).await?;

        let pause = plan.step_delay();
        for point in plan.waypoints() {
            if let Err(error) = self.move_to(point).await {
                warn!(x = point.x, y = point.y, %error, "drag waypoint move failed");
            }
            if !pause.is_zero() {
                tokio::time::sleep(pause).await;
            }
        }

        self.mouse_up(button).await
    }

    pub async fn type_text(&self, text: &str) -> Result<(), AutomationError> {
        self.exec([
            "type".to_string(),
            "--clearmodifiers".to_string(),
            "--delay".to_string(),
            self.type_delay_ms.to_string(),
            text.to_string(),
        ])
        .await
        .map(drop)
    }

    pub async fn key(&self, code: &str) -> Result<(), AutomationError> {
        self.exec(["key", "--clearmodifiers", code]).await.map(drop)
    }

    async fn exec<I, S>(&self, args: I) -> Result<String, AutomationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.runner
            .run(args.into_iter().map(Into::into).collect())
            .await
    }
}

/// Reads `X=` and `Y=` lines from `getmouselocation --shell` output.
pub fn parse_location(stdout: &str) -> Point {
    let mut point = Point::default();
    for line in stdout.lines() {
        if let Some(value) = line.strip_prefix("X=") {
            point.x = lenient_int(Some(value.trim()));
        } else if let Some(value) = line.strip_prefix("Y=") {
            point.y = lenient_int(Some(value.trim()));
        }
    }
    point
}

#[cfg(test)]
#[path = "tests/xdotool_tests.rs"]
mod tests;
