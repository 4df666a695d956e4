//! Route handlers. Each one turns query parameters into tool invocations and
//! reports the outcome in the body; the HTTP status stays 200.

mod params;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    Json,
};
use shared::{
    domain::{capture_delay, DragPlan, Point, DEFAULT_KEY},
    protocol::{Ack, Health, PositionReply},
};
use tracing::{error, info};
use xdotool_integration::AutomationError;

use crate::app_state::AppState;

use params::Params;

pub(crate) async fn health() -> Json<Health> {
    Json(Health { ok: true })
}

pub(crate) async fn pos(State(state): State<Arc<AppState>>) -> Json<PositionReply> {
    Json(report_position(&state).await)
}

pub(crate) async fn capture(
    State(state): State<Arc<AppState>>,
    params: Params,
) -> Json<PositionReply> {
    let delay = capture_delay(params.get("delay"));
    info!(delay_secs = delay.as_secs(), "capture scheduled");
    tokio::time::sleep(delay).await;
    Json(report_position(&state).await)
}

pub(crate) async fn move_relative(
    State(state): State<Arc<AppState>>,
    params: Params,
) -> Json<Ack> {
    let (dx, dy) = (params.int("dx"), params.int("dy"));
    info!(dx, dy, "move");
    acknowledge("move", state.xdotool.move_relative(dx, dy).await)
}

pub(crate) async fn click(State(state): State<Arc<AppState>>, params: Params) -> Json<Ack> {
    let target = Point::new(params.int("x"), params.int("y"));
    let button = params.button();
    let double = params.flag("double");
    let move_only = params.flag("move_only");
    info!(
        x = target.x,
        y = target.y,
        button = button.as_str(),
        double,
        move_only,
        "click"
    );

    let result = async {
        state.xdotool.move_to(target).await?;
        if move_only {
            return Ok(());
        }
        let clicks = if double { 2 } else { 1 };
        for _ in 0..clicks {
            state.xdotool.click(button).await?;
        }
        Ok::<(), AutomationError>(())
    }
    .await;
    acknowledge("click", result)
}

pub(crate) async fn down(State(state): State<Arc<AppState>>, params: Params) -> Json<Ack> {
    let button = params.button();
    info!(button = button.as_str(), "down");
    acknowledge("down", state.xdotool.mouse_down(button).await)
}

pub(crate) async fn up(State(state): State<Arc<AppState>>, params: Params) -> Json<Ack> {
    let button = params.button();
    info!(button = button.as_str(), "up");
    acknowledge("up", state.xdotool.mouse_up(button).await)
}

pub(crate) async fn drag(State(state): State<Arc<AppState>>, params: Params) -> Json<Ack> {
    let plan = DragPlan::new(
        Point::new(params.int("x1"), params.int("y1")),
        Point::new(params.int("x2"), params.int("y2")),
        params.int("steps"),
        params.int("duration"),
    );
    let button = params.button();
    info!(
        x1 = plan.from.x,
        y1 = plan.from.y,
        x2 = plan.to.x,
        y2 = plan.to.y,
        steps = plan.steps,
        duration_ms = plan.duration_ms,
        button = button.as_str(),
        "drag"
    );
    acknowledge("drag", state.xdotool.drag(&plan, button).await)
}

pub(crate) async fn type_text(State(state): State<Arc<AppState>>, params: Params) -> Json<Ack> {
    let text = params.get("text").unwrap_or_default();
    info!(chars = text.chars().count(), "type");
    acknowledge("type", state.xdotool.type_text(text).await)
}

pub(crate) async fn key(State(state): State<Arc<AppState>>, params: Params) -> Json<Ack> {
    let code = params
        .get("code")
        .filter(|code| !code.is_empty())
        .unwrap_or(DEFAULT_KEY);
    info!(code, "key");
    acknowledge("key", state.xdotool.key(code).await)
}

/// Unknown paths still answer in the `Ack` shape.
pub(crate) async fn not_found(uri: Uri) -> (StatusCode, Json<Ack>) {
    (
        StatusCode::NOT_FOUND,
        Json(Ack::failed(format!("no route for {}", uri.path()))),
    )
}

async fn report_position(state: &AppState) -> PositionReply {
    match state.xdotool.location().await {
        Ok(point) => PositionReply::Position(point.into()),
        Err(err) => {
            error!(operation = "pos", error = %err, "xdotool command failed");
            PositionReply::Failed(Ack::failed(err.to_string()))
        }
    }
}

fn acknowledge(operation: &'static str, result: Result<(), AutomationError>) -> Json<Ack> {
    match result {
        Ok(()) => Json(Ack::ok()),
        Err(err) => {
            error!(operation, error = %err, "xdotool command failed");
            Json(Ack::failed(err.to_string()))
        }
    }
}
