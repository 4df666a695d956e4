use super::*;
use crate::testing::RecordingRunner;

fn driver() -> (Arc<RecordingRunner>, Xdotool) {
    let runner = Arc::new(RecordingRunner::new());
    let driver = Xdotool::new(runner.clone());
    (runner, driver)
}

#[test]
fn parses_shell_location_output() {
    let stdout = "X=1043\nY=577\nSCREEN=0\nWINDOW=62914567\n";
    assert_eq!(parse_location(stdout), Point::new(1043, 577));
}

#[test]
fn unparsable_location_fields_read_as_zero() {
    assert_eq!(parse_location(""), Point::default());
    assert_eq!(parse_location("X=abc\nY=12\n"), Point::new(0, 12));
}

#[tokio::test]
async fn location_queries_shell_format() {
    let (runner, driver) = driver();
    runner.respond("getmouselocation", "X=10\nY=20\nSCREEN=0\n");

    let point = driver.location().await.expect("location");

    assert_eq!(point, Point::new(10, 20));
    assert_eq!(runner.command_lines(), vec!["getmouselocation --shell"]);
}

#[tokio::test]
async fn pointer_commands_format_arguments() {
    let (runner, driver) = driver();

    driver.move_relative(-5, 7).await.expect("relative");
    driver.move_to(Point::new(300, 400)).await.expect("absolute");
    driver.click(Button::Right).await.expect("click");
    driver.mouse_down(Button::Middle).await.expect("down");
    driver.mouse_up(Button::Left).await.expect("up");

    assert_eq!(
        runner.command_lines(),
        vec![
            "mousemove_relative -- -5 7",
            "mousemove 300 400",
            "click 3",
            "mousedown 2",
            "mouseup 1",
        ]
    );
}

#[tokio::test]
async fn typed_text_is_passed_as_a_single_argument() {
    let (runner, driver) = driver();
    let driver = driver.with_type_delay(25);

    driver.type_text("hello world & more").await.expect("type");
    driver.key("ctrl+a").await.expect("key");

    let calls = runner.calls();
    assert_eq!(
        calls[0],
        vec!["type", "--clearmodifiers", "--delay", "25", "hello world & more"]
    );
    assert_eq!(calls[1], vec!["key", "--clearmodifiers", "ctrl+a"]);
}

#[tokio::test]
async fn tool_failures_propagate() {
    let (runner, driver) = driver();
    runner.fail("mousedown", "BadWindow");

    let err = driver
        .mouse_down(Button::Left)
        .await
        .expect_err("should fail");

    assert_eq!(err.to_string(), "xdotool exited with status 1: BadWindow");
}

#[tokio::test]
async fn drag_presses_walks_waypoints_and_releases() {
    let (runner, driver) = driver();
    let plan = DragPlan::new(Point::new(0, 0), Point::new(30, 60), 4, 0);

    driver.drag(&plan, Button::Right).await.expect("drag");

    assert_eq!(
        runner.command_lines(),
        vec![
            "mousemove 0 0",
            "mousedown 3",
            "mousemove 0 0",
            "mousemove 10 20",
            "mousemove 20 40",
            "mousemove 30 60",
            "mouseup 3",
        ]
    );
}

#[tokio::test]
async fn drag_aborts_when_press_fails() {
    let (runner, driver) = driver();
    runner.fail("mousedown", "no pointer");
    let plan = DragPlan::new(Point::new(0, 0), Point::new(5, 5), 3, 0);

    let err = driver
        .drag(&plan, Button::Left)
        .await
        .expect_err("should fail");

    assert!(err.to_string().contains("no pointer"));
    assert_eq!(runner.command_lines(), vec!["mousemove 0 0", "mousedown 1"]);
}

#[tokio::test]
async fn failed_waypoint_move_still_releases_the_button() {
    let (runner, driver) = driver();
    runner.fail_line("mousemove 10 10", "BadMatch");
    let plan = DragPlan::new(Point::new(0, 0), Point::new(20, 20), 3, 0);

    driver.drag(&plan, Button::Left).await.expect("drag continues");

    assert_eq!(
        runner.command_lines(),
        vec![
            "mousemove 0 0",
            "mousedown 1",
            "mousemove 0 0",
            "mousemove 10 10",
            "mousemove 20 20",
            "mouseup 1",
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn drag_spreads_duration_across_waypoints() {
    let (runner, driver) = driver();
    let plan = DragPlan::new(Point::new(0, 0), Point::new(30, 0), 3, 300);
    let started = tokio::time::Instant::now();

    driver.drag(&plan, Button::Left).await.expect("drag");

    assert_eq!(started.elapsed(), std::time::Duration::from_millis(300));
    assert_eq!(runner.command_lines().last().map(String::as_str), Some("mouseup 1"));
}
