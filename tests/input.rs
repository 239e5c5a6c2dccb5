extern crate tilecanvas;

use tilecanvas::*;

#[test]
fn client_positions_move_into_viewport() {
    let mut input = InputAdapter::new(Vec::new(), 40.0, 480.0);
    input.set_offset(10.0, 30.0);
    input.mouse_move(15.0, 35.0);
    input.mouse_down(110.0, 130.0);
    input.mouse_move(111.0, 131.0);
    input.mouse_up();
    input.mouse_move(0.0, 0.0);
    let events = input.into_sink();
    assert_eq!(events, vec![
        CanvasEvent::PointerMoved { viewport_pos: ViewportPoint::new(5.0, 5.0), is_down: false },
        CanvasEvent::PointerDown { viewport_pos: ViewportPoint::new(100.0, 100.0) },
        CanvasEvent::PointerMoved { viewport_pos: ViewportPoint::new(101.0, 101.0), is_down: true },
        CanvasEvent::PointerUp,
        CanvasEvent::PointerMoved { viewport_pos: ViewportPoint::new(-10.0, -30.0), is_down: false },
    ]);
}

#[test]
fn is_down_tracks_buttons() {
    let mut input = InputAdapter::new(Vec::new(), 40.0, 480.0);
    assert!(!input.is_down());
    input.mouse_down(1.0, 1.0);
    assert!(input.is_down());
    input.mouse_up();
    assert!(!input.is_down());
    assert_eq!(input.sink().len(), 2);
    input.sink_mut().clear();
    assert!(input.sink().is_empty());
}

#[test]
fn wheel_deltas_normalize_to_pixels() {
    let mut input = InputAdapter::new(Vec::new(), 40.0, 480.0);
    input.resize(640, 480);
    input.wheel(WheelDelta::Pixels(-7.5), 0.0, 0.0);
    input.wheel(WheelDelta::Lines(3.0), 0.0, 0.0);
    input.wheel(WheelDelta::Pages(-1.0), 0.0, 0.0);
    let deltas: Vec<f64> = input.sink().iter().filter_map(|e| match *e {
        CanvasEvent::Wheel { delta, .. } => Some(delta),
        _ => None,
    }).collect();
    assert_eq!(deltas, vec![-7.5, 120.0, -480.0]);
    assert_eq!(input.sink()[0], CanvasEvent::Resized { width: 640, height: 480 });
}

#[test]
fn pages_before_first_resize_use_initial_height() {
    let mut input = InputAdapter::new(Vec::new(), 40.0, 300.0);
    input.wheel(WheelDelta::Pages(2.0), 0.0, 0.0);
    input.resize(640, 480);
    input.wheel(WheelDelta::Pages(2.0), 0.0, 0.0);
    let deltas: Vec<f64> = input.sink().iter().filter_map(|e| match *e {
        CanvasEvent::Wheel { delta, .. } => Some(delta),
        _ => None,
    }).collect();
    assert_eq!(deltas, vec![600.0, 960.0]);
}

#[test]
fn closures_receive_events() {
    let mut count = 0;
    {
        let mut input = InputAdapter::new(FnSink(|_e: CanvasEvent| count += 1), 40.0, 480.0);
        input.mouse_down(0.0, 0.0);
        input.mouse_move(1.0, 0.0);
        input.mouse_up();
    }
    assert_eq!(count, 3);
}

#[test]
fn event_json_names() {
    let e = CanvasEvent::PointerMoved { viewport_pos: ViewportPoint::new(1.5, 2.0), is_down: true };
    let v: serde_json::Value = serde_json::to_value(&e).unwrap();
    assert_eq!(v["type"], "pointerMoved");
    assert_eq!(v["viewportPos"]["x"], 1.5);
    assert_eq!(v["isDown"], true);

    let up: CanvasEvent = serde_json::from_str(r#"{"type":"pointerUp"}"#).unwrap();
    assert_eq!(up, CanvasEvent::PointerUp);
    let wheel: CanvasEvent = serde_json::from_str(
        r#"{"type":"wheel","delta":-40.0,"viewportPos":{"x":3.0,"y":4.0}}"#).unwrap();
    assert_eq!(wheel, CanvasEvent::Wheel { delta: -40.0, viewport_pos: ViewportPoint::new(3.0, 4.0) });
}

#[test_log::test]
fn canvas_handles_view_events() {
    let mut canvas = TileCanvas::new(CanvasConfig::default());
    canvas.load_surface(800, 600);
    let mut input = InputAdapter::new(Vec::new(), canvas.config().line_height, 600.0);
    input.mouse_down(10.0, 10.0);
    input.wheel(WheelDelta::Lines(-3.0), 400.0, 300.0);
    input.resize(1000, 700);
    input.mouse_up();
    for e in input.sink() {
        canvas.handle_event(e);
    }
    assert_eq!(canvas.view().zoom, -120.0);
    assert_eq!((canvas.surface().width, canvas.surface().height), (1000, 700));
    assert_eq!((canvas.view().width, canvas.view().height), (1000, 700));
    assert_eq!(&canvas.store().coords(), canvas.controller().visible());
}
