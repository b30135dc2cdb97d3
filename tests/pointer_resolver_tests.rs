use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_abs_diff_eq;
use scatter_viewport::api::{LabelFormat, ViewportController, ViewportControllerConfig};
use scatter_viewport::core::{DataExtent, DataPoint, DataRecord, ManualClock, Viewport};
use scatter_viewport::interaction::PointerResolution;
use scatter_viewport::render::PointCloudRenderer;

fn records() -> Vec<DataRecord> {
    vec![
        DataRecord::new()
            .with_field("x", 50.0)
            .with_field("y", 25.0)
            .with_field("name", "alpha")
            .with_field("genre_dict_index", 3),
        DataRecord::new()
            .with_field("x", 10.0)
            .with_field("y", 10.0)
            .with_field("name", "beta"),
    ]
}

fn setup(
    config: ViewportControllerConfig,
) -> (
    ViewportController<ManualClock>,
    ManualClock,
    Rc<RefCell<PointCloudRenderer>>,
) {
    let clock = ManualClock::new(0.0);
    let mut controller =
        ViewportController::with_clock(config, clock.clone()).expect("controller init");
    controller.attach_dataset(Rc::new(
        DataExtent::from_ranges((0.0, 100.0), (0.0, 50.0)).expect("valid extent"),
    ));
    let renderer = Rc::new(RefCell::new(PointCloudRenderer::new(records())));
    controller
        .register_renderer("points", &renderer)
        .expect("register renderer");
    (controller, clock, renderer)
}

fn default_config() -> ViewportControllerConfig {
    ViewportControllerConfig::new(Viewport::new(800, 600))
}

#[test]
fn pointer_over_point_produces_offset_annotation() {
    let (mut controller, _, _renderer) = setup(default_config());

    let PointerResolution::Annotated(annotation) = controller.pointer_move(402.0, 298.0) else {
        panic!("expected an annotation");
    };
    assert_eq!(annotation.record.get("name"), Some(&"alpha".into()));
    assert_eq!(annotation.label_position(), DataPoint::new(402.0, 328.0));

    let anchor = annotation.anchor.expect("anchor");
    assert_abs_diff_eq!(anchor.x, 400.0, epsilon = 1e-9);
    assert_abs_diff_eq!(anchor.y, 300.0, epsilon = 1e-9);
    assert_eq!(controller.annotations().len(), 1);
    assert_eq!(controller.annotation_labels(), vec!["name: alpha".to_owned()]);
}

#[test]
fn rapid_moves_inside_debounce_window_are_dropped() {
    let (mut controller, clock, _renderer) = setup(default_config());

    let mut resolved = 0;
    for step in 0..10 {
        clock.set(f64::from(step) * 5.0);
        if controller.pointer_move(400.0, 300.0) != PointerResolution::Dropped {
            resolved += 1;
        }
    }
    // Accepted at 0ms and 35ms; everything else is inside 33.3ms of those.
    assert_eq!(resolved, 2);
}

#[test]
fn dropped_move_keeps_previous_annotation() {
    let (mut controller, clock, _renderer) = setup(default_config());
    controller.pointer_move(400.0, 300.0);
    clock.set(10.0);

    assert_eq!(controller.pointer_move(0.0, 0.0), PointerResolution::Dropped);
    assert_eq!(controller.annotations().len(), 1);
}

#[test]
fn empty_space_clears_annotation() {
    let (mut controller, clock, _renderer) = setup(default_config());
    controller.pointer_move(400.0, 300.0);
    clock.set(100.0);

    assert_eq!(controller.pointer_move(700.0, 50.0), PointerResolution::Cleared);
    assert!(controller.annotations().is_empty());
}

#[test]
fn pointer_leave_clears_and_restarts_debounce() {
    let (mut controller, clock, _renderer) = setup(default_config());
    controller.pointer_move(400.0, 300.0);
    controller.pointer_leave();
    assert!(controller.annotations().is_empty());

    clock.set(1.0);
    assert!(matches!(
        controller.pointer_move(400.0, 300.0),
        PointerResolution::Annotated(_)
    ));
}

#[test]
fn pointer_without_pick_renderer_clears() {
    let config = default_config().with_pick_renderer_key("missing");
    let (mut controller, _, _renderer) = setup(config);
    assert_eq!(controller.pointer_move(400.0, 300.0), PointerResolution::Cleared);
}

#[test]
fn click_forwards_annotated_record_to_renderer() {
    let (mut controller, clock, renderer) = setup(default_config());
    assert!(!controller.click_annotation());

    controller.pointer_move(400.0, 300.0);
    assert!(controller.click_annotation());
    let clicked = renderer.borrow().clicked().to_vec();
    assert_eq!(clicked.len(), 1);
    assert_eq!(clicked[0].number("x"), Some(50.0));

    clock.set(100.0);
    controller.pointer_move(700.0, 50.0);
    assert!(!controller.click_annotation());
}

#[test]
fn picks_follow_the_live_zoom() {
    let (mut controller, clock, _renderer) = setup(default_config());
    controller.zoom_to_point(2.0, 10.0, 10.0, 0.0);
    controller.complete_transition();
    controller.redraw().expect("redraw");

    let PointerResolution::Annotated(annotation) = controller.pointer_move(400.0, 300.0) else {
        panic!("expected an annotation");
    };
    assert_eq!(annotation.record.get("name"), Some(&"beta".into()));

    clock.set(100.0);
    controller.pointer_leave();
    let offscreen = controller.pointer_move(800.0, 300.0);
    assert_eq!(offscreen, PointerResolution::Cleared);
}

#[test]
fn configured_label_fields_and_html_format_apply() {
    let config = default_config()
        .with_label_fields(["name", "x"])
        .with_label_format(LabelFormat::Html);
    let (mut controller, _, _renderer) = setup(config);
    controller.pointer_move(400.0, 300.0);

    assert_eq!(
        controller.annotation_labels(),
        vec!["<strong>x</strong>: 50.0<br /><strong>name</strong>: alpha<br />".to_owned()]
    );
}

#[test]
fn custom_annotation_offset_is_applied() {
    let config = default_config().with_annotation_offset(12.0, -4.0);
    let (mut controller, _, _renderer) = setup(config);

    let PointerResolution::Annotated(annotation) = controller.pointer_move(400.0, 300.0) else {
        panic!("expected an annotation");
    };
    assert_eq!(annotation.label_position(), DataPoint::new(412.0, 296.0));
}
