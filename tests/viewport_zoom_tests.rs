use std::cell::{Cell, RefCell};
use std::rc::Rc;

use approx::assert_abs_diff_eq;
use scatter_viewport::api::{ViewportController, ViewportControllerConfig};
use scatter_viewport::core::{
    AffineTransform2D, DataBounds, DataExtent, DataPoint, ManualClock, Viewport,
};
use scatter_viewport::interaction::{TickOutcome, ViewportMode};
use scatter_viewport::render::NullRenderer;

fn wide_extent() -> DataExtent {
    DataExtent::from_ranges((0.0, 100.0), (0.0, 50.0)).expect("valid extent")
}

fn controller_with_data() -> (ViewportController<ManualClock>, ManualClock) {
    let clock = ManualClock::new(0.0);
    let config = ViewportControllerConfig::new(Viewport::new(800, 600));
    let mut controller =
        ViewportController::with_clock(config, clock.clone()).expect("controller init");
    controller.attach_dataset(Rc::new(wide_extent()));
    (controller, clock)
}

#[test]
fn identity_view_shows_whole_extent_with_vertical_padding() {
    let (controller, _) = controller_with_data();
    let bounds = controller.current_data_bounds().expect("bounds");

    assert_abs_diff_eq!(bounds.x.0, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(bounds.x.1, 100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(bounds.y.0, -12.5, epsilon = 1e-9);
    assert_abs_diff_eq!(bounds.y.1, 62.5, epsilon = 1e-9);
}

#[test]
fn zoom_to_point_centers_target_at_requested_scale() {
    let (mut controller, _) = controller_with_data();

    let transition = controller
        .zoom_to_point(2.0, 50.0, 25.0, 1_000.0)
        .expect("zoom transition");
    assert_eq!(transition.start, AffineTransform2D::identity());
    assert_abs_diff_eq!(transition.target.scale_factor(), 2.0);
    assert_abs_diff_eq!(transition.target.translate_x(), -400.0, epsilon = 1e-9);
    assert_abs_diff_eq!(transition.target.translate_y(), -300.0, epsilon = 1e-9);
    assert_eq!(controller.mode(), ViewportMode::Animating);
    assert_eq!(controller.transform(), AffineTransform2D::identity());

    controller.complete_transition().expect("transition in flight");
    assert_eq!(controller.mode(), ViewportMode::Idle);

    let bounds = controller.current_data_bounds().expect("bounds");
    assert_abs_diff_eq!(bounds.x.0, 25.0, epsilon = 1e-9);
    assert_abs_diff_eq!(bounds.x.1, 75.0, epsilon = 1e-9);

    let center = controller
        .data_to_pixel(DataPoint::new(50.0, 25.0))
        .expect("projected center");
    assert_abs_diff_eq!(center.x, 400.0, epsilon = 1e-9);
    assert_abs_diff_eq!(center.y, 300.0, epsilon = 1e-9);
}

#[test]
fn zoom_to_point_clamps_scale_factor() {
    let (mut controller, _) = controller_with_data();

    let deep = controller
        .zoom_to_point(1e9, 10.0, 10.0, 0.0)
        .expect("zoom transition");
    assert_eq!(deep.target.scale_factor(), 100_000.0);

    let wide = controller
        .zoom_to_point(0.01, 10.0, 10.0, 0.0)
        .expect("zoom transition");
    assert_abs_diff_eq!(wide.target.scale_factor(), 1.0 / 3.0);
}

#[test]
fn zoom_to_point_rejects_non_finite_input() {
    let (mut controller, _) = controller_with_data();
    assert!(controller.zoom_to_point(f64::NAN, 1.0, 1.0, 100.0).is_none());
    assert!(
        controller
            .zoom_to_point(2.0, f64::INFINITY, 1.0, 100.0)
            .is_none()
    );
    assert!(controller.active_transition().is_none());
}

#[test]
fn zoom_to_bounding_box_fills_ninety_percent_of_binding_axis() {
    let (mut controller, _) = controller_with_data();
    let corners = DataBounds {
        x: (20.0, 40.0),
        y: (10.0, 20.0),
    };

    let transition = controller
        .zoom_to_bounding_box(corners, 500.0)
        .expect("bbox transition");
    // 20 units = 160px of 800px wide, 10 units = 80px of 600px high.
    assert_abs_diff_eq!(transition.target.scale_factor(), 4.5, epsilon = 1e-9);

    controller.complete_transition();
    let x0 = controller.data_to_pixel(DataPoint::new(20.0, 10.0)).expect("corner");
    let x1 = controller.data_to_pixel(DataPoint::new(40.0, 20.0)).expect("corner");
    assert_abs_diff_eq!((x1.x - x0.x).abs(), 720.0, epsilon = 1e-6);
    assert_abs_diff_eq!((x0.x + x1.x) / 2.0, 400.0, epsilon = 1e-6);
    assert_abs_diff_eq!((x0.y + x1.y) / 2.0, 300.0, epsilon = 1e-6);
}

#[test]
fn degenerate_bounding_box_only_pans() {
    let (mut controller, _) = controller_with_data();
    controller.on_gesture_transform_changed(
        AffineTransform2D::new(3.0, 0.0, 0.0).expect("valid transform"),
    );

    let transition = controller
        .zoom_to_bounding_box(
            DataBounds {
                x: (30.0, 30.0),
                y: (5.0, 5.0),
            },
            0.0,
        )
        .expect("bbox transition");
    assert_eq!(transition.target.scale_factor(), 3.0);

    controller.complete_transition();
    let centered = controller
        .data_to_pixel(DataPoint::new(30.0, 5.0))
        .expect("projected point");
    assert_abs_diff_eq!(centered.x, 400.0, epsilon = 1e-9);
    assert_abs_diff_eq!(centered.y, 300.0, epsilon = 1e-9);
}

#[test]
fn zoom_requires_a_known_extent() {
    let clock = ManualClock::new(0.0);
    let config = ViewportControllerConfig::new(Viewport::new(800, 600));
    let mut controller =
        ViewportController::with_clock(config, clock).expect("controller init");

    assert!(controller.scales().is_none());
    assert!(controller.zoom_to_point(2.0, 1.0, 1.0, 10.0).is_none());
    assert!(
        controller
            .zoom_to_bounding_box(
                DataBounds {
                    x: (0.0, 1.0),
                    y: (0.0, 1.0),
                },
                10.0,
            )
            .is_none()
    );
    assert!(!controller.timer().is_active());
}

#[test]
fn late_extent_becomes_available_through_shared_cell() {
    let clock = ManualClock::new(0.0);
    let config = ViewportControllerConfig::new(Viewport::new(800, 600));
    let mut controller =
        ViewportController::with_clock(config, clock).expect("controller init");
    let extent = Rc::new(Cell::new(None::<DataExtent>));
    controller.attach_dataset(extent.clone());

    assert!(controller.has_dataset());
    assert!(controller.base_scales().is_none());

    extent.set(Some(wide_extent()));
    let base = controller.base_scales().expect("base scales");
    assert_abs_diff_eq!(base.y_buffer_px, 100.0, epsilon = 1e-9);

    extent.set(Some(
        DataExtent::from_ranges((0.0, 10.0), (0.0, 100.0)).expect("valid extent"),
    ));
    let rederived = controller.base_scales().expect("base scales");
    assert_eq!(rederived.y_buffer_px, 0.0);
    assert_abs_diff_eq!(rederived.x_buffer_px, 370.0, epsilon = 1e-9);
}

#[test]
fn resize_rederives_base_scales() {
    let (mut controller, _) = controller_with_data();
    let before = controller.base_scales().expect("base scales");

    controller
        .set_viewport(Viewport::new(400, 600))
        .expect("resize");
    let after = controller.base_scales().expect("base scales");
    assert_ne!(before, after);
    assert_eq!(after.x.range(), (0.0, 400.0));
    assert_abs_diff_eq!(after.y_buffer_px, 200.0, epsilon = 1e-9);

    assert!(controller.set_viewport(Viewport::new(0, 600)).is_err());
    assert_eq!(controller.viewport(), Viewport::new(400, 600));
}

#[test]
fn gesture_transform_is_clamped_and_extends_idle_loop() {
    let (mut controller, clock) = controller_with_data();
    clock.set(100.0);

    let changed = controller
        .on_gesture_transform_changed(AffineTransform2D::new(1e7, 5.0, 6.0).expect("valid"));
    assert!(changed);
    assert_eq!(controller.transform().scale_factor(), 100_000.0);
    assert_eq!(controller.transform().translate_x(), 5.0);
    assert_eq!(controller.timer().deadline_ms(), Some(10_100.0));
}

#[test]
fn transition_settles_on_the_expiring_tick() {
    let (mut controller, clock) = controller_with_data();
    let renderer = Rc::new(RefCell::new(NullRenderer::default()));
    controller
        .register_renderer("null", &renderer)
        .expect("register renderer");

    controller
        .zoom_to_point(2.0, 50.0, 25.0, 1_000.0)
        .expect("zoom transition");
    let handle = controller.timer().current_handle().expect("running timer");

    clock.set(500.0);
    assert_eq!(controller.tick(handle).expect("tick"), TickOutcome::Notify);
    assert_eq!(controller.mode(), ViewportMode::Animating);

    clock.set(1_000.0);
    assert_eq!(controller.tick(handle).expect("tick"), TickOutcome::Expired);
    assert_eq!(controller.mode(), ViewportMode::Idle);
    assert_abs_diff_eq!(controller.transform().scale_factor(), 2.0);

    let renderer = renderer.borrow();
    assert_eq!(renderer.render_count, 2);
    assert_eq!(renderer.forced_render_count, 1);
    let last = renderer.last_frame.expect("rendered frame");
    assert_eq!(last.transform, controller.transform());
}

#[test]
fn reset_zoom_returns_to_identity() {
    let (mut controller, _) = controller_with_data();
    let renderer = Rc::new(RefCell::new(NullRenderer::default()));
    controller
        .register_renderer("null", &renderer)
        .expect("register renderer");
    controller.zoom_to_point(8.0, 10.0, 10.0, 0.0);
    controller.complete_transition();

    let notified = controller.reset_zoom().expect("reset");
    assert_eq!(notified, 1);
    assert_eq!(controller.transform(), AffineTransform2D::identity());
    assert_eq!(renderer.borrow().forced_render_count, 1);
}

#[test]
fn cancel_transition_keeps_live_transform() {
    let (mut controller, _) = controller_with_data();
    controller.zoom_to_point(4.0, 10.0, 10.0, 2_000.0);

    let cancelled = controller.cancel_transition().expect("transition in flight");
    assert_abs_diff_eq!(cancelled.target.scale_factor(), 4.0);
    assert_eq!(controller.transform(), AffineTransform2D::identity());
    assert!(controller.active_transition().is_none());
}

#[test]
fn gesture_interrupts_in_flight_transition() {
    let (mut controller, clock) = controller_with_data();
    controller
        .zoom_to_point(4.0, 50.0, 25.0, 1_000.0)
        .expect("zoom transition");

    clock.set(500.0);
    let user = AffineTransform2D::new(1.5, 10.0, 10.0).expect("valid transform");
    assert!(controller.on_gesture_transform_changed(user));
    assert_eq!(controller.mode(), ViewportMode::Idle);
    assert!(controller.active_transition().is_none());

    clock.set(1_500.0);
    let handle = controller.timer().current_handle().expect("running timer");
    assert_eq!(controller.tick(handle).expect("tick"), TickOutcome::Notify);
    assert_eq!(controller.transform(), user);
}

#[test]
fn animator_steps_keep_transition_pending() {
    let (mut controller, clock) = controller_with_data();
    controller
        .zoom_to_point(2.0, 50.0, 25.0, 1_000.0)
        .expect("zoom transition");

    clock.set(500.0);
    let step = AffineTransform2D::new(1.5, -200.0, -150.0).expect("valid transform");
    assert!(controller.apply_transition_step(step));
    assert_eq!(controller.transform(), step);
    assert_eq!(controller.mode(), ViewportMode::Animating);

    clock.set(1_000.0);
    let handle = controller.timer().current_handle().expect("running timer");
    assert_eq!(controller.tick(handle).expect("tick"), TickOutcome::Notify);
    assert_eq!(controller.mode(), ViewportMode::Idle);
    assert_abs_diff_eq!(controller.transform().scale_factor(), 2.0);
    assert_abs_diff_eq!(controller.transform().translate_x(), -400.0, epsilon = 1e-9);
}

#[test]
fn single_point_far_from_origin_still_zooms() {
    let clock = ManualClock::new(0.0);
    let config = ViewportControllerConfig::new(Viewport::new(800, 600));
    let mut controller =
        ViewportController::with_clock(config, clock).expect("controller init");
    controller.attach_dataset(Rc::new(
        DataExtent::from_ranges((1.7e18, 1.7e18), (0.0, 10.0)).expect("valid extent"),
    ));

    assert!(controller.scales().is_some());
    assert!(controller.zoom_to_point(2.0, 1.7e18, 5.0, 0.0).is_some());
}
