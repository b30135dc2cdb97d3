use std::cell::RefCell;
use std::rc::Rc;

use scatter_viewport::api::{ViewportController, ViewportControllerConfig};
use scatter_viewport::core::{DataExtent, ManualClock, Viewport};
use scatter_viewport::render::{NullRenderer, ViewFrame, ViewportRenderer};
use scatter_viewport::{ViewError, ViewResult};

struct FailingRenderer;

impl ViewportRenderer for FailingRenderer {
    fn render(&mut self, _frame: &ViewFrame) -> ViewResult<()> {
        Err(ViewError::InvalidData("gpu device lost".to_owned()))
    }
}

fn controller() -> (ViewportController<ManualClock>, ManualClock) {
    let clock = ManualClock::new(0.0);
    let config = ViewportControllerConfig::new(Viewport::new(640, 480));
    let mut controller =
        ViewportController::with_clock(config, clock.clone()).expect("controller init");
    controller.attach_dataset(Rc::new(
        DataExtent::from_ranges((-1.0, 1.0), (-1.0, 1.0)).expect("valid extent"),
    ));
    (controller, clock)
}

#[test]
fn register_binds_and_initializes_renderer() {
    let (mut controller, _) = controller();
    let renderer = Rc::new(RefCell::new(NullRenderer::default()));

    let replaced = controller
        .register_renderer("points", &renderer)
        .expect("register renderer");
    assert!(!replaced);

    let renderer = renderer.borrow();
    let binding = renderer.binding.as_ref().expect("bound");
    assert_eq!(binding.key, "points");
    assert_eq!(binding.viewport, Viewport::new(640, 480));
    assert!(renderer.initialized);
    assert_eq!(renderer.render_count, 0);
}

#[test]
fn registering_same_key_replaces_previous_renderer() {
    let (mut controller, _) = controller();
    let first = Rc::new(RefCell::new(NullRenderer::default()));
    let second = Rc::new(RefCell::new(NullRenderer::default()));

    controller
        .register_renderer("points", &first)
        .expect("register renderer");
    let replaced = controller
        .register_renderer("points", &second)
        .expect("register renderer");
    assert!(replaced);
    assert_eq!(controller.renderer_count(), 1);

    controller.redraw().expect("redraw");
    assert_eq!(first.borrow().render_count, 0);
    assert_eq!(second.borrow().render_count, 1);
}

#[test]
fn renderers_are_notified_in_registration_order() {
    let (mut controller, _) = controller();
    let a = Rc::new(RefCell::new(NullRenderer::default()));
    let b = Rc::new(RefCell::new(NullRenderer::default()));
    controller.register_renderer("b", &b).expect("register");
    controller.register_renderer("a", &a).expect("register");

    assert_eq!(controller.renderer_keys(), vec!["b".to_owned(), "a".to_owned()]);
    assert_eq!(controller.redraw().expect("redraw"), 2);
}

#[test]
fn unregister_removes_renderer() {
    let (mut controller, _) = controller();
    let renderer = Rc::new(RefCell::new(NullRenderer::default()));
    controller
        .register_renderer("points", &renderer)
        .expect("register renderer");

    assert!(controller.unregister_renderer("points"));
    assert!(!controller.unregister_renderer("points"));
    assert!(!controller.has_renderer("points"));
    assert_eq!(controller.redraw().expect("redraw"), 0);
    assert_eq!(renderer.borrow().render_count, 0);
}

#[test]
fn dropped_renderer_is_forgotten() {
    let (mut controller, _) = controller();
    let kept = Rc::new(RefCell::new(NullRenderer::default()));
    {
        let dropped = Rc::new(RefCell::new(NullRenderer::default()));
        controller
            .register_renderer("dropped", &dropped)
            .expect("register renderer");
    }
    controller
        .register_renderer("kept", &kept)
        .expect("register renderer");

    assert!(!controller.has_renderer("dropped"));
    assert_eq!(controller.renderer_count(), 1);
    assert_eq!(controller.redraw().expect("redraw"), 1);
    assert_eq!(controller.renderer_keys(), vec!["kept".to_owned()]);
}

#[test]
fn empty_key_is_rejected() {
    let (mut controller, _) = controller();
    let renderer = Rc::new(RefCell::new(NullRenderer::default()));
    let err = controller
        .register_renderer("", &renderer)
        .expect_err("empty key must fail");
    assert!(matches!(err, ViewError::InvalidData(_)));
    assert!(!renderer.borrow().initialized);
}

#[test]
fn failing_renderer_stops_idle_loop() {
    let (mut controller, _) = controller();
    let renderer = Rc::new(RefCell::new(FailingRenderer));
    controller
        .register_renderer("gpu", &renderer)
        .expect("register renderer");

    let handle = controller.restart_timer(1_000.0);
    let err = controller.tick(handle).expect_err("render failure");
    match err {
        ViewError::RendererFailed { key, reason } => {
            assert_eq!(key, "gpu");
            assert!(reason.contains("gpu device lost"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!controller.timer().is_active());
}

#[test]
fn busy_renderer_is_skipped_for_the_tick() {
    let (mut controller, _) = controller();
    let busy = Rc::new(RefCell::new(NullRenderer::default()));
    let free = Rc::new(RefCell::new(NullRenderer::default()));
    controller.register_renderer("busy", &busy).expect("register");
    controller.register_renderer("free", &free).expect("register");

    let guard = busy.borrow_mut();
    let notified = controller.redraw().expect("redraw");
    drop(guard);

    assert_eq!(notified, 1);
    assert_eq!(busy.borrow().render_count, 0);
    assert_eq!(free.borrow().render_count, 1);
}

#[test]
fn frames_carry_scales_once_extent_is_known() {
    let (mut controller, _) = controller();
    let renderer = Rc::new(RefCell::new(NullRenderer::default()));
    controller
        .register_renderer("points", &renderer)
        .expect("register renderer");
    controller.redraw().expect("redraw");

    let frame = renderer.borrow().last_frame.expect("rendered frame");
    assert!(frame.forced);
    assert!(frame.scales.is_some());
    assert_eq!(frame.window_matrix, controller.window_matrix());
}
