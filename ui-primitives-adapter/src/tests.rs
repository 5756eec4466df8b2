use crate::*;

use alloc::rc::Rc;
use alloc::vec;
use alloc::vec::Vec;
use std::sync::{Arc, Mutex};

use ui_primitives::{
    BlockScrollStrategy, ContentSize, ManualScheduler, ScrollBlockArbiter, ScrollPosition,
    SelectionChange, SelectionOptions, SelectionValue, StyleProperty, StyleTarget, Surface,
    SurfaceSignal, ViewportRuler, ViewportSize,
};

fn document() -> (Rc<MemorySurface>, ViewportRuler, Rc<ManualScheduler>) {
    let surface = Rc::new(MemorySurface::new(
        ViewportSize::new(1000.0, 660.0),
        ContentSize::new(4000.0, 5000.0),
    ));
    let scheduler = Rc::new(ManualScheduler::new());
    let ruler = ViewportRuler::new(surface.clone(), scheduler.clone());
    (surface, ruler, scheduler)
}

#[test]
fn block_restores_scroll_without_drift_or_animation() {
    let (surface, ruler, _) = document();
    surface.set_style(StyleTarget::Body, StyleProperty::ScrollBehavior, "smooth");
    assert!(surface.user_scroll_to(ScrollPosition::new(2000.0, 1500.0)));
    let before = surface.snapshot();

    let arbiter = ScrollBlockArbiter::new();
    let mut strategy = BlockScrollStrategy::new(ruler.clone(), arbiter);
    strategy.enable();
    assert!(surface.is_blocked());
    assert_eq!(ruler.viewport_scroll_position(), ScrollPosition::ORIGIN);
    assert!(!surface.user_scroll_to(ScrollPosition::new(10.0, 10.0)));
    assert_eq!(surface.snapshot().root_top, "-2000px");
    assert_eq!(surface.snapshot().root_left, "-1500px");

    strategy.disable();
    assert_eq!(surface.snapshot(), before);
    assert_eq!(surface.animated_scrolls(), 0);
    assert_eq!(
        surface.style(StyleTarget::Body, StyleProperty::ScrollBehavior),
        "smooth"
    );
    assert_eq!(
        ruler.viewport_rect(),
        ui_primitives::ViewportRect {
            top: 2000.0,
            left: 1500.0,
            bottom: 2660.0,
            right: 2500.0,
        }
    );
}

#[test]
fn nested_overlays_share_one_block() {
    let (surface, ruler, _) = document();
    surface.user_scroll_to(ScrollPosition::new(300.0, 0.0));
    let arbiter = ScrollBlockArbiter::new();

    let mut dialog = BlockScrollStrategy::new(ruler.clone(), arbiter.clone());
    let mut menu = BlockScrollStrategy::new(ruler, arbiter);
    dialog.enable();
    menu.enable();
    assert!(!menu.is_enabled());

    // Detach order is up to the caller.
    dialog.disable();
    menu.disable();
    assert!(!surface.is_blocked());
    assert_eq!(surface.scroll_position(), ScrollPosition::new(300.0, 0.0));
}

#[test]
fn block_survives_a_detached_document() {
    let (surface, ruler, _) = document();
    surface.user_scroll_to(ScrollPosition::new(300.0, 0.0));
    let arbiter = ScrollBlockArbiter::new();
    let mut strategy = BlockScrollStrategy::new(ruler.clone(), arbiter.clone());
    strategy.enable();

    surface.set_available(false);
    strategy.disable();
    assert!(strategy.is_enabled());
    assert!(arbiter.is_active());

    surface.set_available(true);
    assert!(surface.is_blocked());
    assert_eq!(surface.snapshot().root_top, "-300px");

    strategy.disable();
    assert!(!surface.is_blocked());
    assert!(!arbiter.is_active());
    assert_eq!(surface.snapshot().root_top, "");
    assert_eq!(surface.scroll_position(), ScrollPosition::new(300.0, 0.0));
}

#[test]
fn resize_burst_notifies_once() {
    let (surface, ruler, scheduler) = document();
    let sizes = Rc::new(core::cell::RefCell::new(Vec::new()));
    let s = Rc::clone(&sizes);
    let r = ruler.clone();
    let sub = ruler.add_default_change_listener(move |_| s.borrow_mut().push(r.viewport_size()));

    for w in [900.0, 800.0, 700.0] {
        surface.resize(ViewportSize::new(w, 660.0));
        ruler.handle_signal(SurfaceSignal::Resize);
        scheduler.advance_by(5);
    }
    scheduler.advance_by(100);
    assert_eq!(*sizes.borrow(), vec![ViewportSize::new(700.0, 660.0)]);

    sub.unsubscribe();
    ruler.handle_signal(SurfaceSignal::OrientationChange);
    scheduler.advance_by(100);
    assert_eq!(sizes.borrow().len(), 1);
}

#[test]
fn unavailable_surface_reads_zero() {
    let (surface, ruler, _) = document();
    surface.user_scroll_to(ScrollPosition::new(50.0, 0.0));
    surface.set_available(false);
    assert_eq!(ruler.viewport_size(), ViewportSize::ZERO);
    assert_eq!(ruler.viewport_scroll_position(), ScrollPosition::ORIGIN);
}

#[test]
fn memory_surface_clamps_scrolling() {
    let (surface, _, _) = document();
    surface.user_scroll_to(ScrollPosition::new(1e9, 1e9));
    assert_eq!(surface.scroll_position(), ScrollPosition::new(4340.0, 3000.0));

    surface.set_content_size(ContentSize::new(1000.0, 1000.0));
    assert_eq!(surface.scroll_position(), ScrollPosition::new(340.0, 0.0));
}

#[test]
fn controller_owns_its_value() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let mut c = SelectionController::new(
        false,
        SelectionOptions::new().with_on_change(move |change: &SelectionChange<&'static str>| {
            sink.lock().unwrap().push(change.clone());
        }),
    );

    c.select(["a", "b"]);
    c.select(["b"]);
    assert_eq!(c.value(), &SelectionValue::One("b"));
    assert!(c.is_selected(&"b"));
    assert!(!c.deselect(["a"]));
    c.clear();
    assert!(c.is_empty());

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 3);
    assert_eq!(log[1].added, vec!["b"]);
    assert_eq!(log[1].removed, vec!["a"]);
    assert_eq!(log[2].removed, vec!["b"]);
}

#[test]
fn controller_multiple_toggle_and_reset() {
    let mut c = SelectionController::<u8>::multiple();
    c.toggle(1);
    c.toggle(2);
    c.toggle(1);
    assert_eq!(c.selected(), &[2]);
    assert!(c.has_value());

    c.set_value(SelectionValue::Many(vec![7, 8]));
    assert!(c.set_selection([8, 9]));
    assert_eq!(c.selected(), &[8, 9]);

    let (_, state) = c.into_parts();
    assert!(state.is_multiple_selection());
}
