use std::rc::Rc;

use ui_primitives::{
    BlockScrollStrategy, ContentSize, ManualScheduler, ScrollBlockArbiter, ScrollPosition,
    SurfaceSignal, ViewportRuler, ViewportSize,
};
use ui_primitives_adapter::MemorySurface;

fn main() {
    // Example: a modal dialog freezing page scroll.
    //
    // An adapter would:
    // - create one arbiter per document and share it with every overlay
    // - forward resize/orientationchange events to the ruler
    // - enable the strategy on attach and disable it on detach
    let surface = Rc::new(MemorySurface::new(
        ViewportSize::new(1000.0, 660.0),
        ContentSize::new(1000.0, 8000.0),
    ));
    let scheduler = Rc::new(ManualScheduler::new());
    let ruler = ViewportRuler::new(surface.clone(), scheduler.clone());
    let arbiter = ScrollBlockArbiter::new();

    let r = ruler.clone();
    let _sub = ruler.add_default_change_listener(move |signal| {
        println!("{signal:?}: viewport={:?}", r.viewport_size());
    });

    surface.user_scroll_to(ScrollPosition::new(2400.0, 0.0));
    println!("before: {:?}", surface.snapshot());

    let mut dialog = BlockScrollStrategy::new(ruler.clone(), arbiter.clone());
    dialog.enable();
    println!("open:   {:?}", surface.snapshot());

    // The window is resized while the dialog is open.
    for h in [640.0, 620.0, 600.0] {
        surface.resize(ViewportSize::new(1000.0, h));
        ruler.handle_signal(SurfaceSignal::Resize);
        scheduler.advance_by(4);
    }
    scheduler.advance_by(50);

    dialog.disable();
    println!("closed: {:?}", surface.snapshot());
}
