// Example: viewport measurement, throttled resize delivery and scroll blocking against a
// detached surface, then a selection model.
use std::rc::Rc;

use ui_primitives::{
    BlockScrollStrategy, DetachedSurface, ManualScheduler, ScrollBlockArbiter, SelectionModel,
    SelectionOptions, SelectionState, SurfaceSignal, ViewportRuler,
};

fn main() {
    let scheduler = Rc::new(ManualScheduler::new());
    let ruler = ViewportRuler::new(Rc::new(DetachedSurface), scheduler.clone());

    // Without a rendering surface every read is zero and nothing is delivered.
    println!("rect={:?}", ruler.viewport_rect());
    let sub = ruler.add_change_listener(|s| println!("changed: {s:?}"), 20);
    ruler.handle_signal(SurfaceSignal::Resize);
    scheduler.advance_by(20);
    sub.unsubscribe();

    let mut block = BlockScrollStrategy::new(ruler.clone(), ScrollBlockArbiter::new());
    block.enable();
    println!("block enabled={}", block.is_enabled());

    let mut model = SelectionModel::new(
        SelectionOptions::new().with_on_change(|c| println!("selection: {c:?}")),
    );
    let mut state = SelectionState::new(true);
    model.select(&mut state, [1, 2, 3]);
    model.deselect(&mut state, [2, 9]);
    model.clear(&mut state);
}
