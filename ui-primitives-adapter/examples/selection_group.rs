use ui_primitives::SelectionOptions;
use ui_primitives_adapter::SelectionController;

fn main() {
    // Example: a radio group and a checkbox list sharing the same selection semantics.
    let mut radio = SelectionController::new(
        false,
        SelectionOptions::new().with_on_change(|c| println!("radio: {c:?}")),
    );
    radio.select(["small"]);
    radio.select(["large", "medium"]); // only "large" is kept
    println!("radio value={:?}", radio.value());

    let mut checks = SelectionController::new(
        true,
        SelectionOptions::new().with_on_change(|c| println!("checks: {c:?}")),
    );
    checks.select(["a", "b", "c"]);
    checks.toggle("b");
    checks.deselect(["z"]); // not selected: no notification
    checks.clear();
}
