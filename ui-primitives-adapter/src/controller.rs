use ui_primitives::{
    SelectionChange, SelectionModel, SelectionOptions, SelectionState, SelectionValue,
};

/// A selection that owns its value.
///
/// [`SelectionModel`] leaves the current value to the caller (a form control, a store). When
/// there is no such owner, this controller keeps the [`SelectionState`] next to the model and
/// exposes the model's operations without the extra argument.
#[derive(Debug)]
pub struct SelectionController<T> {
    model: SelectionModel<T>,
    state: SelectionState<T>,
}

impl<T: Clone + PartialEq> SelectionController<T> {
    pub fn new(multiple: bool, options: SelectionOptions<T>) -> Self {
        Self {
            model: SelectionModel::new(options),
            state: SelectionState::new(multiple),
        }
    }

    pub fn single() -> Self {
        Self::new(false, SelectionOptions::default())
    }

    pub fn multiple() -> Self {
        Self::new(true, SelectionOptions::default())
    }

    pub fn from_parts(model: SelectionModel<T>, state: SelectionState<T>) -> Self {
        Self { model, state }
    }

    pub fn into_parts(self) -> (SelectionModel<T>, SelectionState<T>) {
        (self.model, self.state)
    }

    pub fn model_mut(&mut self) -> &mut SelectionModel<T> {
        &mut self.model
    }

    pub fn state(&self) -> &SelectionState<T> {
        &self.state
    }

    pub fn value(&self) -> &SelectionValue<T> {
        &self.state.value
    }

    /// Replaces the value from outside (e.g. a form reset), without emitting.
    pub fn set_value(&mut self, value: SelectionValue<T>) {
        self.state.value = value;
    }

    pub fn on_change(
        &mut self,
        on_change: impl Fn(&SelectionChange<T>) + Send + Sync + 'static,
    ) {
        self.model.set_on_change(Some(on_change));
    }

    pub fn selected(&self) -> &[T] {
        self.state.selected()
    }

    pub fn is_selected(&self, value: &T) -> bool {
        self.state.is_selected(value)
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    pub fn has_value(&self) -> bool {
        self.state.has_value()
    }

    pub fn select(&mut self, values: impl IntoIterator<Item = T>) -> bool {
        self.model.select(&mut self.state, values)
    }

    pub fn deselect(&mut self, values: impl IntoIterator<Item = T>) -> bool {
        self.model.deselect(&mut self.state, values)
    }

    pub fn toggle(&mut self, value: T) -> bool {
        self.model.toggle(&mut self.state, value)
    }

    pub fn clear(&mut self) -> bool {
        self.model.clear(&mut self.state)
    }

    pub fn set_selection(&mut self, values: impl IntoIterator<Item = T>) -> bool {
        self.model.set_selection(&mut self.state, values)
    }
}
