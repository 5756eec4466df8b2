use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;

/// The caller-owned current value of a selectable group: nothing, a scalar, or a list.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionValue<T> {
    Empty,
    One(T),
    Many(Vec<T>),
}

impl<T> Default for SelectionValue<T> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<T> SelectionValue<T> {
    /// The value coerced to a sequence: `[]`, `[v]` or the list itself.
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::Empty => &[],
            Self::One(v) => core::slice::from_ref(v),
            Self::Many(values) => values,
        }
    }

    fn from_selected(mut selected: Vec<T>, multiple: bool) -> Self {
        if multiple {
            return Self::Many(selected);
        }
        match selected.len() {
            0 => Self::Empty,
            _ => Self::One(selected.swap_remove(0)),
        }
    }
}

/// Selection state: the current value plus the single/multiple mode.
///
/// The model never stores this; callers keep it and pass it to every [`SelectionModel`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionState<T> {
    pub value: SelectionValue<T>,
    pub multiple: bool,
}

impl<T> SelectionState<T> {
    pub fn new(multiple: bool) -> Self {
        Self {
            value: SelectionValue::Empty,
            multiple,
        }
    }

    pub fn with_value(value: SelectionValue<T>, multiple: bool) -> Self {
        Self { value, multiple }
    }

    pub fn selected(&self) -> &[T] {
        self.value.as_slice()
    }

    pub fn is_empty(&self) -> bool {
        self.selected().is_empty()
    }

    pub fn has_value(&self) -> bool {
        !self.is_empty()
    }

    pub fn is_multiple_selection(&self) -> bool {
        self.multiple
    }
}

impl<T: PartialEq> SelectionState<T> {
    pub fn is_selected(&self, value: &T) -> bool {
        self.selected().contains(value)
    }
}

/// Values added to and removed from a selection by one operation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionChange<T> {
    pub added: Vec<T>,
    pub removed: Vec<T>,
}

impl<T> Default for SelectionChange<T> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            removed: Vec::new(),
        }
    }
}

impl<T> SelectionChange<T> {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// A mutating selection operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionOp<T> {
    Select(Vec<T>),
    Deselect(Vec<T>),
    Toggle(T),
    Clear,
    /// Replaces the whole selection.
    SetSelection(Vec<T>),
}

/// Applies `op` to `state`, returning the next state and the net diff.
///
/// In single mode only the first value of a `Select`/`SetSelection` is considered. When the
/// diff is empty the returned state equals `state`.
pub fn reduce<T: Clone + PartialEq>(
    state: &SelectionState<T>,
    op: SelectionOp<T>,
) -> (SelectionState<T>, SelectionChange<T>) {
    let mut selected = state.selected().to_vec();
    let mut change = SelectionChange::default();

    match op {
        SelectionOp::Select(values) => {
            select_into(&mut selected, values, state.multiple, &mut change);
        }
        SelectionOp::Deselect(values) => deselect_from(&mut selected, values, &mut change),
        SelectionOp::Toggle(value) => {
            if selected.contains(&value) {
                deselect_from(&mut selected, vec![value], &mut change);
            } else {
                select_into(&mut selected, vec![value], state.multiple, &mut change);
            }
        }
        SelectionOp::Clear => change.removed = core::mem::take(&mut selected),
        SelectionOp::SetSelection(values) => {
            let mut next: Vec<T> = Vec::new();
            for value in values {
                if !next.contains(&value) {
                    next.push(value);
                }
                if !state.multiple {
                    break;
                }
            }
            change.removed = selected
                .iter()
                .filter(|v| !next.contains(v))
                .cloned()
                .collect();
            change.added = next
                .iter()
                .filter(|v| !selected.contains(v))
                .cloned()
                .collect();
            selected = next;
        }
    }

    if change.is_empty() {
        return (state.clone(), change);
    }
    let next = SelectionState {
        value: SelectionValue::from_selected(selected, state.multiple),
        multiple: state.multiple,
    };
    (next, change)
}

fn select_into<T: Clone + PartialEq>(
    selected: &mut Vec<T>,
    values: Vec<T>,
    multiple: bool,
    change: &mut SelectionChange<T>,
) {
    if !multiple {
        let Some(value) = values.into_iter().next() else {
            return;
        };
        if selected.len() == 1 && selected[0] == value {
            return;
        }
        let was_selected = selected.contains(&value);
        change
            .removed
            .extend(selected.drain(..).filter(|v| *v != value));
        selected.push(value.clone());
        if !was_selected {
            change.added.push(value);
        }
        return;
    }

    for value in values {
        if !selected.contains(&value) {
            selected.push(value.clone());
            change.added.push(value);
        }
    }
}

fn deselect_from<T: PartialEq>(
    selected: &mut Vec<T>,
    values: Vec<T>,
    change: &mut SelectionChange<T>,
) {
    for value in values {
        let before = selected.len();
        selected.retain(|v| *v != value);
        if selected.len() != before {
            change.removed.push(value);
        }
    }
}

/// A callback fired once per mutating call with a non-empty diff.
pub type OnSelectionChange<T> = Arc<dyn Fn(&SelectionChange<T>) + Send + Sync>;

/// Configuration for [`SelectionModel`].
pub struct SelectionOptions<T> {
    /// When `false`, mutations update the state silently.
    pub emit_changes: bool,
    pub on_change: Option<OnSelectionChange<T>>,
}

impl<T> Clone for SelectionOptions<T> {
    fn clone(&self) -> Self {
        Self {
            emit_changes: self.emit_changes,
            on_change: self.on_change.clone(),
        }
    }
}

impl<T> Default for SelectionOptions<T> {
    fn default() -> Self {
        Self {
            emit_changes: true,
            on_change: None,
        }
    }
}

impl<T> SelectionOptions<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_emit_changes(mut self, emit_changes: bool) -> Self {
        self.emit_changes = emit_changes;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: impl Fn(&SelectionChange<T>) + Send + Sync + 'static,
    ) -> Self {
        self.on_change = Some(Arc::new(on_change));
        self
    }
}

impl<T> fmt::Debug for SelectionOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionOptions")
            .field("emit_changes", &self.emit_changes)
            .field("on_change", &self.on_change.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Applies selection operations to a caller-owned [`SelectionState`] and reports one
/// consolidated [`SelectionChange`] per call.
///
/// The only state kept here is the pending-emission buffers, which are empty whenever a call
/// returns.
pub struct SelectionModel<T> {
    options: SelectionOptions<T>,
    selected_to_emit: Vec<T>,
    deselected_to_emit: Vec<T>,
}

impl<T> Default for SelectionModel<T> {
    fn default() -> Self {
        Self::new(SelectionOptions::default())
    }
}

impl<T> SelectionModel<T> {
    pub fn new(options: SelectionOptions<T>) -> Self {
        Self {
            options,
            selected_to_emit: Vec::new(),
            deselected_to_emit: Vec::new(),
        }
    }

    pub fn options(&self) -> &SelectionOptions<T> {
        &self.options
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&SelectionChange<T>) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    pub fn clear_on_change(&mut self) {
        self.options.on_change = None;
    }

    pub fn set_emit_changes(&mut self, emit_changes: bool) {
        self.options.emit_changes = emit_changes;
    }
}

impl<T: Clone + PartialEq> SelectionModel<T> {
    /// Selects `values`. In single mode only the first one is used and it replaces the current
    /// value. Returns whether the selection changed.
    pub fn select(
        &mut self,
        state: &mut SelectionState<T>,
        values: impl IntoIterator<Item = T>,
    ) -> bool {
        let values: Vec<T> = values.into_iter().collect();
        if !state.multiple && values.len() > 1 {
            pwarn!(
                ignored = values.len() - 1,
                "SelectionModel::select: single selection keeps only the first value"
            );
        }
        self.apply(state, SelectionOp::Select(values))
    }

    /// Deselects those of `values` that are currently selected.
    pub fn deselect(
        &mut self,
        state: &mut SelectionState<T>,
        values: impl IntoIterator<Item = T>,
    ) -> bool {
        self.apply(state, SelectionOp::Deselect(values.into_iter().collect()))
    }

    pub fn toggle(&mut self, state: &mut SelectionState<T>, value: T) -> bool {
        self.apply(state, SelectionOp::Toggle(value))
    }

    /// Deselects everything as one operation.
    pub fn clear(&mut self, state: &mut SelectionState<T>) -> bool {
        self.apply(state, SelectionOp::Clear)
    }

    pub fn set_selection(
        &mut self,
        state: &mut SelectionState<T>,
        values: impl IntoIterator<Item = T>,
    ) -> bool {
        self.apply(state, SelectionOp::SetSelection(values.into_iter().collect()))
    }

    /// Reorders a multiple selection in place. Ordering is not a change, so nothing is emitted.
    pub fn sort_by(&self, state: &mut SelectionState<T>, compare: impl FnMut(&T, &T) -> Ordering) {
        if let SelectionValue::Many(values) = &mut state.value {
            values.sort_by(compare);
        }
    }

    /// Runs `op` against `state`, writes the next state back and emits the diff.
    pub fn apply(&mut self, state: &mut SelectionState<T>, op: SelectionOp<T>) -> bool {
        let (next, change) = reduce(state, op);
        let changed = !change.is_empty();
        if changed {
            *state = next;
        }
        self.selected_to_emit.extend(change.added);
        self.deselected_to_emit.extend(change.removed);
        self.emit_pending();
        debug_assert!(self.selected_to_emit.is_empty() && self.deselected_to_emit.is_empty());
        changed
    }

    fn emit_pending(&mut self) {
        let change = SelectionChange {
            added: core::mem::take(&mut self.selected_to_emit),
            removed: core::mem::take(&mut self.deselected_to_emit),
        };
        if change.is_empty() || !self.options.emit_changes {
            return;
        }
        ptrace!(
            added = change.added.len(),
            removed = change.removed.len(),
            "SelectionModel: emit"
        );
        if let Some(on_change) = &self.options.on_change {
            on_change(&change);
        }
    }
}

impl<T> fmt::Debug for SelectionModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionModel")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
