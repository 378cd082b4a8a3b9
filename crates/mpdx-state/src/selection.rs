//! Mass selection of list rows.

use std::collections::BTreeSet;

/// Tri-state of a "select all" checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Unchecked,
    Partial,
    Checked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Only(BTreeSet<String>),
    AllExcept(BTreeSet<String>),
}

/// Rows selected on a list page, by id.
///
/// Selecting all switches to an "all except" mode, so rows that are not
/// loaded yet count as selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MassSelection {
    mode: Mode,
}

impl Default for MassSelection {
    fn default() -> Self {
        Self {
            mode: Mode::Only(BTreeSet::new()),
        }
    }
}

impl MassSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        match &self.mode {
            Mode::Only(ids) => ids.contains(id),
            Mode::AllExcept(excluded) => !excluded.contains(id),
        }
    }

    /// Flips one row.
    pub fn toggle(&mut self, id: &str) {
        let ids = match &mut self.mode {
            Mode::Only(ids) | Mode::AllExcept(ids) => ids,
        };
        if !ids.remove(id) {
            ids.insert(id.to_string());
        }
    }

    /// Selects every id in `ids`.
    pub fn select_many<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match &mut self.mode {
            Mode::Only(selected) => selected.extend(ids.into_iter().map(Into::into)),
            Mode::AllExcept(excluded) => {
                for id in ids {
                    let id: String = id.into();
                    excluded.remove(&id);
                }
            }
        }
    }

    pub fn select_all(&mut self) {
        self.mode = Mode::AllExcept(BTreeSet::new());
    }

    pub fn deselect_all(&mut self) {
        self.mode = Mode::Only(BTreeSet::new());
    }

    /// Selects every row unless all `total` rows already are.
    pub fn toggle_select_all(&mut self, total: usize) {
        if self.state(total) == SelectionState::Checked {
            self.deselect_all();
        } else {
            self.select_all();
        }
    }

    pub fn is_all_except(&self) -> bool {
        matches!(self.mode, Mode::AllExcept(_))
    }

    /// Explicitly selected ids, outside "all except" mode.
    pub fn selected_ids(&self) -> Option<&BTreeSet<String>> {
        match &self.mode {
            Mode::Only(ids) => Some(ids),
            Mode::AllExcept(_) => None,
        }
    }

    /// Ids left out of an "all except" selection.
    pub fn excluded_ids(&self) -> Option<&BTreeSet<String>> {
        match &self.mode {
            Mode::AllExcept(ids) => Some(ids),
            Mode::Only(_) => None,
        }
    }

    /// Number of selected rows out of `total`.
    pub fn count(&self, total: usize) -> usize {
        match &self.mode {
            Mode::Only(ids) => ids.len().min(total),
            Mode::AllExcept(excluded) => total.saturating_sub(excluded.len()),
        }
    }

    pub fn state(&self, total: usize) -> SelectionState {
        match self.count(total) {
            0 => SelectionState::Unchecked,
            n if n >= total => SelectionState::Checked,
            _ => SelectionState::Partial,
        }
    }
}
