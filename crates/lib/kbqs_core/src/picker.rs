//! Searchable single-choice picker (combobox).
//!
//! Selecting the already-selected option clears the selection, and every
//! selection closes the popover.

/// One choice, identified by `id` and matched on `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOption {
    pub id: String,
    pub name: String,
}

impl PickerOption {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Picker {
    options: Vec<PickerOption>,
    query: String,
    selected: Option<PickerOption>,
    open: bool,
}

impl Picker {
    /// Picker over `options`, optionally pre-selected by id.
    pub fn new(options: Vec<PickerOption>, selected_id: Option<&str>) -> Self {
        let selected = selected_id.and_then(|id| options.iter().find(|o| o.id == id).cloned());
        Self {
            options,
            query: String::new(),
            selected,
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
        if !open {
            self.query.clear();
        }
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// Options whose name contains the query, case-insensitively.
    pub fn visible(&self) -> Vec<&PickerOption> {
        let needle = self.query.to_lowercase();
        self.options
            .iter()
            .filter(|o| o.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Whether to show the "nothing found" placeholder.
    pub fn is_empty(&self) -> bool {
        self.visible().is_empty()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_ref().is_some_and(|s| s.id == id)
    }

    pub fn selected(&self) -> Option<&PickerOption> {
        self.selected.as_ref()
    }

    /// Toggle `id` and close. Unknown ids only close the picker.
    pub fn select(&mut self, id: &str) -> Option<&PickerOption> {
        if self.is_selected(id) {
            self.selected = None;
        } else if let Some(option) = self.options.iter().find(|o| o.id == id) {
            self.selected = Some(option.clone());
        }
        self.set_open(false);
        self.selected.as_ref()
    }
}
