//! Filter state: the user's active selections per registry field.

use std::collections::BTreeMap;

use sc_catalog::{FieldKind, FilterField};

/// Value held for one active filter field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    /// Ordered set of selected values (multi-select fields).
    Many(Vec<String>),
    /// Single value (free-text and date fields).
    One(String),
}

/// One removable value, as shown in the active-filter chip row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub field: FilterField,
    pub value: String,
}

/// Active filter selections.
///
/// Only non-empty entries are stored: a field that is absent imposes no
/// constraint. Multi-select values keep insertion order and never contain
/// duplicates or blank strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    entries: BTreeMap<FilterField, FilterValue>,
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style multi-value setter.
    pub fn with_values<I, S>(mut self, field: FilterField, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_values(field, values);
        self
    }

    /// Builder-style scalar setter.
    pub fn with_text(mut self, field: FilterField, text: impl Into<String>) -> Self {
        self.set_text(field, text);
        self
    }

    /// True when no field carries a constraint.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, field: FilterField) -> Option<&FilterValue> {
        self.entries.get(&field)
    }

    /// Selected values of a multi-select field; empty when inactive.
    pub fn selected(&self, field: FilterField) -> &[String] {
        match self.entries.get(&field) {
            Some(FilterValue::Many(values)) => values,
            _ => &[],
        }
    }

    /// Value of a scalar field.
    pub fn text(&self, field: FilterField) -> Option<&str> {
        match self.entries.get(&field) {
            Some(FilterValue::One(text)) => Some(text),
            _ => None,
        }
    }

    /// Active entries in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (FilterField, &FilterValue)> {
        self.entries.iter().map(|(field, value)| (*field, value))
    }

    /// Replace a field's selection. Blank and repeated values are dropped; an
    /// empty result clears the field. For scalar fields the first usable
    /// value is kept.
    pub fn set_values<I, S>(&mut self, field: FilterField, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for value in values {
            let value = value.into();
            if !is_blank(&value) && !unique.contains(&value) {
                unique.push(value);
            }
        }

        if field.kind() != FieldKind::MultiSelect {
            match unique.into_iter().next() {
                Some(text) => self.set_text(field, text),
                None => self.clear_field(field),
            }
            return;
        }

        if unique.is_empty() {
            self.entries.remove(&field);
        } else {
            self.entries.insert(field, FilterValue::Many(unique));
        }
    }

    /// Set a scalar field. A blank value clears it. On a multi-select field
    /// this selects exactly that one value.
    pub fn set_text(&mut self, field: FilterField, text: impl Into<String>) {
        let text = text.into();
        if field.kind() == FieldKind::MultiSelect {
            self.set_values(field, [text]);
        } else if is_blank(&text) {
            self.entries.remove(&field);
        } else {
            self.entries.insert(field, FilterValue::One(text));
        }
    }

    /// Checkbox toggle on a multi-select field. Returns whether the value is
    /// selected afterwards.
    pub fn toggle(&mut self, field: FilterField, value: &str) -> bool {
        let mut values = self.selected(field).to_vec();
        let selected = if let Some(pos) = values.iter().position(|v| v == value) {
            values.remove(pos);
            false
        } else {
            values.push(value.to_string());
            true
        };
        self.set_values(field, values);
        selected && self.selected(field).iter().any(|v| v == value)
    }

    /// Remove a single value (chip close). Clears scalar fields whose value
    /// matches.
    pub fn remove_value(&mut self, field: FilterField, value: &str) {
        match self.entries.get(&field) {
            Some(FilterValue::Many(values)) => {
                let remaining: Vec<String> =
                    values.iter().filter(|v| *v != value).cloned().collect();
                self.set_values(field, remaining);
            }
            Some(FilterValue::One(text)) if text == value => {
                self.entries.remove(&field);
            }
            _ => {}
        }
    }

    pub fn clear_field(&mut self, field: FilterField) {
        self.entries.remove(&field);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// New state with every entry of `update` overriding this state's entry
    /// for the same field. Fields absent from `update` keep their value.
    pub fn merge(&self, update: &FilterState) -> FilterState {
        let mut merged = self.clone();
        for (field, value) in &update.entries {
            merged.entries.insert(*field, value.clone());
        }
        merged
    }

    /// Flattened chips in registry order, values in selection order.
    pub fn chips(&self) -> Vec<FilterChip> {
        let mut chips = Vec::new();
        for (field, value) in &self.entries {
            match value {
                FilterValue::Many(values) => chips.extend(values.iter().map(|v| FilterChip {
                    field: *field,
                    value: v.clone(),
                })),
                FilterValue::One(text) => chips.push(FilterChip {
                    field: *field,
                    value: text.clone(),
                }),
            }
        }
        chips
    }
}
