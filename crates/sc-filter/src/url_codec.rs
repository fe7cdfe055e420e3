//! Query-string codec for [`FilterState`] and the location sync pipeline.
//!
//! Multi-select fields are written as one comma-separated parameter
//! (`campaignId=alpha,beta`); scalar fields are written as-is. Values are
//! form-urlencoded, the separating commas are not.

use sc_catalog::dates::parse_date;
use sc_catalog::{FieldKind, FilterField};

use crate::state::{FilterState, FilterValue};

fn escape(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Encode the active fields in registry order. An empty state encodes to an
/// empty string.
///
/// A comma inside a multi-select value is escaped as `%2C`, but decoding
/// splits on the unescaped value, so `"A,B"` comes back as two values.
pub fn encode(filters: &FilterState) -> String {
    let mut params: Vec<String> = Vec::new();
    for (field, value) in filters.iter() {
        let encoded = match value {
            FilterValue::Many(values) => values
                .iter()
                .map(|v| escape(v))
                .collect::<Vec<_>>()
                .join(","),
            FilterValue::One(text) => escape(text),
        };
        if !encoded.is_empty() {
            params.push(format!("{}={}", field.key(), encoded));
        }
    }
    params.join("&")
}

/// Decode the recognized fields present in `query` into a partial state.
///
/// Unknown keys are ignored. A recognized key with an empty value, or a date
/// field that does not parse, is treated as absent. For repeated keys the
/// first occurrence wins.
pub fn decode(query: &str) -> FilterState {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut decoded = FilterState::new();
    let mut seen: Vec<FilterField> = Vec::new();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let Some(field) = FilterField::from_key(&key) else {
            tracing::debug!(key = %key, "ignoring unrecognized query parameter");
            continue;
        };
        if seen.contains(&field) {
            continue;
        }
        seen.push(field);

        match field.kind() {
            FieldKind::MultiSelect => decoded.set_values(field, value.split(',')),
            FieldKind::Text => decoded.set_text(field, value.into_owned()),
            FieldKind::Date => {
                if parse_date(&value).is_some() {
                    decoded.set_text(field, value.into_owned());
                }
            }
        }
    }
    decoded
}

/// Merge the fields carried by `query` into `current`.
pub fn decode_merge(current: &FilterState, query: &str) -> FilterState {
    current.merge(&decode(query))
}

/// Replace-style navigation to a new query string. Sync never asks for a
/// new history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub query: String,
}

impl Navigation {
    /// `path?query`, or just `path` for an empty query.
    pub fn location(&self, path: &str) -> String {
        if self.query.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, self.query)
        }
    }
}

/// Result of applying a location change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncStep {
    pub state: FilterState,
    pub navigation: Option<Navigation>,
}

/// Two-way sync between filter state and the address bar.
///
/// Tracks the last query written or observed so a state change caused by
/// decoding does not bounce back as another navigation.
#[derive(Debug, Clone, Default)]
pub struct UrlSync {
    last_query: Option<String>,
}

impl UrlSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    /// Decode, merge, and re-encode after the location changed. A replace
    /// navigation is returned only when the canonical query differs from the
    /// one in the address bar.
    pub fn on_location(&mut self, current: &FilterState, query: &str) -> SyncStep {
        let incoming = query.strip_prefix('?').unwrap_or(query);
        let state = decode_merge(current, incoming);
        let canonical = encode(&state);

        let navigation = (canonical != incoming).then(|| Navigation {
            query: canonical.clone(),
        });
        self.last_query = Some(canonical);
        SyncStep { state, navigation }
    }

    /// Re-encode after the user edited the state. Returns a replace
    /// navigation only when the encoding changed since the last sync.
    pub fn on_state(&mut self, state: &FilterState) -> Option<Navigation> {
        let canonical = encode(state);
        if self.last_query.as_deref() == Some(canonical.as_str()) {
            return None;
        }
        self.last_query = Some(canonical.clone());
        Some(Navigation { query: canonical })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_state_encodes_to_empty_query() {
        assert_eq!(encode(&FilterState::new()), "");
        assert!(decode("").is_empty());
        assert!(decode("?").is_empty());
    }

    #[test]
    fn multi_select_is_comma_joined_in_registry_order() {
        let filters = FilterState::new()
            .with_values(FilterField::Status, ["completed"])
            .with_values(FilterField::CampaignId, ["alpha", "beta"]);
        assert_eq!(encode(&filters), "campaignId=alpha,beta&status=completed");
    }

    #[test]
    fn values_are_escaped() {
        let filters = FilterState::new()
            .with_values(FilterField::GridName, ["ne30 pg2", "a&b"])
            .with_text(FilterField::Search, "x=y");
        let query = encode(&filters);
        assert_eq!(query, "gridName=ne30+pg2,a%26b&search=x%3Dy");
        assert_eq!(decode(&query), filters);
    }

    #[test]
    fn decode_ignores_unknown_and_malformed() {
        let decoded = decode("?campaignId=X,,Y,X&bogus=1&status=&startAfter=&startBefore=soon");
        assert_eq!(decoded.selected(FilterField::CampaignId), ["X", "Y"]);
        assert!(decoded.get(FilterField::Status).is_none());
        assert!(decoded.get(FilterField::StartAfter).is_none());
        assert!(decoded.get(FilterField::StartBefore).is_none());
        assert_eq!(decoded.len(), 1);
    }

    #[test]
    fn decode_accepts_escaped_separator() {
        let decoded = decode("machineId=m1%2Cm2");
        assert_eq!(decoded.selected(FilterField::MachineId), ["m1", "m2"]);
    }

    #[test]
    fn comma_inside_a_value_splits_on_decode() {
        let filters = FilterState::new().with_values(FilterField::Compset, ["A,B"]);
        let query = encode(&filters);
        assert_eq!(query, "compset=A%2CB");
        assert_eq!(decode(&query).selected(FilterField::Compset), ["A", "B"]);
    }

    #[test]
    fn first_occurrence_wins() {
        let decoded = decode("compset=A&compset=B");
        assert_eq!(decoded.selected(FilterField::Compset), ["A"]);
    }

    #[test]
    fn decode_merges_into_existing_state() {
        let current = FilterState::new()
            .with_values(FilterField::Status, ["running"])
            .with_values(FilterField::CampaignId, ["old"]);
        let merged = decode_merge(&current, "campaignId=X");
        assert_eq!(merged.selected(FilterField::CampaignId), ["X"]);
        assert_eq!(merged.selected(FilterField::Status), ["running"]);
    }

    #[test]
    fn location_sync_settles_after_one_replace() {
        let mut sync = UrlSync::new();
        let current = FilterState::new().with_values(FilterField::Status, ["running"]);

        let step = sync.on_location(&current, "?campaignId=X");
        assert_eq!(
            step.navigation,
            Some(Navigation {
                query: "campaignId=X&status=running".to_string()
            })
        );

        let replayed = sync.on_location(&step.state, "campaignId=X&status=running");
        assert_eq!(replayed.navigation, None);
        assert_eq!(replayed.state, step.state);
        assert_eq!(sync.on_state(&replayed.state), None);
    }

    #[test]
    fn state_edits_emit_only_when_encoding_changes() {
        let mut sync = UrlSync::new();
        let mut state = FilterState::new();

        assert_eq!(
            sync.on_state(&state),
            Some(Navigation {
                query: String::new()
            })
        );
        assert_eq!(sync.on_state(&state), None);

        state.toggle(FilterField::Compiler, "gnu");
        let nav = sync.on_state(&state).expect("edit should navigate");
        assert_eq!(nav.location("/browse"), "/browse?compiler=gnu");
        assert_eq!(sync.on_state(&state), None);
        assert_eq!(sync.last_query(), Some("compiler=gnu"));
    }
}
