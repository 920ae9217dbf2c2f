//! Value types shared by the parser, selector and history log.
//!
//! All types serialize to camelCase JSON so that parsed lists and history
//! records can be printed with `--json` and stored in the history file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Minimum number of items needed before a pick is offered.
pub const MIN_ITEMS_FOR_DECISION: usize = 2;

/// Reasons a parsed list cannot be decided on.
///
/// These are caller-facing validation failures; the parser itself never fails.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Parsing produced no items at all.
    #[error("no items found")]
    EmptyInput,

    /// Parsing produced fewer items than [`MIN_ITEMS_FOR_DECISION`].
    #[error("need at least one more item (found {found}, need {})", MIN_ITEMS_FOR_DECISION)]
    InsufficientItems { found: usize },
}

/// The result of parsing shared text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedList {
    /// Heading line that directly precedes a checklist, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Candidate items in original order. Never empty strings, always trimmed.
    pub items: Vec<String>,

    /// Whether the input was recognised as a checklist. Not serialized.
    #[serde(skip)]
    pub checklist: bool,
}

impl ParsedList {
    /// Number of candidate items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if parsing produced no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` if the input contained checkbox lines.
    #[must_use]
    pub fn is_checklist(&self) -> bool {
        self.checklist
    }

    /// Checks that the list has enough items to make a meaningful choice.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::EmptyInput`] when there are no items
    /// - [`ValidationError::InsufficientItems`] when there is only one
    ///
    /// # Examples
    ///
    /// ```
    /// use decider::parser::parse_list;
    /// use decider::types::ValidationError;
    ///
    /// assert_eq!(parse_list("").validate(), Err(ValidationError::EmptyInput));
    /// assert!(parse_list("Pizza\nSushi").validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.items.len() {
            0 => Err(ValidationError::EmptyInput),
            found if found < MIN_ITEMS_FOR_DECISION => {
                Err(ValidationError::InsufficientItems { found })
            }
            _ => Ok(()),
        }
    }
}

/// A recorded decision.
///
/// Immutable once created; the history log stores these most-recent-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    /// Unique record identifier.
    pub id: Uuid,

    /// When the decision was made.
    pub timestamp: DateTime<Utc>,

    /// The item that was picked.
    pub selected_item: String,

    /// How many items were in the list the pick was drawn from.
    pub total_items: usize,

    /// Title of the list, when one was detected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Decision {
    /// Creates a new decision stamped with a fresh id and the current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use decider::types::Decision;
    ///
    /// let decision = Decision::new("Sushi".to_string(), 3, None);
    /// assert_eq!(decision.selected_item, "Sushi");
    /// assert_eq!(decision.total_items, 3);
    /// ```
    #[must_use]
    pub fn new(selected_item: String, total_items: usize, title: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            selected_item,
            total_items,
            title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> ParsedList {
        ParsedList {
            title: None,
            items: items.iter().map(|s| (*s).to_string()).collect(),
            checklist: false,
        }
    }

    #[test]
    fn validate_empty_list_is_empty_input() {
        assert_eq!(list(&[]).validate(), Err(ValidationError::EmptyInput));
    }

    #[test]
    fn validate_single_item_is_insufficient() {
        assert_eq!(
            list(&["OnlyOneItem"]).validate(),
            Err(ValidationError::InsufficientItems { found: 1 })
        );
    }

    #[test]
    fn validate_two_items_is_ok() {
        assert!(list(&["A", "B"]).validate().is_ok());
    }

    #[test]
    fn validation_error_display() {
        assert_eq!(ValidationError::EmptyInput.to_string(), "no items found");
        assert_eq!(
            ValidationError::InsufficientItems { found: 1 }.to_string(),
            "need at least one more item (found 1, need 2)"
        );
    }

    #[test]
    fn decision_ids_are_unique() {
        let a = Decision::new("A".to_string(), 2, None);
        let b = Decision::new("A".to_string(), 2, None);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn decision_serializes_to_camel_case() {
        let decision = Decision::new("Bread".to_string(), 2, Some("Shopping".to_string()));
        let json = serde_json::to_value(&decision).unwrap();

        assert_eq!(json["selectedItem"], "Bread");
        assert_eq!(json["totalItems"], 2);
        assert_eq!(json["title"], "Shopping");
        assert!(json.get("selected_item").is_none());
    }

    #[test]
    fn decision_without_title_omits_field() {
        let decision = Decision::new("Pizza".to_string(), 3, None);
        let json = serde_json::to_value(&decision).unwrap();
        assert!(json.get("title").is_none());

        let back: Decision = serde_json::from_value(json).unwrap();
        assert_eq!(back.title, None);
    }

    #[test]
    fn parsed_list_json_omits_missing_title() {
        let json = serde_json::to_string(&list(&["A", "B"])).unwrap();
        assert_eq!(json, r#"{"items":["A","B"]}"#);
    }

    #[test]
    fn parsed_list_json_has_only_title_and_items() {
        let parsed = ParsedList {
            title: Some("Chores".to_string()),
            items: vec!["Laundry".to_string()],
            checklist: true,
        };
        let json = serde_json::to_value(&parsed).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "title": "Chores", "items": ["Laundry"] })
        );
    }
}
