//! Flash messages: one-time notices carried in the session until read.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    /// Something went wrong (failed login, missing listing).
    Error,
    /// An action succeeded.
    Success,
}

impl FlashCategory {
    /// Lowercase name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Success => "success",
        }
    }
}

impl fmt::Display for FlashCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pending flash messages, ordered per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlashMessages(BTreeMap<FlashCategory, Vec<String>>);

impl FlashMessages {
    /// Append a message to a category.
    pub fn push(&mut self, category: FlashCategory, text: impl Into<String>) {
        self.0.entry(category).or_default().push(text.into());
    }

    /// Remove and return all messages of a category, oldest first.
    pub fn drain(&mut self, category: FlashCategory) -> Vec<String> {
        self.0.remove(&category).unwrap_or_default()
    }

    /// Whether no message is pending in any category.
    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_accumulates_in_order() {
        let mut flash = FlashMessages::default();
        flash.push(FlashCategory::Success, "first");
        flash.push(FlashCategory::Success, "second");
        flash.push(FlashCategory::Error, "oops");

        assert_eq!(flash.drain(FlashCategory::Success), vec!["first", "second"]);
        assert!(flash.drain(FlashCategory::Success).is_empty());
        assert!(!flash.is_empty());
        assert_eq!(flash.drain(FlashCategory::Error), vec!["oops"]);
        assert!(flash.is_empty());
    }

    #[test]
    fn test_serialized_with_category_keys() {
        let mut flash = FlashMessages::default();
        flash.push(FlashCategory::Error, "bad");
        let json = serde_json::to_value(&flash).unwrap();
        assert_eq!(json, serde_json::json!({ "error": ["bad"] }));
    }
}
