//! Identifiers and validated values.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

/// Unique, URL-addressable identity of a to-do list.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct ListId(pub Uuid);

impl ListId {
    /// Mints a new random `ListId`.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the canonical URL path of the list.
    #[must_use]
    pub fn url(&self) -> String {
        format!("/lists/{self}/")
    }
}

impl Default for ListId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ListId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for ListId {
    type Err = Error;

    /// Accepts only the hyphenated lower-case form produced by `Display`,
    /// so each list has exactly one URL.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidListId {
            value: s.to_string(),
        };
        let id = Uuid::parse_str(s).map(Self).map_err(|_| invalid())?;
        if id.to_string() != s {
            return Err(invalid());
        }
        Ok(id)
    }
}

/// Text of a to-do item that is known not to be blank.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize)]
pub struct ItemText(String);

impl ItemText {
    /// Validates item text.
    ///
    /// The text is kept verbatim; only its blankness is checked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyItem`] if the text is empty or whitespace only.
    pub fn new(text: impl Into<String>) -> Result<Self, Error> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(Error::EmptyItem);
        }
        Ok(Self(text))
    }

    /// Returns the text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the value, returning the text.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for ItemText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_id_round_trips_through_display() {
        let id = ListId::new();
        let parsed: ListId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_list_id_url() {
        let id: ListId = "67e55044-10b1-426f-9247-bb680e5fe0c8".parse().unwrap();
        assert_eq!(id.url(), "/lists/67e55044-10b1-426f-9247-bb680e5fe0c8/");
    }

    #[test]
    fn test_list_id_rejects_garbage() {
        let err = "not-a-list".parse::<ListId>().unwrap_err();
        assert!(matches!(err, Error::InvalidListId { .. }));
    }

    #[test]
    fn test_list_id_rejects_alternate_uuid_spellings() {
        let canonical = "67e55044-10b1-426f-9247-bb680e5fe0c8";
        assert!(canonical.parse::<ListId>().is_ok());

        for alias in [
            "67e5504410b1426f9247bb680e5fe0c8",
            "{67e55044-10b1-426f-9247-bb680e5fe0c8}",
            "urn:uuid:67e55044-10b1-426f-9247-bb680e5fe0c8",
            "67E55044-10B1-426F-9247-BB680E5FE0C8",
        ] {
            let err = alias.parse::<ListId>().unwrap_err();
            assert!(matches!(err, Error::InvalidListId { .. }), "{alias}");
        }
    }

    #[test]
    fn test_new_list_ids_are_distinct() {
        assert_ne!(ListId::new(), ListId::new());
    }

    #[test]
    fn test_item_text_validation() {
        assert!(matches!(ItemText::new(""), Err(Error::EmptyItem)));
        assert!(matches!(ItemText::new("  \t\n"), Err(Error::EmptyItem)));

        let text = ItemText::new("  우유 사기 ").unwrap();
        assert_eq!(text.as_str(), "  우유 사기 ");
    }
}
