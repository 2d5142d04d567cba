use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a section within a law state.
///
/// Identifiers are decided by the document parser (or by the author of an
/// insertion) and must stay the same across versions of the same logical
/// article so that two snapshots can be matched section by section.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    /// Create a section identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SectionId({})", self.0)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for SectionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A named unit of legal text, typically one numbered article.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Identity of the section. Never changes once assigned.
    pub id: SectionId,
    /// Display heading, e.g. `"Article 11 bis."`.
    #[serde(default)]
    pub heading: String,
    /// Body text.
    #[serde(default)]
    pub content: String,
}

impl Section {
    /// Create a section.
    pub fn new(
        id: impl Into<SectionId>,
        heading: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            heading: heading.into(),
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_id_display_is_raw() {
        let id = SectionId::from("art_11bis");
        assert_eq!(format!("{id}"), "art_11bis");
        assert_eq!(format!("{id:?}"), "SectionId(art_11bis)");
    }

    #[test]
    fn section_id_serializes_transparently() {
        let id = SectionId::from("art_1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"art_1\"");
    }

    #[test]
    fn section_missing_heading_defaults_empty() {
        let section: Section =
            serde_json::from_str(r#"{"id": "art_2", "content": "Bar"}"#).unwrap();
        assert_eq!(section.id.as_str(), "art_2");
        assert!(section.heading.is_empty());
        assert_eq!(section.content, "Bar");
    }
}
