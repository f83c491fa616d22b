use serde::{Deserialize, Serialize};
use std::fmt;

use crate::language::Language;

pub const UNKNOWN_FESTIVAL_ID: &str = "Unknown";
pub const NO_NAME: &str = "No Name";
pub const NO_DESCRIPTION: &str = "No Description";
pub const NO_ADDRESS: &str = "No Address";

/// One row of the festival export as it appears in the input file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InputRecord {
    #[serde(default)]
    pub festival_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Input row with the defaulting policy applied.
///
/// `name` and `description` stay optional: a missing value skips
/// translation and is replaced by its placeholder in every language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Festival {
    pub festival_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: String,
}

impl From<InputRecord> for Festival {
    fn from(record: InputRecord) -> Self {
        Self {
            festival_id: present(record.festival_id)
                .unwrap_or_else(|| UNKNOWN_FESTIVAL_ID.to_string()),
            name: present(record.name),
            description: present(record.description),
            address: present(record.address).unwrap_or_else(|| NO_ADDRESS.to_string()),
        }
    }
}

/// Treats empty and whitespace-only cells as missing
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// One row of the multilingual output file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub festival_id: String,
    pub name: String,
    pub description: String,
    pub address: String,
    pub lang: u8,
}

impl OutputRecord {
    pub fn new(festival: &Festival, name: String, description: String, language: Language) -> Self {
        Self {
            festival_id: festival.festival_id.clone(),
            name,
            description,
            address: festival.address.clone(),
            lang: language.id(),
        }
    }
}

/// Translatable attribute of a festival, used to label diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTag {
    Name,
    Description,
}

impl FieldTag {
    /// Value emitted in every language when the field is missing
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Name => NO_NAME,
            Self::Description => NO_DESCRIPTION,
        }
    }
}

impl fmt::Display for FieldTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => f.write_str("name"),
            Self::Description => f.write_str("desc"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: Option<&str>, name: Option<&str>, desc: Option<&str>, addr: Option<&str>) -> InputRecord {
        InputRecord {
            festival_id: id.map(String::from),
            name: name.map(String::from),
            description: desc.map(String::from),
            address: addr.map(String::from),
        }
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let festival = Festival::from(record(None, None, None, None));
        assert_eq!(festival.festival_id, "Unknown");
        assert_eq!(festival.name, None);
        assert_eq!(festival.description, None);
        assert_eq!(festival.address, "No Address");
    }

    #[test]
    fn test_blank_cells_count_as_missing() {
        let festival = Festival::from(record(Some(" "), Some(""), Some("\t"), Some("")));
        assert_eq!(festival.festival_id, "Unknown");
        assert_eq!(festival.name, None);
        assert_eq!(festival.description, None);
        assert_eq!(festival.address, "No Address");
    }

    #[test]
    fn test_present_fields_are_kept_verbatim() {
        let festival = Festival::from(record(Some("42"), Some("Fiesta"), Some("Gran evento"), Some("Calle 1")));
        assert_eq!(festival.festival_id, "42");
        assert_eq!(festival.name.as_deref(), Some("Fiesta"));
        assert_eq!(festival.description.as_deref(), Some("Gran evento"));
        assert_eq!(festival.address, "Calle 1");
    }

    #[test]
    fn test_field_tag_labels() {
        assert_eq!(FieldTag::Name.to_string(), "name");
        assert_eq!(FieldTag::Description.to_string(), "desc");
        assert_eq!(FieldTag::Name.placeholder(), "No Name");
        assert_eq!(FieldTag::Description.placeholder(), "No Description");
    }
}
