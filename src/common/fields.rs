//! Serde adapters shared by admin form drafts. Drafts are decoded both from
//! urlencoded form posts (all values arrive as strings) and from JSON.

use serde::{Deserialize, Deserializer};

/// Trims surrounding whitespace.
pub fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.map(|s| s.trim().to_string()).unwrap_or_default())
}

/// Trims and maps blank strings to `None`.
pub fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Reads an explicit `null` the same as a missing key.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts JSON booleans as well as HTML checkbox values ("on", "true", "1").
pub fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        None => false,
        Some(Flag::Bool(b)) => b,
        Some(Flag::Text(text)) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "on" | "true" | "1" | "yes"
        ),
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize)]
    struct SignupRow {
        #[serde(default, deserialize_with = "trimmed")]
        name: String,
        #[serde(default, deserialize_with = "empty_as_none")]
        phone: Option<String>,
        #[serde(default, deserialize_with = "checkbox")]
        flag: bool,
        #[serde(default, deserialize_with = "null_as_default")]
        seen: bool,
    }

    #[test]
    fn test_form_strings_are_normalized() {
        let row: SignupRow = serde_json::from_value(serde_json::json!({
            "name": "  Jane  ",
            "phone": "   ",
            "flag": "on",
        }))
        .unwrap();

        assert_eq!(row.name, "Jane");
        assert_eq!(row.phone, None);
        assert!(row.flag);
    }

    #[test]
    fn test_missing_and_json_values() {
        let row: SignupRow = serde_json::from_value(serde_json::json!({ "flag": false })).unwrap();
        assert_eq!(row.name, "");
        assert!(!row.flag);

        let row: SignupRow = serde_json::from_value(serde_json::json!({ "flag": true })).unwrap();
        assert!(row.flag);
    }

    #[test]
    fn test_null_reads_as_default() {
        let row: SignupRow =
            serde_json::from_value(serde_json::json!({ "flag": true, "seen": null })).unwrap();
        assert!(!row.seen);

        let row: SignupRow =
            serde_json::from_value(serde_json::json!({ "flag": true, "seen": true })).unwrap();
        assert!(row.seen);
    }
}
