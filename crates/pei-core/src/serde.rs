//! Lenient deserializers for query-string filters.
//!
//! Query parameters reach handlers as text, and browser forms send empty
//! strings for unset fields. These helpers treat `""` as absent and parse
//! everything else.

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

pub fn deserialize_optional_uuid<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => Uuid::parse_str(s.trim())
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

pub fn deserialize_optional_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some("true") | Some("1") => Ok(Some(true)),
        Some("false") | Some("0") => Ok(Some(false)),
        Some(other) => Err(serde::de::Error::custom(format!(
            "invalid boolean: {other}"
        ))),
    }
}

pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Filters {
        #[serde(default, deserialize_with = "deserialize_optional_uuid")]
        school_id: Option<Uuid>,
        #[serde(default, deserialize_with = "deserialize_optional_bool")]
        active: Option<bool>,
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        discipline: Option<String>,
    }

    #[test]
    fn test_empty_values_are_none() {
        let f: Filters =
            serde_json::from_str(r#"{"school_id":"","active":"","discipline":"  "}"#).unwrap();
        assert!(f.school_id.is_none());
        assert!(f.active.is_none());
        assert!(f.discipline.is_none());
    }

    #[test]
    fn test_values_are_parsed() {
        let id = Uuid::new_v4();
        let json = format!(r#"{{"school_id":"{id}","active":"false","discipline":" Matemática "}}"#);
        let f: Filters = serde_json::from_str(&json).unwrap();
        assert_eq!(f.school_id, Some(id));
        assert_eq!(f.active, Some(false));
        assert_eq!(f.discipline.as_deref(), Some("Matemática"));
    }

    #[test]
    fn test_missing_fields_default() {
        let f: Filters = serde_json::from_str("{}").unwrap();
        assert!(f.school_id.is_none() && f.active.is_none() && f.discipline.is_none());
    }

    #[test]
    fn test_invalid_values_error() {
        assert!(serde_json::from_str::<Filters>(r#"{"school_id":"abc"}"#).is_err());
        assert!(serde_json::from_str::<Filters>(r#"{"active":"maybe"}"#).is_err());
    }
}
