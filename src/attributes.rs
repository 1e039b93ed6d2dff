use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::str::FromStr;

use crate::error::{ParseErrorKind, ProfileError, Result};
use crate::loader::RawRecord;

/// Separator LinkedIn uses between the entries of a multi-valued column
pub const MULTI_VALUE_DELIMITER: &str = "; ";

/// Value of a single profile attribute
///
/// A column whose cell contains [`MULTI_VALUE_DELIMITER`] becomes a `Multi`
/// sequence, anything else is kept verbatim as `Single`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Single(String),
    Multi(Vec<String>),
}

impl AttributeValue {
    /// Splits a raw cell on the multi-value delimiter.
    ///
    /// No trimming or type coercion is applied, and an empty cell stays a
    /// `Single` empty string.
    pub fn from_raw(raw: &str) -> Self {
        if !raw.is_empty() && raw.contains(MULTI_VALUE_DELIMITER) {
            AttributeValue::Multi(
                raw.split(MULTI_VALUE_DELIMITER)
                    .map(|part| part.to_string())
                    .collect(),
            )
        } else {
            AttributeValue::Single(raw.to_string())
        }
    }

    /// Items of the value, a `Single` counting as a one-item sequence
    pub fn items(&self) -> Vec<&str> {
        match self {
            AttributeValue::Single(value) => vec![value.as_str()],
            AttributeValue::Multi(values) => values.iter().map(|v| v.as_str()).collect(),
        }
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, AttributeValue::Multi(_))
    }

    /// Text used by the basic information panel
    pub fn display(&self) -> String {
        match self {
            AttributeValue::Single(value) => value.clone(),
            AttributeValue::Multi(values) => values.join(", "),
        }
    }
}

/// What to do when the header row and the value row disagree in length
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MappingPolicy {
    /// Reject the upload with `length_mismatch`
    #[default]
    Strict,
    /// Map the overlapping columns and drop the rest
    BestEffort,
}

impl FromStr for MappingPolicy {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(MappingPolicy::Strict),
            "best-effort" | "best_effort" | "besteffort" => Ok(MappingPolicy::BestEffort),
            other => Err(ProfileError::Config(format!(
                "unknown mapping policy {:?}, expected strict or best-effort",
                other
            ))),
        }
    }
}

/// Immutable snapshot of one uploaded profile
///
/// Entries keep the order of the header row. A header that appears twice
/// keeps its first position and takes the later value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileAttributes {
    entries: Vec<(String, AttributeValue)>,
}

impl ProfileAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot from already split `(name, value)` pairs.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, AttributeValue)>,
        K: Into<String>,
    {
        let mut attributes = Self::new();
        for (name, value) in pairs {
            attributes.insert(name.into(), value);
        }
        attributes
    }

    fn insert(&mut self, name: String, value: AttributeValue) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl Serialize for ProfileAttributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Maps a header row and its value row into a [`ProfileAttributes`] snapshot
///
/// # Arguments
/// * `record` - Header and value rows extracted from the upload
/// * `policy` - How to treat rows of different lengths
///
/// # Returns
/// * `Result<ProfileAttributes>` - The snapshot, or `length_mismatch` under
///   [`MappingPolicy::Strict`]
///
/// # Examples
/// ```
/// use profile_cloud::attributes::{map_record, AttributeValue, MappingPolicy};
/// use profile_cloud::loader::RawRecord;
///
/// let record = RawRecord::new(
///     vec!["Member Skills".into(), "Years of Experience".into()],
///     vec!["Python; SQL".into(), "Senior".into()],
/// );
/// let attributes = map_record(&record, MappingPolicy::Strict).unwrap();
/// assert_eq!(
///     attributes.get("Member Skills"),
///     Some(&AttributeValue::Multi(vec!["Python".into(), "SQL".into()]))
/// );
/// ```
pub fn map_record(record: &RawRecord, policy: MappingPolicy) -> Result<ProfileAttributes> {
    let headers = record.headers();
    let values = record.values();

    if headers.len() != values.len() {
        match policy {
            MappingPolicy::Strict => {
                return Err(ParseErrorKind::LengthMismatch {
                    headers: headers.len(),
                    values: values.len(),
                }
                .into());
            }
            MappingPolicy::BestEffort => {
                log::warn!(
                    "header row has {} columns but value row has {}, mapping the first {}",
                    headers.len(),
                    values.len(),
                    headers.len().min(values.len())
                );
            }
        }
    }

    let attributes = ProfileAttributes::from_pairs(
        headers
            .iter()
            .zip(values.iter())
            .map(|(header, value)| (header.clone(), AttributeValue::from_raw(value))),
    );

    log::debug!("mapped {} profile attributes", attributes.len());
    Ok(attributes)
}
