use crate::attributes::ProfileAttributes;
use crate::error::{ProfileError, Result};
use crate::frequency::WordFrequency;

/// Convert a frequency set to CSV format
///
/// Writes a `text,value` header followed by one row per word, in the order
/// the words were counted. Quoting is handled by the csv writer.
///
/// # Examples
/// ```
/// use profile_cloud::downloader::frequencies_to_csv;
/// use profile_cloud::frequency::word_frequency;
///
/// let csv = frequencies_to_csv(&word_frequency(&["Rust Rust"])).unwrap();
/// assert_eq!(csv, "text,value\nrust,2\n");
/// ```
pub fn frequencies_to_csv(words: &[WordFrequency]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["text", "value"])?;
    for word in words {
        writer.write_record([word.text.as_str(), word.value.to_string().as_str()])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ProfileError::Render(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ProfileError::Render(e.to_string()))
}

/// Convert a profile snapshot to pretty-printed JSON.
pub fn attributes_to_json(attributes: &ProfileAttributes) -> Result<String> {
    serde_json::to_string_pretty(attributes).map_err(|e| ProfileError::Render(e.to_string()))
}
