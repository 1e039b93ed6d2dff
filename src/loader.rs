use csv::ReaderBuilder;
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::attributes::{MappingPolicy, ProfileAttributes, map_record};
use crate::error::{ParseErrorKind, Result};

/// Header row and first value row of an uploaded export
///
/// `headers[i]` labels `values[i]`. The two rows are kept exactly as the
/// parser produced them, so their lengths may differ.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RawRecord {
    headers: Vec<String>,
    values: Vec<String>,
}

impl RawRecord {
    pub fn new(headers: Vec<String>, values: Vec<String>) -> Self {
        RawRecord { headers, values }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Parses delimited text from any reader
    ///
    /// The first record is the header row and the second the value row; any
    /// further rows are ignored. Cells are not trimmed.
    ///
    /// # Errors
    /// * `empty_file` if there is no row at all
    /// * `missing_value_row` if only the header row is present
    /// * `malformed_csv` if the parser rejects the input
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut rows = reader.records();

        let headers = match rows.next() {
            Some(row) => row?.iter().map(|cell| cell.to_string()).collect(),
            None => return Err(ParseErrorKind::EmptyFile.into()),
        };

        let values = match rows.next() {
            Some(row) => row?.iter().map(|cell| cell.to_string()).collect(),
            None => return Err(ParseErrorKind::MissingValueRow.into()),
        };

        let extra = rows.count();
        if extra > 0 {
            log::debug!("ignoring {} rows after the first value row", extra);
        }

        Ok(RawRecord { headers, values })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(bytes)
    }
}

/// Load a raw record from a CSV file
///
/// # Arguments
/// * `filepath` - Path to the CSV export
///
/// # Returns
/// * `Result<RawRecord>` - Header and value rows, or a parse error
///
/// # Examples
/// ```no_run
/// use profile_cloud::loader::from_csv;
///
/// match from_csv("Ad_Targeting.csv") {
///     Ok(record) => println!("Loaded {} columns", record.headers().len()),
///     Err(e) => eprintln!("Error loading CSV: {}", e),
/// }
/// ```
pub fn from_csv(filepath: impl AsRef<Path>) -> Result<RawRecord> {
    let file = File::open(filepath)?;
    RawRecord::from_reader(file)
}

/// Returns true if the file name carries a `.csv` extension (any case).
pub fn is_csv_file(filepath: impl AsRef<Path>) -> bool {
    filepath
        .as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// Detect file type and load a profile snapshot
///
/// Only `.csv` exports are accepted, mirroring the upload form.
///
/// # Arguments
/// * `filepath` - Path to the file to load
/// * `policy` - How to treat header/value rows of different lengths
///
/// # Examples
/// ```no_run
/// use profile_cloud::attributes::MappingPolicy;
/// use profile_cloud::loader::load_profile;
///
/// match load_profile("Ad_Targeting.csv", MappingPolicy::Strict) {
///     Ok(profile) => println!("Loaded {} attributes", profile.len()),
///     Err(e) => eprintln!("Error loading file: {} ({})", e, e.code()),
/// }
/// ```
pub fn load_profile(
    filepath: impl AsRef<Path>,
    policy: MappingPolicy,
) -> Result<ProfileAttributes> {
    let path = filepath.as_ref();
    if !is_csv_file(path) {
        return Err(ParseErrorKind::UnsupportedFile.into());
    }

    let record = from_csv(path)?;
    log::info!(
        "loaded {} with {} columns",
        path.display(),
        record.headers().len()
    );
    map_record(&record, policy)
}

/// Parse an uploaded file body into a profile snapshot.
pub fn profile_from_bytes(bytes: &[u8], policy: MappingPolicy) -> Result<ProfileAttributes> {
    let record = RawRecord::from_bytes(bytes)?;
    map_record(&record, policy)
}
