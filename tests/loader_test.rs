use profile_cloud::attributes::{AttributeValue, MappingPolicy};
use profile_cloud::error::{ParseErrorKind, ProfileError};
use profile_cloud::loader::{RawRecord, from_csv, is_csv_file, load_profile, profile_from_bytes};
use std::io::Write;
use tempfile::Builder;

const EXPORT: &str = "\
Member Age,Member Gender,Years of Experience,Member Skills,Member Interests\n\
25 to 34,Male,Senior,\"Machine Learning; Deep Learning; Python\",\"Open Source; Hiking\"\n";

fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn reads_header_and_value_rows() {
    let record = RawRecord::from_bytes(EXPORT.as_bytes()).unwrap();
    assert_eq!(record.headers().len(), 5);
    assert_eq!(record.headers()[0], "Member Age");
    assert_eq!(
        record.values()[3],
        "Machine Learning; Deep Learning; Python"
    );
}

#[test]
fn ignores_rows_after_the_first_value_row() {
    let content = "a,b\n1,2\n3,4\n5,6\n";
    let record = RawRecord::from_bytes(content.as_bytes()).unwrap();
    assert_eq!(record.values(), &["1".to_string(), "2".to_string()]);
}

#[test]
fn cells_are_not_trimmed() {
    let record = RawRecord::from_bytes(b"Degrees\n Bachelor \n").unwrap();
    assert_eq!(record.values()[0], " Bachelor ");
}

#[test]
fn empty_input_is_a_parse_error() {
    let err = RawRecord::from_bytes(b"").unwrap_err();
    assert_eq!(err.parse_kind(), Some(ParseErrorKind::EmptyFile));
    assert_eq!(err.code(), "empty_file");
}

#[test]
fn header_only_input_is_missing_value_row() {
    let err = RawRecord::from_bytes(b"Member Age,Member Gender\n").unwrap_err();
    assert_eq!(err.parse_kind(), Some(ParseErrorKind::MissingValueRow));
    assert_eq!(err.code(), "missing_value_row");
}

#[test]
fn ragged_rows_are_reported_by_the_mapper() {
    let err = profile_from_bytes(b"a,b,c\n1,2\n", MappingPolicy::Strict).unwrap_err();
    assert_eq!(
        err.parse_kind(),
        Some(ParseErrorKind::LengthMismatch {
            headers: 3,
            values: 2
        })
    );

    let attributes = profile_from_bytes(b"a,b,c\n1,2\n", MappingPolicy::BestEffort).unwrap();
    assert_eq!(attributes.len(), 2);
}

#[test]
fn loads_a_csv_file_from_disk() {
    let file = write_temp(".csv", EXPORT);

    let record = from_csv(file.path()).unwrap();
    assert_eq!(record.headers().len(), 5);

    let attributes = load_profile(file.path(), MappingPolicy::Strict).unwrap();
    assert_eq!(
        attributes.get("Member Interests"),
        Some(&AttributeValue::Multi(vec![
            "Open Source".to_string(),
            "Hiking".to_string()
        ]))
    );
    assert_eq!(
        attributes.get("Member Gender"),
        Some(&AttributeValue::Single("Male".to_string()))
    );
}

#[test]
fn uppercase_extension_is_accepted() {
    let file = write_temp(".CSV", EXPORT);
    assert!(load_profile(file.path(), MappingPolicy::Strict).is_ok());
}

#[test]
fn other_extensions_are_rejected() {
    let file = write_temp(".xlsx", EXPORT);
    let err = load_profile(file.path(), MappingPolicy::Strict).unwrap_err();
    assert_eq!(err.parse_kind(), Some(ParseErrorKind::UnsupportedFile));

    assert!(is_csv_file("Ad_Targeting.csv"));
    assert!(!is_csv_file("Ad_Targeting"));
    assert!(!is_csv_file("notes.txt"));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_profile("/definitely/not/here.csv", MappingPolicy::Strict).unwrap_err();
    assert!(matches!(err, ProfileError::Io(_)));
    assert_eq!(err.code(), "io");
}
