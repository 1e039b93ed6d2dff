use profile_cloud::attributes::{AttributeValue, MappingPolicy, ProfileAttributes, map_record};
use profile_cloud::error::ParseErrorKind;
use profile_cloud::loader::RawRecord;

fn record(headers: &[&str], values: &[&str]) -> RawRecord {
    RawRecord::new(
        headers.iter().map(|h| h.to_string()).collect(),
        values.iter().map(|v| v.to_string()).collect(),
    )
}

fn multi(items: &[&str]) -> AttributeValue {
    AttributeValue::Multi(items.iter().map(|i| i.to_string()).collect())
}

#[test]
fn splits_multi_valued_columns() {
    let raw = record(
        &["Member Skills", "Job Titles"],
        &["Python; SQL; Leadership", "Engineer; Manager"],
    );
    let attributes = map_record(&raw, MappingPolicy::Strict).unwrap();

    assert_eq!(attributes.len(), 2);
    assert_eq!(
        attributes.get("Member Skills"),
        Some(&multi(&["Python", "SQL", "Leadership"]))
    );
    assert_eq!(attributes.get("Job Titles"), Some(&multi(&["Engineer", "Manager"])));
}

#[test]
fn single_values_stay_scalar() {
    let raw = record(&["Years of Experience"], &["Senior"]);
    let attributes = map_record(&raw, MappingPolicy::Strict).unwrap();
    assert_eq!(
        attributes.get("Years of Experience"),
        Some(&AttributeValue::Single("Senior".to_string()))
    );

    let json = serde_json::to_value(&attributes).unwrap();
    assert_eq!(json, serde_json::json!({"Years of Experience": "Senior"}));
}

#[test]
fn only_semicolon_space_splits() {
    assert_eq!(
        AttributeValue::from_raw("a;b"),
        AttributeValue::Single("a;b".to_string())
    );
    assert_eq!(
        AttributeValue::from_raw(""),
        AttributeValue::Single(String::new())
    );
    // no trimming of the pieces
    assert_eq!(AttributeValue::from_raw(" x ; y"), multi(&[" x ", "y"]));
    assert_eq!(AttributeValue::from_raw("a; "), multi(&["a", ""]));
}

#[test]
fn snapshot_serializes_in_header_order() {
    let raw = record(
        &["Member Age", "Member Skills", "Degrees"],
        &["25 to 34", "Rust; Go", "Bachelor"],
    );
    let attributes = map_record(&raw, MappingPolicy::Strict).unwrap();

    let keys: Vec<&str> = attributes.keys().collect();
    assert_eq!(keys, vec!["Member Age", "Member Skills", "Degrees"]);
    assert_eq!(
        serde_json::to_string(&attributes).unwrap(),
        r#"{"Member Age":"25 to 34","Member Skills":["Rust","Go"],"Degrees":"Bachelor"}"#
    );
}

#[test]
fn repeated_header_takes_the_later_value() {
    let raw = record(&["Degrees", "Member Age", "Degrees"], &["BSc", "30", "MSc"]);
    let attributes = map_record(&raw, MappingPolicy::Strict).unwrap();

    assert_eq!(attributes.len(), 2);
    assert_eq!(attributes.keys().next(), Some("Degrees"));
    assert_eq!(
        attributes.get("Degrees"),
        Some(&AttributeValue::Single("MSc".to_string()))
    );
}

#[test]
fn strict_mapping_rejects_length_mismatch() {
    let raw = record(&["Member Age", "Member Gender"], &["25 to 34"]);
    let err = map_record(&raw, MappingPolicy::Strict).unwrap_err();

    assert_eq!(
        err.parse_kind(),
        Some(ParseErrorKind::LengthMismatch {
            headers: 2,
            values: 1
        })
    );
    assert_eq!(err.code(), "length_mismatch");
}

#[test]
fn best_effort_mapping_keeps_the_overlap() {
    let short = record(&["Member Age", "Member Gender"], &["25 to 34"]);
    let attributes = map_record(&short, MappingPolicy::BestEffort).unwrap();
    assert_eq!(attributes.len(), 1);
    assert!(attributes.contains("Member Age"));
    assert!(!attributes.contains("Member Gender"));

    let long = record(&["Member Age"], &["25 to 34", "surplus"]);
    let attributes = map_record(&long, MappingPolicy::BestEffort).unwrap();
    assert_eq!(attributes.len(), 1);
}

#[test]
fn attribute_value_helpers() {
    let value = multi(&["Bachelor", "Master"]);
    assert!(value.is_multi());
    assert_eq!(value.items(), vec!["Bachelor", "Master"]);
    assert_eq!(value.display(), "Bachelor, Master");

    let single = AttributeValue::Single("Senior".to_string());
    assert_eq!(single.items(), vec!["Senior"]);
    assert_eq!(single.display(), "Senior");
}

#[test]
fn mapping_policy_parses_from_config_strings() {
    assert_eq!("strict".parse::<MappingPolicy>().unwrap(), MappingPolicy::Strict);
    assert_eq!(
        "Best-Effort".parse::<MappingPolicy>().unwrap(),
        MappingPolicy::BestEffort
    );
    assert!("lenient".parse::<MappingPolicy>().is_err());
}

#[test]
fn from_pairs_builds_snapshots() {
    let attributes = ProfileAttributes::from_pairs(vec![
        ("Member Skills", multi(&["Rust", "Go"])),
        ("Member Age", AttributeValue::Single("30".to_string())),
    ]);
    assert_eq!(attributes.len(), 2);
    assert!(!attributes.is_empty());
    assert!(ProfileAttributes::new().is_empty());
}
