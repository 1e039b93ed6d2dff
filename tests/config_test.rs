use profile_cloud::attributes::MappingPolicy;
use profile_cloud::config::{
    AppConfig, DEFAULT_UPLOAD_LIMIT, HEIGHT_VAR, MAPPING_VAR, SEED_VAR, UPLOAD_LIMIT_VAR, WIDTH_VAR,
};
use profile_cloud::error::ProfileError;
use std::collections::HashMap;

fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn defaults_when_nothing_is_set() {
    let config = AppConfig::from_lookup(|_| None).unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.addr.port(), 3000);
    assert_eq!(config.cloud_size(), (500, 300));
    assert_eq!(config.mapping, MappingPolicy::Strict);
}

#[test]
fn variables_override_defaults() {
    let config = AppConfig::from_lookup(lookup_from(&[
        ("PROFILE_CLOUD_ADDR", "0.0.0.0:8080"),
        (WIDTH_VAR, "640"),
        (HEIGHT_VAR, " 480 "),
        (SEED_VAR, "99"),
        (MAPPING_VAR, "best-effort"),
    ]))
    .unwrap();

    assert_eq!(config.addr.to_string(), "0.0.0.0:8080");
    assert_eq!(config.cloud_size(), (640, 480));
    assert_eq!(config.cloud.seed, 99);
    assert_eq!(config.mapping, MappingPolicy::BestEffort);
}

#[test]
fn invalid_values_are_config_errors() {
    let err = AppConfig::from_lookup(lookup_from(&[(WIDTH_VAR, "wide")])).unwrap_err();
    assert!(matches!(err, ProfileError::Config(_)));

    let err =
        AppConfig::from_lookup(lookup_from(&[("PROFILE_CLOUD_ADDR", "nowhere")])).unwrap_err();
    assert!(matches!(err, ProfileError::Config(_)));

    let err = AppConfig::from_lookup(lookup_from(&[(MAPPING_VAR, "lenient")])).unwrap_err();
    assert!(matches!(err, ProfileError::Config(_)));

    let err = AppConfig::from_lookup(lookup_from(&[(UPLOAD_LIMIT_VAR, "lots")])).unwrap_err();
    assert!(matches!(err, ProfileError::Config(_)));
}

#[test]
fn upload_limit_defaults_and_overrides() {
    assert_eq!(AppConfig::default().upload_limit, DEFAULT_UPLOAD_LIMIT);

    let config = AppConfig::from_lookup(lookup_from(&[(UPLOAD_LIMIT_VAR, "4096")])).unwrap();
    assert_eq!(config.upload_limit, 4096);
}
