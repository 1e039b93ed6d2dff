use profile_cloud::attributes::{AttributeValue, ProfileAttributes};
use profile_cloud::cloud::CloudOptions;
use profile_cloud::profile::{
    BASIC_FIELDS, CloudKind, InfoRow, ProfileView, basic_info, cloud_frequencies, job_titles,
    render_cloud,
};

fn single(value: &str) -> AttributeValue {
    AttributeValue::Single(value.to_string())
}

fn multi(items: &[&str]) -> AttributeValue {
    AttributeValue::Multi(items.iter().map(|i| i.to_string()).collect())
}

fn sample_profile() -> ProfileAttributes {
    ProfileAttributes::from_pairs(vec![
        ("Member Age", single("25 to 34")),
        ("Member Gender", single("Female")),
        ("Years of Experience", single("Senior")),
        ("Degrees", multi(&["Bachelor of Science", "Master of Science"])),
        ("Graduation Year", single("2015")),
        ("Fields of Study", single("Computer Science")),
        ("Member Skills", multi(&["Machine Learning", "Deep Learning", "Python"])),
        ("Job Titles", multi(&["Data Scientist", "ML Engineer"])),
        ("Member Interests", multi(&["Open Source", "Hiking"])),
    ])
}

fn row(label: &str, value: &str) -> InfoRow {
    InfoRow {
        label: label.to_string(),
        value: value.to_string(),
    }
}

#[test]
fn basic_info_lists_every_field_in_order() {
    let rows = basic_info(&sample_profile());

    assert_eq!(rows.len(), BASIC_FIELDS.len());
    assert_eq!(rows[0], row("Age Group", "25 to 34"));
    assert_eq!(rows[1], row("Gender", "Female"));
    assert_eq!(rows[2], row("Experience", "Senior"));
    assert_eq!(
        rows[3],
        row("Education", "Bachelor of Science, Master of Science")
    );
    assert_eq!(rows[4], row("Graduation Year", "2015"));
    assert_eq!(rows[5], row("Field", "Computer Science"));
}

#[test]
fn missing_basic_fields_show_empty_values() {
    let rows = basic_info(&ProfileAttributes::new());
    assert_eq!(rows.len(), BASIC_FIELDS.len());
    assert!(rows.iter().all(|r| r.value.is_empty()));
}

#[test]
fn job_titles_become_chips() {
    assert_eq!(
        job_titles(&sample_profile()),
        vec!["Data Scientist".to_string(), "ML Engineer".to_string()]
    );

    let one = ProfileAttributes::from_pairs(vec![("Job Titles", single("Founder"))]);
    assert_eq!(job_titles(&one), vec!["Founder".to_string()]);

    assert!(job_titles(&ProfileAttributes::new()).is_empty());
}

#[test]
fn cloud_kinds_map_to_their_attributes() {
    assert_eq!(CloudKind::Skills.attribute(), "Member Skills");
    assert_eq!(CloudKind::Interests.attribute(), "Member Interests");
    assert_eq!(CloudKind::Skills.mount_id(), "skills-cloud");
    assert_eq!(CloudKind::Interests.mount_id(), "interests-cloud");
    assert_eq!(CloudKind::from_name("skills"), Some(CloudKind::Skills));
    assert_eq!(CloudKind::from_name("interests"), Some(CloudKind::Interests));
    assert_eq!(CloudKind::from_name("jobs"), None);
}

#[test]
fn cloud_frequencies_count_attribute_words() {
    let words = cloud_frequencies(&sample_profile(), CloudKind::Skills);
    let learning = words.iter().find(|w| w.text == "learning").unwrap();
    assert_eq!(learning.value, 2);
    assert_eq!(words[0].text, "machine");

    assert!(cloud_frequencies(&ProfileAttributes::new(), CloudKind::Interests).is_empty());
}

#[test]
fn single_valued_cloud_attribute_is_one_item() {
    let attrs = ProfileAttributes::from_pairs(vec![("Member Skills", single("Rust Rust"))]);
    let words = cloud_frequencies(&attrs, CloudKind::Skills);
    assert_eq!(words.len(), 1);
    assert_eq!(words[0].value, 2);
}

#[test]
fn view_renders_both_clouds_in_their_colors() {
    let view = ProfileView::build(&sample_profile(), (500, 300), &CloudOptions::default()).unwrap();

    let skills = view.skills_svg.unwrap();
    let interests = view.interests_svg.unwrap();
    assert!(skills.to_lowercase().contains("#4a90e2"));
    assert!(skills.contains("learning"));
    assert!(interests.to_lowercase().contains("#22c55e"));
    assert!(interests.contains("hiking"));
    assert_eq!(view.job_titles.len(), 2);
}

#[test]
fn view_without_cloud_attributes_has_no_clouds() {
    let attrs = ProfileAttributes::from_pairs(vec![("Member Age", single("18 to 24"))]);
    let view = ProfileView::build(&attrs, (300, 300), &CloudOptions::default()).unwrap();

    assert!(view.skills_svg.is_none());
    assert!(view.interests_svg.is_none());
    assert_eq!(view.basic_info[0].value, "18 to 24");
}

#[test]
fn rendering_one_cloud_does_not_need_the_other() {
    let attrs = ProfileAttributes::from_pairs(vec![("Member Interests", multi(&["Chess"]))]);
    let options = CloudOptions::default();

    assert!(render_cloud(&attrs, CloudKind::Skills, (300, 300), &options)
        .unwrap()
        .is_none());
    let svg = render_cloud(&attrs, CloudKind::Interests, (300, 300), &options)
        .unwrap()
        .unwrap();
    assert!(svg.contains("chess"));
}
