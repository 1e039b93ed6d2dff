use serde::Serialize;

use crate::attributes::{AttributeValue, ProfileAttributes};
use crate::cloud::{CloudOptions, INTERESTS_COLOR, MountPoint, SKILLS_COLOR, render_word_cloud};
use crate::error::Result;
use crate::frequency::{WordFrequency, word_frequency};

pub const MEMBER_AGE: &str = "Member Age";
pub const MEMBER_GENDER: &str = "Member Gender";
pub const YEARS_OF_EXPERIENCE: &str = "Years of Experience";
pub const DEGREES: &str = "Degrees";
pub const GRADUATION_YEAR: &str = "Graduation Year";
pub const FIELDS_OF_STUDY: &str = "Fields of Study";
pub const MEMBER_SKILLS: &str = "Member Skills";
pub const JOB_TITLES: &str = "Job Titles";
pub const MEMBER_INTERESTS: &str = "Member Interests";

/// Rows of the basic information panel: (label, attribute key)
pub const BASIC_FIELDS: [(&str, &str); 6] = [
    ("Age Group", MEMBER_AGE),
    ("Gender", MEMBER_GENDER),
    ("Experience", YEARS_OF_EXPERIENCE),
    ("Education", DEGREES),
    ("Graduation Year", GRADUATION_YEAR),
    ("Field", FIELDS_OF_STUDY),
];

/// The two clouds shown on the profile page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudKind {
    Skills,
    Interests,
}

impl CloudKind {
    pub const ALL: [CloudKind; 2] = [CloudKind::Skills, CloudKind::Interests];

    pub fn attribute(&self) -> &'static str {
        match self {
            CloudKind::Skills => MEMBER_SKILLS,
            CloudKind::Interests => MEMBER_INTERESTS,
        }
    }

    /// Id of the element the cloud is mounted into
    pub fn mount_id(&self) -> &'static str {
        match self {
            CloudKind::Skills => "skills-cloud",
            CloudKind::Interests => "interests-cloud",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            CloudKind::Skills => SKILLS_COLOR,
            CloudKind::Interests => INTERESTS_COLOR,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CloudKind::Skills => "skills",
            CloudKind::Interests => "interests",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        CloudKind::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

/// One row of the basic information panel
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InfoRow {
    pub label: String,
    pub value: String,
}

/// Everything the profile page shows for one snapshot
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProfileView {
    pub basic_info: Vec<InfoRow>,
    pub job_titles: Vec<String>,
    /// Rendered skills cloud, absent when the attribute is missing
    pub skills_svg: Option<String>,
    /// Rendered interests cloud, absent when the attribute is missing
    pub interests_svg: Option<String>,
}

impl ProfileView {
    /// Builds the page for a snapshot, rendering both clouds
    ///
    /// Each cloud gets its own mount point of `size`; the two renders do not
    /// depend on each other.
    pub fn build(
        attributes: &ProfileAttributes,
        size: (u32, u32),
        options: &CloudOptions,
    ) -> Result<Self> {
        Ok(ProfileView {
            basic_info: basic_info(attributes),
            job_titles: job_titles(attributes),
            skills_svg: render_cloud(attributes, CloudKind::Skills, size, options)?,
            interests_svg: render_cloud(attributes, CloudKind::Interests, size, options)?,
        })
    }
}

/// Label/value rows for the basic information panel
///
/// A missing attribute shows as an empty value, a multi-valued one is
/// joined with commas.
pub fn basic_info(attributes: &ProfileAttributes) -> Vec<InfoRow> {
    BASIC_FIELDS
        .iter()
        .map(|(label, key)| InfoRow {
            label: label.to_string(),
            value: attributes
                .get(key)
                .map(AttributeValue::display)
                .unwrap_or_default(),
        })
        .collect()
}

/// Job title chips, a single title counting as one chip
pub fn job_titles(attributes: &ProfileAttributes) -> Vec<String> {
    attributes
        .get(JOB_TITLES)
        .map(|value| value.items().into_iter().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Word counts of a cloud's attribute, empty when it is missing
pub fn cloud_frequencies(attributes: &ProfileAttributes, kind: CloudKind) -> Vec<WordFrequency> {
    attributes
        .get(kind.attribute())
        .map(|value| word_frequency(&value.items()))
        .unwrap_or_default()
}

/// Renders one cloud of the snapshot into a fresh mount point.
pub fn render_cloud(
    attributes: &ProfileAttributes,
    kind: CloudKind,
    size: (u32, u32),
    options: &CloudOptions,
) -> Result<Option<String>> {
    let mut mount = MountPoint::new(kind.mount_id(), size.0, size.1);
    let options = options.clone().with_color(kind.color());

    let rendered = render_word_cloud(Some(&mut mount), attributes.get(kind.attribute()), &options)?;
    Ok(rendered.and_then(|_| mount.svg().map(str::to_string)))
}
