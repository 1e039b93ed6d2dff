use std::fmt;

/// Why an uploaded file could not be turned into a profile snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The file has no rows at all
    EmptyFile,
    /// A header row exists but there is no value row under it
    MissingValueRow,
    /// Header and value rows have different lengths
    LengthMismatch { headers: usize, values: usize },
    /// The file is not a `.csv` export
    UnsupportedFile,
}

impl ParseErrorKind {
    /// Stable reason code shown to the user and returned by the API.
    pub fn code(&self) -> &'static str {
        match self {
            ParseErrorKind::EmptyFile => "empty_file",
            ParseErrorKind::MissingValueRow => "missing_value_row",
            ParseErrorKind::LengthMismatch { .. } => "length_mismatch",
            ParseErrorKind::UnsupportedFile => "unsupported_file",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::EmptyFile => write!(f, "the file contains no rows"),
            ParseErrorKind::MissingValueRow => {
                write!(f, "the file has a header row but no value row")
            }
            ParseErrorKind::LengthMismatch { headers, values } => write!(
                f,
                "the header row has {} columns but the value row has {}",
                headers, values
            ),
            ParseErrorKind::UnsupportedFile => write!(f, "only .csv files are accepted"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("{0}")]
    Parse(ParseErrorKind),

    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to render word cloud: {0}")]
    Render(String),

    #[error("invalid color {0:?}, expected #RRGGBB")]
    InvalidColor(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("the upload exceeds the {limit} byte limit")]
    TooLarge { limit: usize },

    #[error("the upload could not be read: {0}")]
    Upload(String),

    #[error("the profile has no {0:?} attribute")]
    MissingAttribute(String),
}

impl ProfileError {
    /// Reason code for user-facing error states.
    pub fn code(&self) -> &'static str {
        match self {
            ProfileError::Parse(kind) => kind.code(),
            ProfileError::Csv(_) => "malformed_csv",
            ProfileError::Io(_) => "io",
            ProfileError::Render(_) => "render",
            ProfileError::InvalidColor(_) => "invalid_color",
            ProfileError::Config(_) => "config",
            ProfileError::TooLarge { .. } => "too_large",
            ProfileError::Upload(_) => "upload_failed",
            ProfileError::MissingAttribute(_) => "missing_attribute",
        }
    }

    pub fn parse_kind(&self) -> Option<ParseErrorKind> {
        match self {
            ProfileError::Parse(kind) => Some(*kind),
            _ => None,
        }
    }
}

impl From<ParseErrorKind> for ProfileError {
    fn from(kind: ParseErrorKind) -> Self {
        ProfileError::Parse(kind)
    }
}

pub type Result<T> = std::result::Result<T, ProfileError>;
