/*!
# Profile Cloud

Turns a LinkedIn `Ad_Targeting.csv` export into a profile page with word clouds.

## Overview

The export is a two-row CSV: a header row naming the targeting attributes and a
single value row. Multi-valued attributes join their entries with `"; "`. The
application maps the row into a profile snapshot, counts the words of the
skills and interests attributes, lays them out on a spiral and renders both
clouds as SVG next to the basic profile information.

## Pipeline

```text
uploaded file -> loader (RawRecord) -> attributes (ProfileAttributes)
              -> frequency (WordFrequency) -> layout (PlacedWord) -> cloud (SVG)
```

## Modules

- **loader**: CSV parsing into the header and value rows, file type detection
- **attributes**: attribute mapping and the immutable profile snapshot
- **frequency**: tokenizer and word counter
- **layout**: spiral word placement behind the `LayoutEngine` trait
- **cloud**: mount points and SVG rendering of placed words
- **profile**: recognized attribute keys and the profile page view model
- **session**: snapshot ownership and ordering of overlapping uploads
- **downloader**: CSV and JSON exports
- **config**: defaults and `PROFILE_CLOUD_*` environment overrides
- **app**: web routes (requires the `web` feature)

## Usage

```text
profile-cloud render Ad_Targeting.csv --out-dir clouds
cargo run --features web --bin website
```
*/

pub mod attributes;
pub mod cloud;
pub mod config;
pub mod downloader;
pub mod error;
pub mod frequency;
pub mod layout;
pub mod loader;
pub mod profile;
pub mod session;

#[cfg(feature = "web")]
pub mod app;

/// Re-export the types most callers need
pub use attributes::{AttributeValue, MappingPolicy, ProfileAttributes, map_record};
pub use cloud::{CloudOptions, MountPoint, render_word_cloud};
pub use error::{ParseErrorKind, ProfileError, Result};
pub use frequency::{WordFrequency, word_frequency};
pub use layout::{LayoutConfig, LayoutEngine, PlacedWord, SpiralLayout};
pub use loader::{RawRecord, load_profile};
pub use session::{Session, UploadOutcome, UploadTicket};
