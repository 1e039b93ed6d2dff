use plotters::prelude::*;
use plotters::style::FontTransform;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use serde::{Deserialize, Serialize};

use crate::attributes::AttributeValue;
use crate::error::{ProfileError, Result};
use crate::frequency::{WordFrequency, word_frequency};
use crate::layout::{
    LayoutConfig, LayoutEngine, PlacedWord, Rotation, Spiral, SpiralLayout, sqrt_font_size,
};

/// Color of the skills cloud
pub const SKILLS_COLOR: &str = "#4A90E2";

/// Color of the interests cloud
pub const INTERESTS_COLOR: &str = "#22C55E";

/// Canvas size used when a mount point reports zero width or height
pub const FALLBACK_SIZE: u32 = 300;

/// Styling and layout options for a word cloud
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CloudOptions {
    /// Fill color of every word, as `#RRGGBB`
    pub color: String,

    /// Empty space kept around each word, in pixels
    pub padding: u32,

    /// Rotation applied to every word
    pub rotation: Rotation,

    /// Path words follow while searching for free space
    pub spiral: Spiral,

    /// Seed making the layout reproducible
    pub seed: u64,

    /// Font family written into the SVG
    pub font_family: String,
}

impl Default for CloudOptions {
    /// Creates the configuration used by the profile page
    ///
    /// # Returns
    /// * `CloudOptions` - Default configuration with:
    ///   - blue words (`#4A90E2`)
    ///   - 5 pixel padding, no rotation
    ///   - Archimedean spiral
    fn default() -> Self {
        Self {
            color: SKILLS_COLOR.to_string(),
            padding: 5,
            rotation: Rotation::None,
            spiral: Spiral::Archimedean,
            seed: 0,
            font_family: "sans-serif".to_string(),
        }
    }
}

impl CloudOptions {
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Drawing surface a cloud is rendered into
///
/// Holds at most one rendered SVG document. A zero width or height means
/// the surface has not been measured yet.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MountPoint {
    id: String,
    width: u32,
    height: u32,
    svg: Option<String>,
}

impl MountPoint {
    pub fn new(id: impl Into<String>, width: u32, height: u32) -> Self {
        MountPoint {
            id: id.into(),
            width,
            height,
            svg: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Measured size, or [`FALLBACK_SIZE`] for an unmeasured dimension
    pub fn canvas_size(&self) -> (u32, u32) {
        let width = if self.width == 0 { FALLBACK_SIZE } else { self.width };
        let height = if self.height == 0 { FALLBACK_SIZE } else { self.height };
        (width, height)
    }

    pub fn svg(&self) -> Option<&str> {
        self.svg.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.svg.is_none()
    }

    /// Removes everything previously rendered into this surface.
    pub fn clear(&mut self) {
        self.svg = None;
    }

    fn mount(&mut self, svg: String) {
        self.svg = Some(svg);
    }
}

/// Parses a `#RRGGBB` color.
pub fn parse_hex_color(color: &str) -> Result<RGBColor> {
    let invalid = || ProfileError::InvalidColor(color.to_string());
    let hex = color.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
    };
    Ok(RGBColor(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

fn font_transform(rotation: Rotation) -> FontTransform {
    match rotation {
        Rotation::None => FontTransform::None,
        Rotation::Rotate90 => FontTransform::Rotate90,
        Rotation::Rotate180 => FontTransform::Rotate180,
        Rotation::Rotate270 => FontTransform::Rotate270,
    }
}

/// Draws placed words into a standalone SVG document
///
/// Each word is centered on its `(x, y)` offset from the canvas center.
///
/// # Arguments
/// * `words` - Output of a layout engine
/// * `size` - Canvas width and height in pixels
/// * `options` - Color, rotation and font family
///
/// # Returns
/// * `Result<String>` - The SVG markup
pub fn draw_svg(words: &[PlacedWord], size: (u32, u32), options: &CloudOptions) -> Result<String> {
    let color = parse_hex_color(&options.color)?;
    let center_x = size.0 as f64 / 2.0;
    let center_y = size.1 as f64 / 2.0;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();

        for word in words {
            let style = (options.font_family.as_str(), word.size)
                .into_font()
                .color(&color)
                .pos(Pos::new(HPos::Center, VPos::Center))
                .transform(font_transform(options.rotation));

            let position = (
                (center_x + word.x).round() as i32,
                (center_y + word.y).round() as i32,
            );
            root.draw(&Text::new(word.text.as_str(), position, style))
                .map_err(|e| ProfileError::Render(e.to_string()))?;
        }

        root.present()
            .map_err(|e| ProfileError::Render(e.to_string()))?;
    }

    Ok(svg)
}

/// Lays out a frequency set on a canvas of the given size.
pub fn layout_words(
    engine: &dyn LayoutEngine,
    words: &[WordFrequency],
    size: (u32, u32),
    options: &CloudOptions,
) -> Vec<PlacedWord> {
    let config = LayoutConfig {
        width: size.0,
        height: size.1,
        padding: options.padding,
        rotation: options.rotation,
        spiral: options.spiral,
        seed: options.seed,
    };
    engine.layout(words, &config, &sqrt_font_size)
}

/// Renders an attribute's word cloud into a mount point
///
/// Frequencies are derived from the attribute, laid out with the spiral
/// engine and drawn as SVG. Whatever the mount point held before is removed
/// first. A missing mount point or missing data is not an error: nothing is
/// rendered and `Ok(None)` is returned.
///
/// # Returns
/// * `Result<Option<Vec<PlacedWord>>>` - The placed words, `None` on a no-op
///
/// # Examples
/// ```
/// use profile_cloud::attributes::AttributeValue;
/// use profile_cloud::cloud::{render_word_cloud, CloudOptions, MountPoint};
///
/// let skills = AttributeValue::Multi(vec!["Rust".into(), "Systems Programming".into()]);
/// let mut mount = MountPoint::new("skills-cloud", 0, 0);
/// let placed = render_word_cloud(Some(&mut mount), Some(&skills), &CloudOptions::default())
///     .unwrap()
///     .unwrap();
/// assert!(!placed.is_empty());
/// assert!(mount.svg().unwrap().contains("rust"));
/// ```
pub fn render_word_cloud(
    mount: Option<&mut MountPoint>,
    data: Option<&AttributeValue>,
    options: &CloudOptions,
) -> Result<Option<Vec<PlacedWord>>> {
    render_word_cloud_with(&SpiralLayout, mount, data, options)
}

/// Same as [`render_word_cloud`] with a caller supplied layout engine.
pub fn render_word_cloud_with(
    engine: &dyn LayoutEngine,
    mount: Option<&mut MountPoint>,
    data: Option<&AttributeValue>,
    options: &CloudOptions,
) -> Result<Option<Vec<PlacedWord>>> {
    let (Some(mount), Some(data)) = (mount, data) else {
        return Ok(None);
    };

    let words = word_frequency(&data.items());
    let size = mount.canvas_size();

    mount.clear();
    let placed = layout_words(engine, &words, size, options);
    let svg = draw_svg(&placed, size, options)?;
    mount.mount(svg);

    log::debug!(
        "rendered {} of {} words into {}",
        placed.len(),
        words.len(),
        mount.id()
    );
    Ok(Some(placed))
}

/// Creates example clouds for demonstration purposes
///
/// Renders a skills cloud and an interests cloud from sample data and saves
/// them as SVG files in `output_dir`.
///
/// # Returns
/// * A vector of tuples containing the cloud name and file path
///
/// # Examples
/// ```no_run
/// use profile_cloud::cloud::create_example_clouds;
///
/// for (name, path) in create_example_clouds("cloud_output") {
///     println!("Created {} cloud at {}", name, path);
/// }
/// ```
pub fn create_example_clouds(output_dir: &str) -> Vec<(String, String)> {
    let mut result = Vec::new();

    if let Err(e) = std::fs::create_dir_all(output_dir) {
        log::error!("couldn't create {}: {}", output_dir, e);
        return result;
    }

    let skills = AttributeValue::from_raw(
        "Machine Learning; Deep Learning; Python; Rust; Systems Programming; \
         Distributed Systems; Data Analysis; Machine-Learning Operations; Leadership",
    );
    let interests = AttributeValue::from_raw(
        "Open Source Software; Hiking and Climbing; Photography; Software Engineering; \
         Climate Technology; Open Data",
    );

    let examples = [
        ("Skills", "skills", skills, SKILLS_COLOR),
        ("Interests", "interests", interests, INTERESTS_COLOR),
    ];

    for (name, file, data, color) in examples {
        let mut mount = MountPoint::new(format!("{}-cloud", file), 600, 400);
        let options = CloudOptions::default().with_color(color);
        let path = format!("{}/{}_cloud.svg", output_dir, file);

        let rendered = render_word_cloud(Some(&mut mount), Some(&data), &options);
        match (rendered, mount.svg()) {
            (Ok(_), Some(svg)) => match std::fs::write(&path, svg) {
                Ok(()) => result.push((name.to_string(), path)),
                Err(e) => log::error!("couldn't write {}: {}", path, e),
            },
            (Err(e), _) => log::error!("couldn't render {} cloud: {}", name, e),
            (Ok(_), None) => {}
        }
    }

    result
}
