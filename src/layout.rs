use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::frequency::WordFrequency;

/// Average glyph advance as a fraction of the font size
const GLYPH_ADVANCE_EM: f64 = 0.6;

/// Shape of the path a word walks while looking for free space
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spiral {
    #[default]
    Archimedean,
    Rectangular,
}

/// Text rotation in quarter turns
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    None,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl Rotation {
    pub fn degrees(&self) -> u32 {
        match self {
            Rotation::None => 0,
            Rotation::Rotate90 => 90,
            Rotation::Rotate180 => 180,
            Rotation::Rotate270 => 270,
        }
    }

    fn is_vertical(&self) -> bool {
        matches!(self, Rotation::Rotate90 | Rotation::Rotate270)
    }
}

/// Canvas and placement settings for one layout run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub width: u32,
    pub height: u32,
    pub padding: u32,
    pub rotation: Rotation,
    pub spiral: Spiral,
    /// Seed for the start-point jitter and spiral direction
    pub seed: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 300,
            height: 300,
            padding: 5,
            rotation: Rotation::None,
            spiral: Spiral::Archimedean,
            seed: 0,
        }
    }
}

/// A word with its computed font size and position
///
/// `x` and `y` are offsets of the word's center from the canvas center.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedWord {
    pub text: String,
    pub value: u32,
    pub size: f64,
    pub x: f64,
    pub y: f64,
    pub rotate: u32,
}

impl PlacedWord {
    /// Estimated unpadded extent `(width, height)` of the word on the canvas
    pub fn extent(&self) -> (f64, f64) {
        text_extent(&self.text, self.size, rotation_from_degrees(self.rotate))
    }
}

/// Computes non-overlapping positions for a set of weighted words
pub trait LayoutEngine {
    /// Places as many words as fit on the canvas. Words that cannot be
    /// placed are left out of the result.
    fn layout(
        &self,
        words: &[WordFrequency],
        config: &LayoutConfig,
        font_size: &dyn Fn(&WordFrequency) -> f64,
    ) -> Vec<PlacedWord>;
}

/// Font size used by the profile clouds: `sqrt(count) * 10`
pub fn sqrt_font_size(word: &WordFrequency) -> f64 {
    (word.value as f64).sqrt() * 10.0
}

/// Spiral placement in the manner of d3-cloud
///
/// Words are placed largest first. Each starts near the canvas center and
/// walks outwards along the configured spiral until its padded box fits
/// without overlapping an earlier word.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpiralLayout;

#[derive(Clone, Copy, Debug)]
struct Bounds {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl Bounds {
    fn around(cx: f64, cy: f64, width: f64, height: f64, padding: f64) -> Self {
        Bounds {
            left: cx - width / 2.0 - padding,
            top: cy - height / 2.0 - padding,
            right: cx + width / 2.0 + padding,
            bottom: cy + height / 2.0 + padding,
        }
    }

    fn overlaps(&self, other: &Bounds) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    fn inside(&self, width: f64, height: f64) -> bool {
        self.left >= 0.0 && self.top >= 0.0 && self.right <= width && self.bottom <= height
    }
}

fn rotation_from_degrees(degrees: u32) -> Rotation {
    match degrees % 360 {
        90 => Rotation::Rotate90,
        180 => Rotation::Rotate180,
        270 => Rotation::Rotate270,
        _ => Rotation::None,
    }
}

fn text_extent(text: &str, size: f64, rotation: Rotation) -> (f64, f64) {
    let width = text.chars().count() as f64 * size * GLYPH_ADVANCE_EM;
    let height = size;
    if rotation.is_vertical() {
        (height, width)
    } else {
        (width, height)
    }
}

/// Point on the spiral for step `t`, relative to the start point
fn spiral_point(spiral: Spiral, t: f64, aspect: f64, state: &mut (f64, f64)) -> (f64, f64) {
    match spiral {
        Spiral::Archimedean => {
            let t = t * 0.1;
            (aspect * t * t.cos(), t * t.sin())
        }
        Spiral::Rectangular => {
            let dy = 4.0;
            let dx = dy * aspect;
            let sign = if t < 0.0 { -1.0 } else { 1.0 };
            let leg = (((1.0 + 4.0 * sign * t).sqrt() - sign) as i64) & 3;
            match leg {
                0 => state.0 += dx,
                1 => state.1 += dy,
                2 => state.0 -= dx,
                _ => state.1 -= dy,
            }
            *state
        }
    }
}

impl LayoutEngine for SpiralLayout {
    fn layout(
        &self,
        words: &[WordFrequency],
        config: &LayoutConfig,
        font_size: &dyn Fn(&WordFrequency) -> f64,
    ) -> Vec<PlacedWord> {
        let width = config.width.max(1) as f64;
        let height = config.height.max(1) as f64;
        let padding = config.padding as f64;
        let aspect = width / height;
        let max_delta = (width * width + height * height).sqrt();

        let mut rng = StdRng::seed_from_u64(config.seed);

        let mut sized: Vec<(&WordFrequency, f64)> =
            words.iter().map(|word| (word, font_size(word))).collect();
        sized.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut placed: Vec<PlacedWord> = Vec::with_capacity(sized.len());
        let mut occupied: Vec<Bounds> = Vec::with_capacity(sized.len());

        for (word, size) in sized {
            if size.is_nan() || size <= 0.0 {
                log::debug!("skipping {:?} with font size {}", word.text, size);
                continue;
            }

            let (word_width, word_height) = text_extent(&word.text, size, config.rotation);
            let start_x = (width * (rng.gen_range(0.0..1.0) + 0.5)) / 2.0;
            let start_y = (height * (rng.gen_range(0.0..1.0) + 0.5)) / 2.0;
            let dt = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };

            let mut t = -dt;
            let mut state = (0.0, 0.0);
            let mut position = None;

            loop {
                t += dt;
                let (dx, dy) = spiral_point(config.spiral, t, aspect, &mut state);
                let (dx, dy) = (dx.trunc(), dy.trunc());
                if dx.abs().min(dy.abs()) >= max_delta {
                    break;
                }

                let cx = start_x + dx;
                let cy = start_y + dy;
                let bounds = Bounds::around(cx, cy, word_width, word_height, padding);
                if !bounds.inside(width, height) {
                    continue;
                }
                if occupied.iter().any(|other| other.overlaps(&bounds)) {
                    continue;
                }

                occupied.push(bounds);
                position = Some((cx, cy));
                break;
            }

            match position {
                Some((cx, cy)) => placed.push(PlacedWord {
                    text: word.text.clone(),
                    value: word.value,
                    size,
                    x: cx - width / 2.0,
                    y: cy - height / 2.0,
                    rotate: config.rotation.degrees(),
                }),
                None => log::debug!("no room for {:?} at size {:.1}", word.text, size),
            }
        }

        log::debug!("placed {} of {} words", placed.len(), words.len());
        placed
    }
}
