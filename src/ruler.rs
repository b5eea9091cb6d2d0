use crate::error::AssetError;
use crate::layout::{RULER_STEP, RULER_ZERO_POS};
use egui::{Color32, ColorImage, Vec2, vec2};
use std::path::Path;

/// Highest unit tick on the generated sprite; covers the largest possible sum
pub const RULER_UNITS: u32 = 14;

const SPRITE_HEIGHT: usize = 52;
const BASELINE_Y: usize = 20;
const MAJOR_TICK: (usize, usize) = (10, 30);
const MINOR_TICK: (usize, usize) = (15, 25);

/// Pixel image of the number line
pub struct RulerSprite {
    image: ColorImage,
    /// Whether the renderer still has to print the unit numbers
    needs_labels: bool,
}

impl std::fmt::Debug for RulerSprite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RulerSprite")
            .field("size", &self.image.size)
            .field("needs_labels", &self.needs_labels)
            .finish()
    }
}

impl RulerSprite {
    /// Draws baseline, unit ticks and half-unit ticks, leaving the numbers out
    pub fn generated(color: Color32) -> Self {
        let width = (2.0 * RULER_ZERO_POS + RULER_UNITS as f32 * RULER_STEP) as usize;
        let mut image = ColorImage::new([width, SPRITE_HEIGHT], Color32::TRANSPARENT);

        let zero = RULER_ZERO_POS as usize;
        let step = RULER_STEP as usize;
        let end = zero + RULER_UNITS as usize * step;

        for x in zero..=end {
            for y in BASELINE_Y..BASELINE_Y + 2 {
                image[(x, y)] = color;
            }
        }
        for unit in 0..=RULER_UNITS as usize {
            let x = zero + unit * step;
            for y in MAJOR_TICK.0..MAJOR_TICK.1 {
                image[(x, y)] = color;
            }
            if unit < RULER_UNITS as usize {
                for y in MINOR_TICK.0..MINOR_TICK.1 {
                    image[(x + step / 2, y)] = color;
                }
            }
        }

        Self {
            image,
            needs_labels: true,
        }
    }

    /// Decodes a prepared sprite; its zero tick must sit at the standard offset
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let decoded = image::load_from_memory(bytes)?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(AssetError::InvalidDimensions { width, height });
        }
        log::debug!("Decoded ruler sprite: {}x{}", width, height);

        let image = ColorImage::from_rgba_unmultiplied([width as usize, height as usize], rgba.as_raw());
        Ok(Self {
            image,
            needs_labels: false,
        })
    }

    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let bytes = std::fs::read(path).map_err(|source| AssetError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_bytes(&bytes)
    }

    pub fn size(&self) -> Vec2 {
        vec2(self.image.size[0] as f32, self.image.size[1] as f32)
    }

    pub fn needs_labels(&self) -> bool {
        self.needs_labels
    }

    pub fn image(&self) -> &ColorImage {
        &self.image
    }

    pub fn into_image(self) -> ColorImage {
        self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_sprite_has_ticks_at_ruler_units() {
        let sprite = RulerSprite::generated(Color32::BLACK);
        assert_eq!(sprite.size(), vec2(616.0, 52.0));
        assert!(sprite.needs_labels());

        let image = sprite.image();
        assert_eq!(image[(35, MAJOR_TICK.0)], Color32::BLACK);
        assert_eq!(image[(35 + 39, MAJOR_TICK.0)], Color32::BLACK);
        assert_eq!(image[(36, MAJOR_TICK.0)], Color32::TRANSPARENT);
        assert_eq!(image[(35 + 19, MINOR_TICK.0)], Color32::BLACK);
        assert_eq!(image[(0, BASELINE_Y)], Color32::TRANSPARENT);
    }

    #[test]
    fn test_decoding_garbage_fails() {
        assert!(matches!(
            RulerSprite::from_bytes(b"not a png"),
            Err(AssetError::Decode(_))
        ));
    }

    #[test]
    fn test_png_round_trip_keeps_size() {
        let mut png = Vec::new();
        let img = image::RgbaImage::from_pixel(40, 10, image::Rgba([0, 0, 0, 255]));
        img.write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let sprite = RulerSprite::from_bytes(&png).unwrap();
        assert_eq!(sprite.size(), vec2(40.0, 10.0));
        assert!(!sprite.needs_labels());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            RulerSprite::load(Path::new("/definitely/not/ruler.png")),
            Err(AssetError::Read { .. })
        ));
    }
}
