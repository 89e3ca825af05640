// ============================================================
// Layer 4 — Render Image Preprocessing (vision)
// ============================================================
// CLIP-style preprocessing of garment renders:
//
//   1. Resize so the shortest edge equals `size` (bicubic)
//   2. Center-crop to `crop_size`
//   3. Rescale pixels by `rescale_factor` (1/255)
//   4. Normalize per channel: (x - mean) / std
//   5. Lay out as CHW f32
//
// The settings come from a HuggingFace `preprocessor_config.json`
// located at the vision-tower identifier (a directory holding the
// file, or the file itself). When there is none, the standard CLIP
// statistics are used with the configured image size.

use image::{imageops, imageops::FilterType, RgbImage};
use serde::Deserialize;
use std::{fs, path::Path};

use crate::domain::error::{DatasetError, Result};
use crate::domain::sample::ImageTensor;
use crate::domain::traits::ImagePreprocessor;

pub const CLIP_MEAN: [f32; 3] = [0.481_454_66, 0.457_827_5, 0.408_210_73];
pub const CLIP_STD:  [f32; 3] = [0.268_629_54, 0.261_302_58, 0.275_777_11];
pub const CLIP_SIZE: u32 = 224;

const CONFIG_FILE: &str = "preprocessor_config.json";

// ─── Config file shape ────────────────────────────────────────────────────────

/// `size` / `crop_size` are written either as a bare integer or as
/// an object, depending on the transformers version.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum SizeSpec {
    Square(u32),
    ShortestEdge { shortest_edge: u32 },
    HeightWidth { height: u32, width: u32 },
}

impl SizeSpec {
    fn shortest_edge(self) -> u32 {
        match self {
            SizeSpec::Square(s) | SizeSpec::ShortestEdge { shortest_edge: s } => s,
            SizeSpec::HeightWidth { height, width } => height.min(width),
        }
    }

    fn height_width(self) -> (u32, u32) {
        match self {
            SizeSpec::Square(s) | SizeSpec::ShortestEdge { shortest_edge: s } => (s, s),
            SizeSpec::HeightWidth { height, width } => (height, width),
        }
    }
}

fn yes() -> bool {
    true
}

fn default_rescale() -> f32 {
    1.0 / 255.0
}

#[derive(Debug, Clone, Deserialize)]
struct RawClipConfig {
    #[serde(default)]
    size: Option<SizeSpec>,
    #[serde(default)]
    crop_size: Option<SizeSpec>,
    #[serde(default = "yes")]
    do_resize: bool,
    #[serde(default = "yes")]
    do_center_crop: bool,
    #[serde(default = "yes")]
    do_rescale: bool,
    #[serde(default = "yes")]
    do_normalize: bool,
    #[serde(default = "default_rescale")]
    rescale_factor: f32,
    #[serde(default)]
    image_mean: Option<[f32; 3]>,
    #[serde(default)]
    image_std: Option<[f32; 3]>,
}

// ─── ClipImageProcessor ───────────────────────────────────────────────────────

/// CLIP image preprocessing with HuggingFace-compatible settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipImageProcessor {
    pub shortest_edge:  u32,
    pub crop_height:    u32,
    pub crop_width:     u32,
    pub do_resize:      bool,
    pub do_center_crop: bool,
    pub do_rescale:     bool,
    pub do_normalize:   bool,
    pub rescale_factor: f32,
    pub mean:           [f32; 3],
    pub std:            [f32; 3],
}

impl ClipImageProcessor {
    /// Standard CLIP settings at a given square size.
    pub fn with_size(size: u32) -> Self {
        Self {
            shortest_edge:  size,
            crop_height:    size,
            crop_width:     size,
            do_resize:      true,
            do_center_crop: true,
            do_rescale:     true,
            do_normalize:   true,
            rescale_factor: default_rescale(),
            mean:           CLIP_MEAN,
            std:            CLIP_STD,
        }
    }

    /// Resolve a vision-tower identifier to a processor.
    ///
    /// `default_size` applies when the identifier has no config file.
    pub fn from_pretrained(vision_tower: &str, default_size: u32) -> Result<Self> {
        let path = Path::new(vision_tower);
        let config_path = if path.is_file() {
            Some(path.to_path_buf())
        } else {
            Some(path.join(CONFIG_FILE)).filter(|p| p.is_file())
        };

        match config_path {
            Some(p) => {
                let processor = Self::from_config_file(&p, default_size)?;
                tracing::info!(
                    "Loaded image processor from '{}' (crop {}x{})",
                    p.display(),
                    processor.crop_height,
                    processor.crop_width
                );
                Ok(processor)
            }
            None => {
                tracing::info!(
                    "No {} for '{}', using CLIP defaults at {}px",
                    CONFIG_FILE,
                    vision_tower,
                    default_size
                );
                Ok(Self::with_size(default_size))
            }
        }
    }

    fn from_config_file(path: &Path, default_size: u32) -> Result<Self> {
        let raw: RawClipConfig = serde_json::from_str(&fs::read_to_string(path)?)?;

        let shortest_edge = raw.size.map_or(default_size, SizeSpec::shortest_edge);
        let (crop_height, crop_width) = raw
            .crop_size
            .map_or((shortest_edge, shortest_edge), SizeSpec::height_width);

        if shortest_edge == 0 || crop_height == 0 || crop_width == 0 {
            return Err(DatasetError::invalid_config(format!(
                "image processor sizes must be positive in '{}'",
                path.display()
            )));
        }

        Ok(Self {
            shortest_edge,
            crop_height,
            crop_width,
            do_resize:      raw.do_resize,
            do_center_crop: raw.do_center_crop,
            do_rescale:     raw.do_rescale,
            do_normalize:   raw.do_normalize,
            rescale_factor: raw.rescale_factor,
            mean:           raw.image_mean.unwrap_or(CLIP_MEAN),
            std:            raw.image_std.unwrap_or(CLIP_STD),
        })
    }

    fn resize_shortest_edge(&self, image: &RgbImage) -> RgbImage {
        let (w, h) = image.dimensions();
        let short  = w.min(h).max(1);
        let scale  = f64::from(self.shortest_edge) / f64::from(short);
        let new_w  = ((f64::from(w) * scale).round() as u32).max(1);
        let new_h  = ((f64::from(h) * scale).round() as u32).max(1);
        imageops::resize(image, new_w, new_h, FilterType::CatmullRom)
    }

    fn center_crop(&self, image: &RgbImage) -> RgbImage {
        let (w, h) = image.dimensions();
        if w < self.crop_width || h < self.crop_height {
            return imageops::resize(image, self.crop_width, self.crop_height, FilterType::CatmullRom);
        }
        let x = (w - self.crop_width) / 2;
        let y = (h - self.crop_height) / 2;
        imageops::crop_imm(image, x, y, self.crop_width, self.crop_height).to_image()
    }
}

impl Default for ClipImageProcessor {
    fn default() -> Self {
        Self::with_size(CLIP_SIZE)
    }
}

impl ImagePreprocessor for ClipImageProcessor {
    fn preprocess(&self, image: &RgbImage) -> Result<ImageTensor> {
        let mut img = image.clone();
        if self.do_resize {
            img = self.resize_shortest_edge(&img);
        }
        if self.do_center_crop {
            img = self.center_crop(&img);
        } else if img.dimensions() != (self.crop_width, self.crop_height) {
            img = imageops::resize(&img, self.crop_width, self.crop_height, FilterType::CatmullRom);
        }

        let (w, h) = (img.width() as usize, img.height() as usize);
        let plane  = w * h;
        let mut data = vec![0.0f32; 3 * plane];

        for (x, y, pixel) in img.enumerate_pixels() {
            let offset = y as usize * w + x as usize;
            for c in 0..3 {
                let mut v = f32::from(pixel.0[c]);
                if self.do_rescale {
                    v *= self.rescale_factor;
                }
                if self.do_normalize {
                    v = (v - self.mean[c]) / self.std[c];
                }
                data[c * plane + offset] = v;
            }
        }

        Ok(ImageTensor { channels: 3, height: h, width: w, data })
    }

    fn output_shape(&self) -> [usize; 3] {
        [3, self.crop_height as usize, self.crop_width as usize]
    }
}

/// Decode an image file to 8-bit RGB.
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|e| DatasetError::image(path, e.to_string()))?;
    Ok(img.to_rgb8())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid(w: u32, h: u32, rgb: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(w, h, Rgb(rgb))
    }

    #[test]
    fn test_output_shape_matches_crop() {
        let p = ClipImageProcessor::with_size(32);
        let t = p.preprocess(&solid(80, 40, [10, 20, 30])).unwrap();
        assert_eq!(t.shape(), [3, 32, 32]);
        assert_eq!(p.output_shape(), [3, 32, 32]);
    }

    #[test]
    fn test_normalization_values() {
        let p = ClipImageProcessor::with_size(8);
        let t = p.preprocess(&solid(8, 8, [255, 0, 255])).unwrap();
        let plane = 64;
        let red   = (1.0 - CLIP_MEAN[0]) / CLIP_STD[0];
        let green = (0.0 - CLIP_MEAN[1]) / CLIP_STD[1];
        assert!((t.data[0] - red).abs() < 1e-4);
        assert!((t.data[plane] - green).abs() < 1e-4);
    }

    #[test]
    fn test_center_crop_keeps_middle() {
        // left half black, right half white; after crop of a wide image
        // the centre column straddles both halves
        let mut img = solid(40, 10, [0, 0, 0]);
        for x in 20..40 {
            for y in 0..10 {
                img.put_pixel(x, y, Rgb([255, 255, 255]));
            }
        }
        let p = ClipImageProcessor {
            do_resize: false,
            do_normalize: false,
            ..ClipImageProcessor::with_size(10)
        };
        let t = p.preprocess(&img).unwrap();
        assert_eq!(t.shape(), [3, 10, 10]);
        assert_eq!(t.data[0], 0.0);
        assert!((t.data[9] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_pretrained_without_config_uses_defaults() {
        let p = ClipImageProcessor::from_pretrained("openai/clip-vit-large-patch14", 336).unwrap();
        assert_eq!(p.output_shape(), [3, 336, 336]);
        assert_eq!(p.mean, CLIP_MEAN);
    }

    #[test]
    fn test_from_pretrained_reads_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{
                "size": {"shortest_edge": 64},
                "crop_size": {"height": 48, "width": 56},
                "image_mean": [0.5, 0.5, 0.5],
                "image_std": [0.5, 0.5, 0.5]
            }"#,
        )
        .unwrap();

        let p = ClipImageProcessor::from_pretrained(dir.path().to_str().unwrap(), 224).unwrap();
        assert_eq!(p.shortest_edge, 64);
        assert_eq!(p.output_shape(), [3, 48, 56]);
        assert_eq!(p.std, [0.5; 3]);
    }

    #[test]
    fn test_load_rgb_missing_file() {
        let err = load_rgb(Path::new("/no/such/render.png")).unwrap_err();
        assert!(matches!(err, DatasetError::Image { .. }));
    }
}
