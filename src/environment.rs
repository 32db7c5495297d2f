use anyhow::{bail, Context, Result};
use glam::Vec3;
use half::f16;
use image::imageops::{self, FilterType};
use image::Rgba32FImage;

use crate::math::{fit_within, hex_to_linear_rgb};

pub const BACKGROUND_COLOR: u32 = 0x111111;

/// Fixed light rig for interior scenes
#[derive(Debug, Clone, PartialEq)]
pub struct Lighting {
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
    pub sky_color: [f32; 3],
    pub ground_color: [f32; 3],
    pub hemisphere_intensity: f32,
    pub directional_color: [f32; 3],
    pub directional_intensity: f32,
    pub directional_position: Vec3,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient_color: hex_to_linear_rgb(0xffffff),
            ambient_intensity: 1.5,
            sky_color: hex_to_linear_rgb(0xffffff),
            ground_color: hex_to_linear_rgb(0x444444),
            hemisphere_intensity: 2.0,
            directional_color: hex_to_linear_rgb(0xffffff),
            directional_intensity: 2.0,
            directional_position: Vec3::new(5.0, 10.0, 7.5),
        }
    }
}

/// Background and image-based lighting settings
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    /// Linear RGB clear colour used when no HDRI is shown
    pub background: [f32; 3],
    /// Path or http(s) URL of an equirectangular image
    pub hdri: Option<String>,
    pub exposure: f32,
    /// Scale of the HDRI's contribution to ambient lighting
    pub intensity: f32,
    /// ACES filmic tone mapping; linear output clamps when off
    pub tone_mapping: bool,
}

impl Environment {
    /// Tone mapping (and with it exposure) only applies once an HDRI is bound
    pub fn tone_mapping_active(&self, has_hdri: bool) -> bool {
        self.tone_mapping && has_hdri
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            background: hex_to_linear_rgb(BACKGROUND_COLOR),
            hdri: None,
            exposure: 1.0,
            intensity: 1.0,
            tone_mapping: false,
        }
    }
}

/// Decoded equirectangular image as RGBA16F texels
pub struct HdriImage {
    pub width: u32,
    pub height: u32,
    /// f16 bit patterns, four per texel
    pub texels: Vec<u16>,
}

impl HdriImage {
    pub fn from_rgba32f(width: u32, height: u32, pixels: &[f32]) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            bail!(
                "HDRI pixel buffer has {} floats, expected {} for {}x{}",
                pixels.len(),
                expected,
                width,
                height
            );
        }
        let texels = pixels.iter().map(|&c| f16::from_f32(c).to_bits()).collect();
        Ok(Self { width, height, texels })
    }

    /// 1x1 image of a single linear colour
    pub fn solid(color: [f32; 3]) -> Self {
        let [r, g, b] = color;
        Self {
            width: 1,
            height: 1,
            texels: [r, g, b, 1.0].iter().map(|&c| f16::from_f32(c).to_bits()).collect(),
        }
    }

    pub fn bytes_per_row(&self) -> u32 {
        self.width * 8
    }
}

pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Read raw image bytes from a file path or URL
fn fetch_bytes(source: &str) -> Result<Vec<u8>> {
    if is_remote(source) {
        log::info!("Downloading HDRI: {}", source);
        let response = reqwest::blocking::get(source)
            .with_context(|| format!("Failed to request HDRI: {}", source))?
            .error_for_status()
            .with_context(|| format!("HDRI request rejected: {}", source))?;
        let bytes = response
            .bytes()
            .with_context(|| format!("Failed to download HDRI: {}", source))?;
        Ok(bytes.to_vec())
    } else {
        std::fs::read(source).with_context(|| format!("Failed to read HDRI: {:?}", source))
    }
}

/// Shrink an image whose sides exceed `max_dimension`, keeping its aspect ratio
pub fn fit_rgba32f(image: Rgba32FImage, max_dimension: u32) -> Rgba32FImage {
    let (width, height) = image.dimensions();
    let (fit_width, fit_height) = fit_within(width, height, max_dimension);
    if (fit_width, fit_height) == (width, height) {
        return image;
    }

    log::warn!(
        "HDRI {}x{} exceeds the {} texel limit, downscaling to {}x{}",
        width,
        height,
        max_dimension,
        fit_width,
        fit_height
    );

    // The resize filters clamp float samples to [0, 1]; keep radiance above 1 intact
    let peak = image
        .as_raw()
        .iter()
        .copied()
        .filter(|c| c.is_finite())
        .fold(1.0f32, f32::max);
    let mut normalized = image;
    normalized.iter_mut().for_each(|c| *c = if c.is_finite() { *c / peak } else { 0.0 });

    let mut resized = imageops::resize(&normalized, fit_width, fit_height, FilterType::Triangle);
    resized.iter_mut().for_each(|c| *c *= peak);
    resized
}

/// Load and decode an equirectangular environment image no larger than `max_dimension`
pub fn load_hdri(source: &str, max_dimension: u32) -> Result<HdriImage> {
    let bytes = fetch_bytes(source)?;
    let image = image::load_from_memory(&bytes)
        .with_context(|| format!("Failed to decode HDRI: {}", source))?
        .into_rgba32f();
    let image = fit_rgba32f(image, max_dimension);

    let (width, height) = image.dimensions();
    log::info!("HDRI loaded: {}x{}", width, height);
    HdriImage::from_rgba32f(width, height, image.as_raw())
}
