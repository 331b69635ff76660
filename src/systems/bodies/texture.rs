//! Decodes bitmap files into plain pixel buffers for the body textures
//! Buffers follow the BMP layout: RGB, 3 bytes per pixel, rows padded to 4 bytes
//! Conversion into a bevy Image happens once, when the body is created

use std::path::Path;

use anyhow::{Context, Result, ensure};
use bevy::image::{ImageAddressMode, ImageFilterMode, ImageSampler, ImageSamplerDescriptor};
use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// decoded pixels plus extents
#[derive(Clone, Debug, PartialEq)]
pub struct TextureImage {
    pub cols: u32,
    pub rows: u32,
    pub pixels: Vec<u8>,
}

/// bytes per row, including padding to a 4 byte boundary
pub fn row_stride(cols: u32) -> usize {
    (cols as usize * 3 + 3) & !3
}

impl TextureImage {
    /// pack tightly packed RGB rows into the padded layout
    pub fn from_rgb(cols: u32, rows: u32, rgb: &[u8]) -> Result<Self> {
        let packed = cols as usize * 3;
        ensure!(cols > 0 && rows > 0, "empty image ({cols}x{rows})");
        ensure!(
            rgb.len() == packed * rows as usize,
            "expected {} bytes of RGB data, got {}",
            packed * rows as usize,
            rgb.len()
        );

        let stride = row_stride(cols);
        let mut pixels = vec![0; stride * rows as usize];
        for (dst, src) in pixels.chunks_exact_mut(stride).zip(rgb.chunks_exact(packed)) {
            dst[..packed].copy_from_slice(src);
        }

        Ok(Self { cols, rows, pixels })
    }

    /// repeat-wrapped, linear filtered GPU image
    pub fn to_image(&self) -> Image {
        let stride = row_stride(self.cols);
        let mut rgba = Vec::with_capacity(self.cols as usize * self.rows as usize * 4);
        for row in self.pixels.chunks_exact(stride) {
            for px in row[..self.cols as usize * 3].chunks_exact(3) {
                rgba.extend_from_slice(&[px[0], px[1], px[2], 255]);
            }
        }

        let mut image = Image::new(
            Extent3d {
                width: self.cols,
                height: self.rows,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            rgba,
            TextureFormat::Rgba8UnormSrgb,
            RenderAssetUsages::RENDER_WORLD,
        );
        image.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
            address_mode_u: ImageAddressMode::Repeat,
            address_mode_v: ImageAddressMode::Repeat,
            mag_filter: ImageFilterMode::Linear,
            min_filter: ImageFilterMode::Linear,
            ..default()
        });
        image
    }
}

pub fn load_texture(path: &Path) -> Result<TextureImage> {
    let decoded = image::open(path)
        .with_context(|| format!("failed to load texture {}", path.display()))?
        .to_rgb8();
    let (cols, rows) = decoded.dimensions();

    TextureImage::from_rgb(cols, rows, decoded.as_raw())
        .with_context(|| format!("bad pixel data in {}", path.display()))
}

// sparse white/blue-ish points on black
// used when the starfield bitmap is missing
pub fn generate_starfield(cols: u32, rows: u32, seed: u64) -> TextureImage {
    let mut rng = StdRng::seed_from_u64(seed);
    let stride = row_stride(cols);
    let mut pixels = vec![0u8; stride * rows as usize];

    for row in pixels.chunks_exact_mut(stride) {
        for px in row[..cols as usize * 3].chunks_exact_mut(3) {
            if rng.random::<f32>() < 0.004 {
                let brightness: u8 = rng.random_range(120..=255);
                let tint: u8 = rng.random_range(0..=40);
                px[0] = brightness.saturating_sub(tint);
                px[1] = brightness.saturating_sub(tint / 2);
                px[2] = brightness;
            }
        }
    }

    TextureImage { cols, rows, pixels }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(image: &TextureImage, col: u32, row: u32) -> [u8; 3] {
        let i = row as usize * row_stride(image.cols) + col as usize * 3;
        [image.pixels[i], image.pixels[i + 1], image.pixels[i + 2]]
    }

    #[test]
    fn rows_pad_to_four_bytes() {
        assert_eq!(row_stride(1), 4);
        assert_eq!(row_stride(4), 12);
        assert_eq!(row_stride(5), 16);
    }

    #[test]
    fn from_rgb_keeps_pixels_in_place() {
        // 3x2, stride 12 with 3 bytes of padding per row
        let rgb: Vec<u8> = (0..18).collect();
        let image = TextureImage::from_rgb(3, 2, &rgb).unwrap();

        assert_eq!(image.pixels.len(), 24);
        assert_eq!(pixel(&image, 0, 0), [0, 1, 2]);
        assert_eq!(pixel(&image, 2, 1), [15, 16, 17]);
        assert_eq!(&image.pixels[9..12], &[0, 0, 0]);
    }

    #[test]
    fn from_rgb_rejects_short_buffers() {
        assert!(TextureImage::from_rgb(2, 2, &[0; 5]).is_err());
        assert!(TextureImage::from_rgb(0, 2, &[]).is_err());
    }

    #[test]
    fn gpu_image_drops_padding() {
        let rgb: Vec<u8> = (0..18).collect();
        let image = TextureImage::from_rgb(3, 2, &rgb).unwrap().to_image();

        let data = image.data.as_ref().unwrap();
        assert_eq!(data.len(), 3 * 2 * 4);
        assert_eq!(&data[12..16], &[9, 10, 11, 255]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_texture(Path::new("no/such/planet.bmp")).unwrap_err();
        assert!(format!("{err:#}").contains("planet.bmp"));
    }

    #[test]
    fn starfield_is_seeded() {
        let a = generate_starfield(64, 32, 7);
        let b = generate_starfield(64, 32, 7);
        assert_eq!(a, b);
        assert_eq!(a.pixels.len(), row_stride(64) * 32);
    }
}
