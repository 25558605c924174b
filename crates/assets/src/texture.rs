use std::path::Path;

use crate::AssetError;

/// Decoded RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureData {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureData {
    /// Decode an image file (PNG or JPEG) into RGBA8.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|e| AssetError::Image {
                path: path.display().to_string(),
                source: e,
            })?
            .to_rgba8();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("texture")
            .to_string();
        tracing::debug!("decoded {name}: {}x{}", image.width(), image.height());
        Ok(Self {
            name,
            width: image.width(),
            height: image.height(),
            rgba: image.into_raw(),
        })
    }

    /// Size to display at when at most `max_width` pixels are available.
    /// Narrows the image while keeping its aspect ratio; never enlarges.
    pub fn fit_width(&self, max_width: f32) -> [f32; 2] {
        let (w, h) = (self.width as f32, self.height as f32);
        if w > max_width && w > 0.0 {
            [max_width, max_width * h / w]
        } else {
            [w, h]
        }
    }
}
