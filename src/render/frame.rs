use crate::foundation::error::{SpotlightError, SpotlightResult};

/// Captured screen pixels as straight-alpha RGBA8.
///
/// Dimensions are validated at construction (non-zero, at most `u16::MAX` per side, tightly
/// packed), so rendering from a snapshot cannot fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Snapshot {
    /// Wrap straight-alpha RGBA8 bytes, row-major and tightly packed.
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> SpotlightResult<Self> {
        if width == 0 || height == 0 {
            return Err(SpotlightError::validation("snapshot must be non-empty"));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(SpotlightError::validation(
                "snapshot dimensions exceed u16::MAX",
            ));
        }
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if rgba.len() != expected {
            return Err(SpotlightError::validation(format!(
                "snapshot byte length mismatch (expected {expected}, got {})",
                rgba.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// Snapshot filled with one straight-alpha color.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> SpotlightResult<Self> {
        let bytes = rgba.repeat((width as usize).saturating_mul(height as usize));
        Self::new(width, height, bytes)
    }

    pub fn from_rgba_image(img: image::RgbaImage) -> SpotlightResult<Self> {
        let (w, h) = img.dimensions();
        Self::new(w, h, img.into_raw())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.rgba
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.rgba
    }
}

/// Finished overlay in premultiplied RGBA8, same size as the snapshot it was rendered from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayImage {
    pub width: u32,
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Always `true`: the renderer outputs premultiplied alpha.
    pub premultiplied: bool,
}

impl OverlayImage {
    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Convert to a straight-alpha image for encoding.
    pub fn to_rgba_image(&self) -> SpotlightResult<image::RgbaImage> {
        let mut bytes = self.data.clone();
        if self.premultiplied {
            crate::render::pixels::unpremultiply_rgba8_in_place(&mut bytes);
        }
        image::RgbaImage::from_raw(self.width, self.height, bytes)
            .ok_or_else(|| SpotlightError::validation("overlay byte length mismatch"))
    }
}
