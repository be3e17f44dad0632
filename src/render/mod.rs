use crate::assets::store::PreparedFont;

pub(crate) mod cpu;

/// Rendered frame, row-major RGBA8.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes, top row first.
    pub data: Vec<u8>,
    /// Whether color channels in `data` are premultiplied by alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel `(x, y)` as stored. `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        match self.data.get(i..i + 4) {
            Some(&[r, g, b, a]) => Some([r, g, b, a]),
            _ => None,
        }
    }

    /// Straight-alpha copy of the pixel data, as image encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if !self.premultiplied {
            return out;
        }
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 {
                px[..3].fill(0);
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// Inputs the renderer needs beyond the scene itself.
#[derive(Clone, Debug, Default)]
pub struct RenderSettings {
    /// Face used for text labels. Labels are skipped when absent.
    pub font: Option<PreparedFont>,
}
