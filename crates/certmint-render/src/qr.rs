// SPDX-License-Identifier: MIT
//
// QR encoder — turns a verification URL into a fixed-size scannable PNG,
// with a best-effort logo overlay in the center.
//
// Codes are always encoded at error-correction level H so that the overlay
// damage stays within the correctable budget. The overlay itself composites
// pixels after encoding; it never re-encodes.

use std::io::Cursor;
use std::path::PathBuf;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use qrcode::{EcLevel, QrCode};
use tracing::{debug, instrument, warn};

use certmint_core::error::{CertmintError, Result};

/// Quiet zone around the code, in modules.
const QUIET_ZONE: u32 = 1;

/// Whether the logo made it onto the code. Both outcomes are success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branding {
    /// Logo composited at the center.
    Applied,
    /// Logo asset missing or undecodable; the code is undecorated.
    Skipped,
}

/// A successfully encoded QR code.
#[derive(Debug, Clone)]
pub struct EncodedQr {
    /// PNG bytes, `size` x `size` pixels.
    pub png: Vec<u8>,
    pub branding: Branding,
}

/// Encodes URLs into square QR PNGs of a fixed pixel size.
pub struct QrEncoder {
    /// Output side length in pixels.
    size: u32,
    /// Logo asset composited at 1/5 of the side length.
    logo_path: PathBuf,
}

impl QrEncoder {
    pub fn new(size: u32, logo_path: impl Into<PathBuf>) -> Self {
        Self {
            size,
            logo_path: logo_path.into(),
        }
    }

    /// Encode `text` at error-correction level H and rasterize it to a
    /// `size` x `size` PNG. Logo overlay failure degrades to an undecorated
    /// code and is never propagated.
    #[instrument(skip(self, text), fields(text_len = text.len(), size = self.size))]
    pub fn encode(&self, text: &str) -> Result<EncodedQr> {
        let code = QrCode::with_error_correction_level(text.as_bytes(), EcLevel::H)
            .map_err(|e| CertmintError::QrEncoding(e.to_string()))?;

        let mut canvas = self.rasterize(&code)?;

        let branding = match self.overlay_logo(&mut canvas) {
            Ok(()) => Branding::Applied,
            Err(e) => {
                warn!(
                    logo = %self.logo_path.display(),
                    error = %e,
                    "could not add logo to QR code"
                );
                Branding::Skipped
            }
        };

        let mut png = Vec::new();
        DynamicImage::ImageRgba8(canvas)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| CertmintError::QrEncoding(format!("PNG encode: {e}")))?;

        debug!(png_len = png.len(), ?branding, "QR code encoded");
        Ok(EncodedQr { png, branding })
    }

    /// Paint dark modules onto a white `size` x `size` canvas, centered,
    /// with a one-module quiet zone. Integer module scaling keeps the
    /// output pixel-deterministic.
    fn rasterize(&self, code: &QrCode) -> Result<RgbaImage> {
        let modules = code.width() as u32;
        let colors = code.to_colors();
        let total = modules + 2 * QUIET_ZONE;

        let scale = self.size / total;
        if scale == 0 {
            return Err(CertmintError::QrEncoding(format!(
                "target size {} too small for {} modules",
                self.size, total
            )));
        }
        let offset = (self.size - scale * total) / 2 + scale * QUIET_ZONE;

        let white = Rgba([255, 255, 255, 255]);
        let black = Rgba([0, 0, 0, 255]);
        let mut canvas = RgbaImage::from_pixel(self.size, self.size, white);

        for my in 0..modules {
            for mx in 0..modules {
                if colors[(my * modules + mx) as usize] == qrcode::Color::Dark {
                    let x0 = offset + mx * scale;
                    let y0 = offset + my * scale;
                    for y in y0..y0 + scale {
                        for x in x0..x0 + scale {
                            canvas.put_pixel(x, y, black);
                        }
                    }
                }
            }
        }

        Ok(canvas)
    }

    /// Composite the logo at 1/5 the code's side length, centered. Any
    /// failure here is reported to the caller, who downgrades it to a
    /// warning.
    fn overlay_logo(&self, canvas: &mut RgbaImage) -> Result<()> {
        let bytes = std::fs::read(&self.logo_path)?;
        let logo = image::load_from_memory(&bytes)
            .map_err(|e| CertmintError::QrEncoding(format!("logo decode: {e}")))?;

        let side = self.size / 5;
        let logo = logo
            .resize_exact(side, side, image::imageops::FilterType::Lanczos3)
            .to_rgba8();

        let corner = ((self.size - side) / 2) as i64;
        image::imageops::overlay(canvas, &logo, corner, corner);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://certs.example.com/api/certificates/0a1b2c3d/verify";

    fn missing_logo_encoder() -> QrEncoder {
        QrEncoder::new(300, "/nonexistent/logo.png")
    }

    fn decode(png: &[u8]) -> String {
        let luma = image::load_from_memory(png).expect("decode png").to_luma8();
        let mut prepared = rqrr::PreparedImage::prepare(luma);
        let grids = prepared.detect_grids();
        assert_eq!(grids.len(), 1, "expected exactly one code");
        let (_, content) = grids[0].decode().expect("decode qr");
        content
    }

    #[test]
    fn encodes_without_logo() {
        let encoded = missing_logo_encoder().encode(URL).expect("encode failed");
        assert_eq!(encoded.branding, Branding::Skipped);
        // PNG magic bytes.
        assert_eq!(&encoded.png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn output_is_fixed_size() {
        let encoded = missing_logo_encoder().encode(URL).expect("encode failed");
        let img = image::load_from_memory(&encoded.png).expect("decode failed");
        assert_eq!((img.width(), img.height()), (300, 300));
    }

    #[test]
    fn encoding_is_deterministic() {
        let encoder = missing_logo_encoder();
        let a = encoder.encode(URL).expect("encode failed");
        let b = encoder.encode(URL).expect("encode failed");
        assert_eq!(a.png, b.png);
    }

    #[test]
    fn decoding_recovers_the_encoded_url() {
        let encoded = missing_logo_encoder().encode(URL).expect("encode failed");
        assert_eq!(decode(&encoded.png), URL);
    }

    #[test]
    fn logo_is_applied_when_present() {
        let dir = tempfile::tempdir().expect("tempdir");
        let logo_path = dir.path().join("logo.png");
        let logo = RgbaImage::from_pixel(32, 32, Rgba([67, 97, 238, 255]));
        logo.save(&logo_path).expect("save logo");

        let encoder = QrEncoder::new(300, &logo_path);
        let branded = encoder.encode(URL).expect("encode failed");
        assert_eq!(branded.branding, Branding::Applied);

        let plain = missing_logo_encoder().encode(URL).expect("encode failed");
        assert_ne!(branded.png, plain.png, "overlay must change the bitmap");

        // Level-H correction absorbs the center damage.
        assert_eq!(decode(&branded.png), URL);
    }

    #[test]
    fn too_small_target_is_rejected() {
        let encoder = QrEncoder::new(10, "/nonexistent/logo.png");
        assert!(encoder.encode(URL).is_err());
    }
}
