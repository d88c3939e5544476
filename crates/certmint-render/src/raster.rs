// SPDX-License-Identifier: MIT
//
// Raster back-end — emits the shared certificate content model onto a fixed
// 800x600 RGB canvas and encodes it as PNG. Text is drawn with embedded
// DejaVu faces so output does not depend on host fonts; the result is
// byte-for-byte reproducible.

use std::io::Cursor;

use ab_glyph::FontRef;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use tracing::{debug, instrument};

use certmint_core::error::{CertmintError, Result};
use certmint_core::types::CertificateMetadata;

use crate::content::{self, DrawOp, Face, RASTER_LAYOUT};

static FONT_REGULAR: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");
static FONT_BOLD: &[u8] = include_bytes!("../assets/fonts/DejaVuSans-Bold.ttf");
static FONT_OBLIQUE: &[u8] = include_bytes!("../assets/fonts/DejaVuSans-Oblique.ttf");

/// Render the PNG artifact for one certificate.
#[instrument(skip(metadata), fields(certificate_id = %metadata.id))]
pub fn render_image(metadata: &CertificateMetadata) -> Result<Vec<u8>> {
    let layout = &RASTER_LAYOUT;
    let fonts = Fonts::load()?;

    let mut canvas = RgbImage::new(layout.page_width as u32, layout.page_height as u32);

    for instruction in content::certificate_content(metadata, layout) {
        match instruction {
            DrawOp::FillPage { color } => {
                draw_filled_rect_mut(
                    &mut canvas,
                    Rect::at(0, 0).of_size(layout.page_width as u32, layout.page_height as u32),
                    rgb(color),
                );
            }
            DrawOp::StrokeRect { frame, color } => {
                // Stroke centered on the frame rectangle, one hollow rect
                // per pixel of thickness.
                let t = frame.thickness as i32;
                for i in 0..t {
                    let inset = i - t / 2;
                    draw_hollow_rect_mut(
                        &mut canvas,
                        Rect::at(frame.x as i32 + inset, frame.y as i32 + inset).of_size(
                            (frame.width as i32 - 2 * inset) as u32,
                            (frame.height as i32 - 2 * inset) as u32,
                        ),
                        rgb(color),
                    );
                }
            }
            DrawOp::Text {
                text,
                anchor,
                size,
                face,
                color,
            } => {
                // Layout anchors are baselines; draw_text_mut wants the top
                // of the glyph box.
                let top = (anchor.y - size) as i32;
                draw_text_mut(
                    &mut canvas,
                    rgb(color),
                    anchor.x as i32,
                    top,
                    size,
                    fonts.get(face),
                    &text,
                );
            }
            DrawOp::QrImage { slot } => {
                let qr = image::load_from_memory(&metadata.qr_png)
                    .map_err(|e| CertmintError::ImageRender(format!("QR decode: {e}")))?;
                let side = slot.side as u32;
                let qr = qr
                    .resize_exact(side, side, image::imageops::FilterType::Lanczos3)
                    .to_rgb8();
                image::imageops::overlay(&mut canvas, &qr, slot.x as i64, slot.y as i64);
            }
        }
    }

    let mut png = Vec::new();
    DynamicImage::ImageRgb8(canvas)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| CertmintError::ImageRender(format!("PNG encode: {e}")))?;

    debug!(bytes = png.len(), "raster image rendered");
    Ok(png)
}

/// The three embedded typefaces, parsed once per render.
struct Fonts {
    regular: FontRef<'static>,
    bold: FontRef<'static>,
    oblique: FontRef<'static>,
}

impl Fonts {
    fn load() -> Result<Self> {
        Ok(Self {
            regular: parse_font(FONT_REGULAR)?,
            bold: parse_font(FONT_BOLD)?,
            oblique: parse_font(FONT_OBLIQUE)?,
        })
    }

    fn get(&self, face: Face) -> &FontRef<'static> {
        match face {
            Face::Regular => &self.regular,
            Face::Bold => &self.bold,
            Face::Oblique => &self.oblique,
        }
    }
}

fn parse_font(bytes: &'static [u8]) -> Result<FontRef<'static>> {
    FontRef::try_from_slice(bytes)
        .map_err(|e| CertmintError::ImageRender(format!("embedded font: {e}")))
}

fn rgb(color: content::Color) -> Rgb<u8> {
    Rgb([color.r, color.g, color.b])
}
