// SPDX-License-Identifier: MIT
//
// PDF back-end — emits the shared certificate content model as a single
// fixed-size page using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: the page is a `Vec<Op>` operation
// list serialised via `PdfDocument::save()`. Text uses the built-in
// Helvetica faces, so no fonts are embedded in the document.
//
// Rendering the same metadata twice must yield identical bytes. The library
// has three varying outputs, all pinned here: the document info timestamps
// (set to the epoch), the image resource name (fixed id instead of
// `add_image`'s generated one), and the trailer `/ID` pair (rewritten after
// save to the certificate id).

use printpdf::{
    BuiltinFont, Color as PdfColor, LinePoint, Mm, OffsetDateTime, Op, PaintMode, PdfDocument,
    PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Polygon, PolygonRing, Pt, RawImage, RawImageData,
    RawImageFormat, Rgb, TextItem, WindingOrder, XObject, XObjectId, XObjectTransform,
};
use tracing::{debug, instrument};

use certmint_core::error::{CertmintError, Result};
use certmint_core::types::{CertificateId, CertificateMetadata};

use crate::content::{self, DrawOp, Face, Frame, DOCUMENT_LAYOUT};

const MM_PER_PT: f32 = 25.4 / 72.0;

/// Render the single-page PDF artifact for one certificate.
#[instrument(skip(metadata), fields(certificate_id = %metadata.id))]
pub fn render_document(metadata: &CertificateMetadata) -> Result<Vec<u8>> {
    let layout = &DOCUMENT_LAYOUT;
    let mut doc = PdfDocument::new("Certificate of Completion");
    let epoch = OffsetDateTime::epoch();
    doc.metadata.info.creation_date = epoch;
    doc.metadata.info.modification_date = epoch;
    doc.metadata.info.metadata_date = epoch;
    let mut ops: Vec<Op> = Vec::new();

    for instruction in content::certificate_content(metadata, layout) {
        match instruction {
            DrawOp::FillPage { color } => {
                ops.push(Op::SetFillColor {
                    col: pdf_color(color),
                });
                ops.push(Op::DrawPolygon {
                    polygon: rect_polygon(
                        0.0,
                        0.0,
                        layout.page_width,
                        layout.page_height,
                        PaintMode::Fill,
                    ),
                });
            }
            DrawOp::StrokeRect { frame, color } => {
                let Frame {
                    x,
                    y,
                    width,
                    height,
                    thickness,
                } = frame;
                ops.push(Op::SetOutlineColor {
                    col: pdf_color(color),
                });
                ops.push(Op::SetOutlineThickness { pt: Pt(thickness) });
                ops.push(Op::DrawPolygon {
                    polygon: rect_polygon(x, y, width, height, PaintMode::Stroke),
                });
            }
            DrawOp::Text {
                text,
                anchor,
                size,
                face,
                color,
            } => {
                let font = builtin_font(face);
                ops.push(Op::StartTextSection);
                ops.push(Op::SetTextCursor {
                    pos: Point {
                        x: Pt(anchor.x),
                        y: Pt(anchor.y),
                    },
                });
                ops.push(Op::SetFillColor {
                    col: pdf_color(color),
                });
                ops.push(Op::SetFontSizeBuiltinFont {
                    size: Pt(size),
                    font,
                });
                ops.push(Op::WriteTextBuiltinFont {
                    items: vec![TextItem::Text(text)],
                    font,
                });
                ops.push(Op::EndTextSection);
            }
            DrawOp::QrImage { slot } => {
                let qr = image::load_from_memory(&metadata.qr_png)
                    .map_err(|e| CertmintError::PdfRender(format!("QR decode: {e}")))?;
                let width = qr.width() as usize;
                let height = qr.height() as usize;
                let rgb = qr.to_rgb8();

                let raw = RawImage {
                    pixels: RawImageData::U8(rgb.into_raw()),
                    width,
                    height,
                    data_format: RawImageFormat::RGB8,
                    tag: Vec::new(),
                };
                // `add_image` generates a random resource name; register the
                // bitmap under a fixed one instead.
                let xobject_id = XObjectId("QR0".to_string());
                doc.resources
                    .xobjects
                    .map
                    .insert(xobject_id.clone(), XObject::Image(raw));

                // Pick the DPI that maps the bitmap's pixel width onto the
                // slot's point width, so no scale factor is needed.
                let dpi = width as f32 * 72.0 / slot.side;
                ops.push(Op::UseXobject {
                    id: xobject_id,
                    transform: XObjectTransform {
                        translate_x: Some(Pt(slot.x)),
                        translate_y: Some(Pt(slot.y)),
                        scale_x: None,
                        scale_y: None,
                        dpi: Some(dpi),
                        rotate: None,
                    },
                });
            }
        }
    }

    let page = PdfPage::new(
        Mm(layout.page_width * MM_PER_PT),
        Mm(layout.page_height * MM_PER_PT),
        ops,
    );
    doc.with_pages(vec![page]);

    let mut warnings: Vec<PdfWarnMsg> = Vec::new();
    let mut output = doc.save(&PdfSaveOptions::default(), &mut warnings);
    pin_document_id(&mut output, metadata.id)?;

    debug!(bytes = output.len(), "PDF rendered");
    Ok(output)
}

/// Overwrite the serializer's generated trailer `/ID` pair with the
/// certificate id, keeping the byte length unchanged so object offsets stay
/// valid. The serializer emits the pair as two 32-character literals; the
/// certificate id in simple form is exactly 32 hex characters.
fn pin_document_id(bytes: &mut [u8], id: CertificateId) -> Result<()> {
    let pin = id.0.simple().to_string();

    let trailer = bytes
        .windows(3)
        .rposition(|w| w == b"/ID")
        .ok_or_else(|| CertmintError::PdfRender("no /ID entry in trailer".into()))?;

    let mut cursor = trailer;
    for _ in 0..2 {
        let open = bytes[cursor..]
            .iter()
            .position(|&b| b == b'(')
            .map(|i| cursor + i)
            .filter(|&i| bytes.get(i + 33) == Some(&b')'))
            .ok_or_else(|| CertmintError::PdfRender("malformed /ID literal".into()))?;
        bytes[open + 1..open + 33].copy_from_slice(pin.as_bytes());
        cursor = open + 33;
    }
    Ok(())
}

fn builtin_font(face: Face) -> BuiltinFont {
    match face {
        Face::Regular => BuiltinFont::Helvetica,
        Face::Bold => BuiltinFont::HelveticaBold,
        Face::Oblique => BuiltinFont::HelveticaOblique,
    }
}

fn pdf_color(color: content::Color) -> PdfColor {
    PdfColor::Rgb(Rgb {
        r: color.r as f32 / 255.0,
        g: color.g as f32 / 255.0,
        b: color.b as f32 / 255.0,
        icc_profile: None,
    })
}

/// Axis-aligned rectangle as a single-ring polygon in page points.
fn rect_polygon(x: f32, y: f32, width: f32, height: f32, mode: PaintMode) -> Polygon {
    let corners = [
        (x, y),
        (x + width, y),
        (x + width, y + height),
        (x, y + height),
    ];
    Polygon {
        rings: vec![PolygonRing {
            points: corners
                .into_iter()
                .map(|(px, py)| LinePoint {
                    p: Point {
                        x: Pt(px),
                        y: Pt(py),
                    },
                    bezier: false,
                })
                .collect(),
        }],
        mode,
        winding_order: WindingOrder::NonZero,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qr::QrEncoder;
    use certmint_core::CertificateId;
    use chrono::NaiveDate;

    fn metadata() -> CertificateMetadata {
        let url = "https://certs.example.com/api/certificates/test/verify";
        let qr = QrEncoder::new(300, "/nonexistent/logo.png")
            .encode(url)
            .expect("qr encode");
        CertificateMetadata {
            id: CertificateId::new(),
            participant_name: "Ada Lovelace".into(),
            course_name: "Systems Design".into(),
            completion_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            issuer_name: "Acme Academy".into(),
            issue_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            verification_url: url.into(),
            qr_png: qr.png,
        }
    }

    #[test]
    fn renders_a_pdf() {
        let bytes = render_document(&metadata()).expect("render failed");
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 1000, "suspiciously small PDF");
    }

    #[test]
    fn rendering_is_stable() {
        let meta = metadata();
        let a = render_document(&meta).expect("render failed");
        std::thread::sleep(std::time::Duration::from_millis(1100));
        let b = render_document(&meta).expect("render failed");
        assert_eq!(a, b, "same metadata must yield identical bytes");
    }

    #[test]
    fn document_id_is_the_certificate_id() {
        let meta = metadata();
        let bytes = render_document(&meta).expect("render failed");

        let pin = meta.id.0.simple().to_string();
        let needle = format!("({pin})");
        let hits = bytes
            .windows(needle.len())
            .filter(|w| *w == needle.as_bytes())
            .count();
        assert_eq!(hits, 2, "trailer /ID pair must carry the certificate id");
    }
}
