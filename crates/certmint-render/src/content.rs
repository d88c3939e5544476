// SPDX-License-Identifier: MIT
//
// Shared certificate content model.
//
// Both back-ends consume the same ordered list of draw instructions built
// here, so wording, colors, and date formatting cannot drift between the PDF
// and the raster rendition. Only geometry differs, carried by a per-back-end
// `Layout` of fixed coordinates.

use certmint_core::{CertificateMetadata, DATE_FORMAT};

/// 8-bit RGB color used by the content model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Certificate palette.
pub const BACKGROUND: Color = Color {
    r: 240,
    g: 240,
    b: 240,
};
pub const ACCENT: Color = Color {
    r: 67,
    g: 97,
    b: 238,
};
pub const INK: Color = Color { r: 0, g: 0, b: 0 };
pub const NAME_INK: Color = Color {
    r: 51,
    g: 51,
    b: 51,
};

/// Typeface selection. Maps to Helvetica variants in the PDF back-end and
/// to the embedded DejaVu faces in the raster back-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Regular,
    Bold,
    Oblique,
}

/// One text anchor in back-end native coordinates (the PDF layout is y-up
/// from the bottom-left, the raster layout y-down from the top-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub x: f32,
    pub y: f32,
}

impl Anchor {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// The decorative border frame: outline rectangle plus stroke thickness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub thickness: f32,
}

/// Placement of the square QR bitmap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QrSlot {
    pub x: f32,
    pub y: f32,
    pub side: f32,
}

/// A single typed draw instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Fill the whole page with a background color.
    FillPage { color: Color },
    /// Stroke the decorative border rectangle.
    StrokeRect { frame: Frame, color: Color },
    /// One run of text at a fixed anchor.
    Text {
        text: String,
        anchor: Anchor,
        size: f32,
        face: Face,
        color: Color,
    },
    /// The QR bitmap from the metadata record.
    QrImage { slot: QrSlot },
}

/// Fixed geometry for one back-end. All values are policy, not negotiable
/// per request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub page_width: f32,
    pub page_height: f32,
    pub border: Frame,
    pub title: Anchor,
    pub certify_line: Anchor,
    pub participant: Anchor,
    pub completed_line: Anchor,
    pub course: Anchor,
    pub completion_date: Anchor,
    pub issue_date: Anchor,
    pub issuer: Anchor,
    pub qr: QrSlot,
}

/// Single-page document layout: US Letter in PDF points, y-up.
pub const DOCUMENT_LAYOUT: Layout = Layout {
    page_width: 612.0,
    page_height: 792.0,
    border: Frame {
        x: 30.0,
        y: 30.0,
        width: 552.0,
        height: 732.0,
        thickness: 15.0,
    },
    title: Anchor::new(100.0, 650.0),
    certify_line: Anchor::new(100.0, 600.0),
    participant: Anchor::new(100.0, 550.0),
    completed_line: Anchor::new(100.0, 500.0),
    course: Anchor::new(100.0, 470.0),
    completion_date: Anchor::new(100.0, 430.0),
    issue_date: Anchor::new(100.0, 410.0),
    issuer: Anchor::new(100.0, 350.0),
    qr: QrSlot {
        x: 400.0,
        y: 100.0,
        side: 150.0,
    },
};

/// Raster canvas layout: 800x600 pixels, y-down.
pub const RASTER_LAYOUT: Layout = Layout {
    page_width: 800.0,
    page_height: 600.0,
    border: Frame {
        x: 20.0,
        y: 20.0,
        width: 760.0,
        height: 560.0,
        thickness: 10.0,
    },
    title: Anchor::new(100.0, 100.0),
    certify_line: Anchor::new(100.0, 150.0),
    participant: Anchor::new(100.0, 200.0),
    completed_line: Anchor::new(100.0, 250.0),
    course: Anchor::new(100.0, 280.0),
    completion_date: Anchor::new(100.0, 320.0),
    issue_date: Anchor::new(100.0, 340.0),
    issuer: Anchor::new(100.0, 380.0),
    qr: QrSlot {
        x: 550.0,
        y: 400.0,
        side: 150.0,
    },
};

/// Build the ordered draw instructions for one certificate.
///
/// This is the only place that knows the certificate wording and which
/// metadata field goes where.
pub fn certificate_content(metadata: &CertificateMetadata, layout: &Layout) -> Vec<DrawOp> {
    let text = |text: String, anchor: Anchor, size: f32, face: Face, color: Color| DrawOp::Text {
        text,
        anchor,
        size,
        face,
        color,
    };

    vec![
        DrawOp::FillPage { color: BACKGROUND },
        DrawOp::StrokeRect {
            frame: layout.border,
            color: ACCENT,
        },
        text(
            "CERTIFICATE OF COMPLETION".into(),
            layout.title,
            36.0,
            Face::Bold,
            ACCENT,
        ),
        text(
            "This is to certify that".into(),
            layout.certify_line,
            14.0,
            Face::Regular,
            INK,
        ),
        text(
            metadata.participant_name.clone(),
            layout.participant,
            28.0,
            Face::Bold,
            NAME_INK,
        ),
        text(
            "has successfully completed the course".into(),
            layout.completed_line,
            14.0,
            Face::Regular,
            INK,
        ),
        text(
            metadata.course_name.clone(),
            layout.course,
            18.0,
            Face::Bold,
            ACCENT,
        ),
        text(
            format!(
                "Completed on: {}",
                metadata.completion_date.format(DATE_FORMAT)
            ),
            layout.completion_date,
            12.0,
            Face::Regular,
            INK,
        ),
        text(
            format!("Issued on: {}", metadata.issue_date.format(DATE_FORMAT)),
            layout.issue_date,
            12.0,
            Face::Regular,
            INK,
        ),
        text(
            format!("Issued by: {}", metadata.issuer_name),
            layout.issuer,
            12.0,
            Face::Oblique,
            INK,
        ),
        DrawOp::QrImage { slot: layout.qr },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use certmint_core::CertificateId;
    use chrono::NaiveDate;

    fn metadata() -> CertificateMetadata {
        CertificateMetadata {
            id: CertificateId::new(),
            participant_name: "Ada Lovelace".into(),
            course_name: "Systems Design".into(),
            completion_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            issuer_name: "Acme Academy".into(),
            issue_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            verification_url: "https://certs.example.com/api/certificates/x/verify".into(),
            qr_png: Vec::new(),
        }
    }

    fn text_runs(ops: &[DrawOp]) -> Vec<(String, f32, Face)> {
        ops.iter()
            .filter_map(|op| match op {
                DrawOp::Text {
                    text, size, face, ..
                } => Some((text.clone(), *size, *face)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn content_is_deterministic() {
        let meta = metadata();
        assert_eq!(
            certificate_content(&meta, &DOCUMENT_LAYOUT),
            certificate_content(&meta, &DOCUMENT_LAYOUT)
        );
    }

    #[test]
    fn both_layouts_carry_identical_text() {
        // The two renditions differ in geometry only; the words, type sizes,
        // and faces must match exactly.
        let meta = metadata();
        let doc = certificate_content(&meta, &DOCUMENT_LAYOUT);
        let raster = certificate_content(&meta, &RASTER_LAYOUT);
        assert_eq!(text_runs(&doc), text_runs(&raster));
    }

    #[test]
    fn dates_use_the_fixed_pattern() {
        let meta = metadata();
        let runs = text_runs(&certificate_content(&meta, &DOCUMENT_LAYOUT));
        assert!(runs.iter().any(|(t, _, _)| t == "Completed on: 2024-01-15"));
        assert!(runs.iter().any(|(t, _, _)| t == "Issued on: 2024-02-01"));
        assert!(runs.iter().any(|(t, _, _)| t == "Issued by: Acme Academy"));
    }

    #[test]
    fn qr_comes_last_over_the_background() {
        let meta = metadata();
        let ops = certificate_content(&meta, &RASTER_LAYOUT);
        assert!(matches!(ops.first(), Some(DrawOp::FillPage { .. })));
        assert!(matches!(ops.last(), Some(DrawOp::QrImage { .. })));
    }
}
