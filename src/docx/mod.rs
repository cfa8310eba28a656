mod writer;

use crate::PageRenderer;
use crate::error::Error;
use crate::images::ImageSet;
use crate::model::{Document, InlineImage, Paragraph, Run, Section, SectionProperties};
use crate::plan::{PagePlan, RunStyle};

pub(crate) const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub(crate) const DML_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub(crate) const PIC_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";
pub(crate) const WPD_NS: &str =
    "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
pub(crate) const REL_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

// A4 portrait, the default page of a new word-processor document.
const PAGE_WIDTH: f32 = 595.3;
const PAGE_HEIGHT: f32 = 841.9;
const PAGE_MARGIN: f32 = 36.0; // 0.5 inches

const TITLE_FONT_SIZE: f32 = 16.0;
const BODY_FONT_SIZE: f32 = 12.0;

const TITLE_SPACE_AFTER: f32 = 20.0;
const IMAGE_SPACE_AFTER: f32 = 15.0;
const BODY_SPACE_AFTER: f32 = 10.0;

// 300 x 225 px at 96 dpi
const IMAGE_WIDTH: f32 = 225.0;
const IMAGE_HEIGHT: f32 = 168.75;

pub(crate) fn pts_to_twips(pts: f32) -> i64 {
    (pts * 20.0).round() as i64
}

pub(crate) fn pts_to_half_points(pts: f32) -> i64 {
    (pts * 2.0).round() as i64
}

pub(crate) fn pts_to_emu(pts: f32) -> i64 {
    (pts * 12700.0).round() as i64
}

fn text_run(text: impl Into<String>, font_size: f32, style: RunStyle) -> Run {
    Run {
        text: text.into(),
        font_size,
        bold: style == RunStyle::Bold,
        italic: style == RunStyle::Italic,
    }
}

/// Build the section holding one planned page. Every page is its own section
/// so each one starts on a new physical page.
fn build_section(plan: &PagePlan, images: &ImageSet) -> Result<Section, Error> {
    if images.get(plan.image_index).is_none() {
        return Err(Error::MissingImage {
            page: plan.page_number,
            file: plan.image_file().to_string(),
        });
    }

    let mut paragraphs = Vec::with_capacity(plan.paragraph_indices.len() + 3);

    paragraphs.push(Paragraph {
        runs: vec![text_run(&plan.title, TITLE_FONT_SIZE, RunStyle::Bold)],
        space_after: TITLE_SPACE_AFTER,
        image: None,
    });

    paragraphs.push(Paragraph {
        runs: Vec::new(),
        space_after: IMAGE_SPACE_AFTER,
        image: Some(InlineImage {
            slot: plan.image_index,
            display_width: IMAGE_WIDTH,
            display_height: IMAGE_HEIGHT,
        }),
    });

    for text in plan.paragraphs() {
        paragraphs.push(Paragraph {
            runs: vec![text_run(text, BODY_FONT_SIZE, RunStyle::Normal)],
            space_after: BODY_SPACE_AFTER,
            image: None,
        });
    }

    paragraphs.push(Paragraph {
        runs: plan
            .closing_runs()
            .into_iter()
            .map(|r| text_run(r.text, BODY_FONT_SIZE, r.style))
            .collect(),
        space_after: BODY_SPACE_AFTER,
        image: None,
    });

    Ok(Section {
        properties: SectionProperties {
            page_width: PAGE_WIDTH,
            page_height: PAGE_HEIGHT,
            margin_top: PAGE_MARGIN,
            margin_bottom: PAGE_MARGIN,
            margin_left: PAGE_MARGIN,
            margin_right: PAGE_MARGIN,
        },
        paragraphs,
    })
}

/// Accumulates one section per page and packages them as a DOCX on finish.
pub struct DocxRenderer<'a> {
    images: &'a ImageSet,
    sections: Vec<Section>,
}

impl<'a> DocxRenderer<'a> {
    pub fn new(images: &'a ImageSet) -> Self {
        Self {
            images,
            sections: Vec::new(),
        }
    }
}

impl PageRenderer for DocxRenderer<'_> {
    fn render_page(&mut self, plan: &PagePlan) -> Result<(), Error> {
        self.sections.push(build_section(plan, self.images)?);
        Ok(())
    }

    fn finish(self) -> Result<Vec<u8>, Error> {
        let doc = Document {
            sections: self.sections,
            media: self.images,
        };
        writer::write_package(&doc)
    }
}
