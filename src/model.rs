use std::path::Path;

use crate::images::ImageSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    /// `.png` (any case) is PNG; everything else is treated as JPEG.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("png") => ImageFormat::Png,
            _ => ImageFormat::Jpeg,
        }
    }

    pub(crate) fn content_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }

    pub(crate) fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
        }
    }
}

/// Raw bytes of one sample image, as read from disk.
#[derive(Clone, Debug)]
pub struct EmbeddedImage {
    pub file_name: String,
    pub data: Vec<u8>,
    pub format: ImageFormat,
}

pub(crate) struct SectionProperties {
    pub(crate) page_width: f32,
    pub(crate) page_height: f32,
    pub(crate) margin_top: f32,
    pub(crate) margin_bottom: f32,
    pub(crate) margin_left: f32,
    pub(crate) margin_right: f32,
}

pub(crate) struct Section {
    pub(crate) properties: SectionProperties,
    pub(crate) paragraphs: Vec<Paragraph>,
}

/// Inline picture pointing at an image slot of the document's media list.
pub(crate) struct InlineImage {
    pub(crate) slot: usize,
    pub(crate) display_width: f32,  // points
    pub(crate) display_height: f32, // points
}

pub(crate) struct Paragraph {
    pub(crate) runs: Vec<Run>,
    pub(crate) space_after: f32,
    pub(crate) image: Option<InlineImage>,
}

pub(crate) struct Run {
    pub(crate) text: String,
    pub(crate) font_size: f32,
    pub(crate) bold: bool,
    pub(crate) italic: bool,
}

pub(crate) struct Document<'a> {
    pub(crate) sections: Vec<Section>,
    /// Media shared by every section, indexed by slot.
    pub(crate) media: &'a ImageSet,
}
