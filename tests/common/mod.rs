#![allow(dead_code)]

use std::fs;
use std::path::Path;

use sampledoc::{EmbeddedImage, IMAGE_FILES, StandardFont};
use tempfile::TempDir;

/// Scratch working tree with `images/sample1.png`..`sample5.png`, except the
/// files named in `skip`.
pub fn working_tree(skip: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    let images = dir.path().join("images");
    fs::create_dir_all(&images).expect("create images dir");
    for (i, name) in IMAGE_FILES.iter().enumerate() {
        if skip.contains(name) {
            continue;
        }
        write_png(&images.join(name), i as u8);
    }
    dir
}

/// Small RGB PNG with a distinct colour per slot.
pub fn write_png(path: &Path, seed: u8) {
    let img = image::RgbImage::from_fn(32, 24, |x, y| {
        image::Rgb([seed.wrapping_mul(50), (x * 8) as u8, (y * 10) as u8])
    });
    img.save(path).expect("write fixture PNG");
}

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Text {
        text: String,
        x: f32,
        y: f32,
        font: StandardFont,
        size: f32,
    },
    Image {
        slot: usize,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

/// Canvas that records draw calls instead of producing a PDF.
/// Letter-sized unless built with [`RecordingCanvas::with_page_size`].
pub struct RecordingCanvas {
    pub ops: Vec<Op>,
    pub fail_images: bool,
    page_width: f32,
    page_height: f32,
    font: StandardFont,
    size: f32,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            fail_images: false,
            page_width: sampledoc::LETTER_WIDTH,
            page_height: sampledoc::LETTER_HEIGHT,
            font: StandardFont::Helvetica,
            size: 16.0,
        }
    }

    pub fn with_page_size(page_width: f32, page_height: f32) -> Self {
        Self {
            page_width,
            page_height,
            ..Self::new()
        }
    }

    pub fn failing_images() -> Self {
        Self {
            fail_images: true,
            ..Self::new()
        }
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { text, .. } => Some(text.as_str()),
                Op::Image { .. } => None,
            })
            .collect()
    }

    pub fn image_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Image { .. }))
            .count()
    }
}

impl sampledoc::Canvas for RecordingCanvas {
    fn page_size(&self) -> (f32, f32) {
        (self.page_width, self.page_height)
    }

    fn set_font(&mut self, font: StandardFont, size: f32) {
        self.font = font;
        self.size = size;
    }

    fn font(&self) -> (StandardFont, f32) {
        (self.font, self.size)
    }

    fn text(&mut self, text: &str, x: f32, y: f32) {
        self.ops.push(Op::Text {
            text: text.to_string(),
            x,
            y,
            font: self.font,
            size: self.size,
        });
    }

    fn image(
        &mut self,
        slot: usize,
        image: &EmbeddedImage,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<(), sampledoc::Error> {
        if self.fail_images {
            return Err(sampledoc::Error::ImageDecode {
                name: image.file_name.clone(),
                reason: "simulated failure".into(),
            });
        }
        self.ops.push(Op::Image {
            slot,
            x,
            y,
            width,
            height,
        });
        Ok(())
    }
}

/// Number of `/Type /Page` dictionaries, excluding the `/Pages` tree node.
pub fn pdf_page_count(pdf: &[u8]) -> usize {
    count_name(pdf, b"/Type /Page", |next| next != Some(&b's'))
}

/// Number of image XObjects, soft masks included.
pub fn pdf_image_xobject_count(pdf: &[u8]) -> usize {
    count_name(pdf, b"/Subtype /Image", |_| true)
}

fn count_name(haystack: &[u8], needle: &[u8], accept_next: impl Fn(Option<&u8>) -> bool) -> usize {
    haystack
        .windows(needle.len())
        .enumerate()
        .filter(|(i, w)| *w == needle && accept_next(haystack.get(i + needle.len())))
        .count()
}
