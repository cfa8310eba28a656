pub mod layout;

use std::collections::HashMap;
use std::io::Cursor;

use image::ImageDecoder;
use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::PageRenderer;
use crate::error::Error;
use crate::fonts::{StandardFont, to_winansi_bytes};
use crate::images::ImageSet;
use crate::model::{EmbeddedImage, ImageFormat};
use crate::plan::PagePlan;

/// US Letter, portrait, in points.
pub const LETTER_WIDTH: f32 = 612.0;
pub const LETTER_HEIGHT: f32 = 792.0;

/// Imperative drawing surface. Coordinates are in points with the origin at
/// the top-left corner of the current page; `y` grows downwards.
pub trait Canvas {
    fn page_size(&self) -> (f32, f32);

    fn set_font(&mut self, font: StandardFont, size: f32);

    fn font(&self) -> (StandardFont, f32);

    /// Width of `text` in the active font at the active size.
    fn string_width(&self, text: &str) -> f32 {
        let (font, size) = self.font();
        font.string_width(text, size)
    }

    /// Draw `text` with its baseline at `y`.
    fn text(&mut self, text: &str, x: f32, y: f32);

    /// Draw the image in `slot` with its top-left corner at (`x`, `y`).
    fn image(
        &mut self,
        slot: usize,
        image: &EmbeddedImage,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<(), Error>;
}

/// A [`Canvas`] that writes a multi-page PDF with the base-14 Helvetica fonts.
///
/// Each image slot is embedded as one XObject on first use and shared by every
/// page that draws it. A slot that fails to decode stays failed for the run.
pub struct PdfCanvas {
    pdf: Pdf,
    next_id: i32,
    catalog_id: Ref,
    pages_id: Ref,
    font_refs: Vec<(StandardFont, Ref)>,
    finished_pages: Vec<Vec<u8>>,
    current: Content,
    font: StandardFont,
    font_size: f32,
    page_width: f32,
    page_height: f32,
    image_xobjects: Vec<(String, Ref)>,
    embedded: HashMap<usize, Result<String, String>>,
}

impl PdfCanvas {
    /// Start a document with one empty page.
    pub fn new(page_width: f32, page_height: f32) -> Self {
        let mut canvas = Self {
            pdf: Pdf::new(),
            next_id: 1,
            catalog_id: Ref::new(1),
            pages_id: Ref::new(1),
            font_refs: Vec::new(),
            finished_pages: Vec::new(),
            current: Content::new(),
            font: StandardFont::Helvetica,
            font_size: 16.0,
            page_width,
            page_height,
            image_xobjects: Vec::new(),
            embedded: HashMap::new(),
        };
        canvas.catalog_id = canvas.alloc();
        canvas.pages_id = canvas.alloc();

        for font in StandardFont::ALL {
            let font_ref = canvas.alloc();
            canvas
                .pdf
                .type1_font(font_ref)
                .base_font(Name(font.base_font().as_bytes()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
            canvas.font_refs.push((font, font_ref));
        }
        canvas
    }

    pub fn letter() -> Self {
        Self::new(LETTER_WIDTH, LETTER_HEIGHT)
    }

    fn alloc(&mut self) -> Ref {
        let r = Ref::new(self.next_id);
        self.next_id += 1;
        r
    }

    pub fn page_count(&self) -> usize {
        self.finished_pages.len() + 1
    }

    /// Close the current page and continue drawing on a fresh one.
    pub fn add_page(&mut self) {
        let page = std::mem::replace(&mut self.current, Content::new());
        self.finished_pages.push(compress_content(page));
    }

    fn embed_image(&mut self, img: &EmbeddedImage) -> Result<String, String> {
        let pdf_name = format!("Im{}", self.image_xobjects.len() + 1);

        let xobj_ref = match img.format {
            ImageFormat::Jpeg => {
                let reader = image::ImageReader::with_format(
                    Cursor::new(&img.data),
                    image::ImageFormat::Jpeg,
                );
                let decoder = reader.into_decoder().map_err(|e| e.to_string())?;
                let (w, h) = decoder.dimensions();
                let gray = match decoder.color_type() {
                    image::ColorType::L8 => true,
                    image::ColorType::Rgb8 => false,
                    other => return Err(format!("unsupported JPEG color type {other:?}")),
                };
                let xobj_ref = self.alloc();
                let mut xobj = self.pdf.image_xobject(xobj_ref, &img.data);
                xobj.filter(Filter::DctDecode);
                xobj.width(w as i32);
                xobj.height(h as i32);
                if gray {
                    xobj.color_space().device_gray();
                } else {
                    xobj.color_space().device_rgb();
                }
                xobj.bits_per_component(8);
                log::debug!("Embedded JPEG {} as {pdf_name} ({w}x{h})", img.file_name);
                xobj_ref
            }
            ImageFormat::Png => {
                let reader = image::ImageReader::with_format(
                    std::io::BufReader::new(Cursor::new(&img.data)),
                    image::ImageFormat::Png,
                );
                let decoded = reader.decode().map_err(|e| e.to_string())?;
                let rgba: image::RgbaImage = decoded.to_rgba8();
                let (w, h) = (rgba.width(), rgba.height());
                let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);

                let rgb_data: Vec<u8> = rgba
                    .pixels()
                    .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
                    .collect();
                let compressed_rgb = miniz_oxide::deflate::compress_to_vec_zlib(&rgb_data, 6);

                let smask_ref = if has_alpha {
                    let alpha_data: Vec<u8> = rgba.pixels().map(|p| p.0[3]).collect();
                    let compressed_alpha =
                        miniz_oxide::deflate::compress_to_vec_zlib(&alpha_data, 6);
                    let mask_ref = self.alloc();
                    let mut mask = self.pdf.image_xobject(mask_ref, &compressed_alpha);
                    mask.filter(Filter::FlateDecode);
                    mask.width(w as i32);
                    mask.height(h as i32);
                    mask.color_space().device_gray();
                    mask.bits_per_component(8);
                    Some(mask_ref)
                } else {
                    None
                };

                let xobj_ref = self.alloc();
                let mut xobj = self.pdf.image_xobject(xobj_ref, &compressed_rgb);
                xobj.filter(Filter::FlateDecode);
                xobj.width(w as i32);
                xobj.height(h as i32);
                xobj.color_space().device_rgb();
                xobj.bits_per_component(8);
                if let Some(mask_ref) = smask_ref {
                    xobj.s_mask(mask_ref);
                }
                log::debug!(
                    "Embedded PNG {} as {pdf_name} ({w}x{h}, alpha={has_alpha}, {} bytes)",
                    img.file_name,
                    compressed_rgb.len(),
                );
                xobj_ref
            }
        };

        self.image_xobjects.push((pdf_name.clone(), xobj_ref));
        Ok(pdf_name)
    }

    /// Assemble the page tree and serialize the document.
    pub fn finish(mut self) -> Vec<u8> {
        let last = std::mem::replace(&mut self.current, Content::new());
        self.finished_pages.push(compress_content(last));

        let n = self.finished_pages.len();
        let page_ids: Vec<Ref> = (0..n).map(|_| self.alloc()).collect();
        let content_ids: Vec<Ref> = (0..n).map(|_| self.alloc()).collect();
        let info_id = self.alloc();

        for (i, stream) in self.finished_pages.iter().enumerate() {
            self.pdf
                .stream(content_ids[i], stream)
                .filter(Filter::FlateDecode);
        }

        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.pdf
            .pages(self.pages_id)
            .kids(page_ids.iter().copied())
            .count(n as i32);

        for i in 0..n {
            let mut page = self.pdf.page(page_ids[i]);
            page.media_box(Rect::new(0.0, 0.0, self.page_width, self.page_height))
                .parent(self.pages_id)
                .contents(content_ids[i]);
            let mut resources = page.resources();
            {
                let mut fonts = resources.fonts();
                for (font, font_ref) in &self.font_refs {
                    fonts.pair(Name(font.pdf_name().as_bytes()), *font_ref);
                }
            }
            if !self.image_xobjects.is_empty() {
                let mut xobjects = resources.x_objects();
                for (name, xobj_ref) in &self.image_xobjects {
                    xobjects.pair(Name(name.as_bytes()), *xobj_ref);
                }
            }
        }

        self.pdf
            .document_info(info_id)
            .title(TextStr("Sample Document"))
            .producer(TextStr(concat!("sampledoc ", env!("CARGO_PKG_VERSION"))));

        self.pdf.finish()
    }
}

fn compress_content(content: Content) -> Vec<u8> {
    let raw = content.finish();
    miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6)
}

impl Canvas for PdfCanvas {
    fn page_size(&self) -> (f32, f32) {
        (self.page_width, self.page_height)
    }

    fn set_font(&mut self, font: StandardFont, size: f32) {
        self.font = font;
        self.font_size = size;
    }

    fn font(&self) -> (StandardFont, f32) {
        (self.font, self.font_size)
    }

    fn text(&mut self, text: &str, x: f32, y: f32) {
        let bytes = to_winansi_bytes(text);
        self.current.begin_text();
        self.current
            .set_font(Name(self.font.pdf_name().as_bytes()), self.font_size);
        self.current.next_line(x, self.page_height - y);
        self.current.show(Str(&bytes));
        self.current.end_text();
    }

    fn image(
        &mut self,
        slot: usize,
        image: &EmbeddedImage,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<(), Error> {
        let outcome = match self.embedded.get(&slot) {
            Some(outcome) => outcome.clone(),
            None => {
                let outcome = self.embed_image(image);
                self.embedded.insert(slot, outcome.clone());
                outcome
            }
        };
        let name = outcome.map_err(|reason| Error::ImageDecode {
            name: image.file_name.clone(),
            reason,
        })?;

        let y_bottom = self.page_height - y - height;
        self.current.save_state();
        self.current.transform([width, 0.0, 0.0, height, x, y_bottom]);
        self.current.x_object(Name(name.as_bytes()));
        self.current.restore_state();
        Ok(())
    }
}

/// Renders planned pages onto a Letter-sized [`PdfCanvas`].
pub struct PdfRenderer<'a> {
    canvas: PdfCanvas,
    images: &'a ImageSet,
}

impl<'a> PdfRenderer<'a> {
    pub fn new(images: &'a ImageSet) -> Self {
        Self {
            canvas: PdfCanvas::letter(),
            images,
        }
    }
}

impl PageRenderer for PdfRenderer<'_> {
    fn render_page(&mut self, plan: &PagePlan) -> Result<(), Error> {
        if plan.page_number > 1 {
            self.canvas.add_page();
        }
        layout::draw_page(&mut self.canvas, plan, self.images);
        Ok(())
    }

    fn finish(self) -> Result<Vec<u8>, Error> {
        Ok(self.canvas.finish())
    }
}
