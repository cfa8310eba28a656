mod docx;
mod error;
mod fonts;
mod images;
mod model;
mod pdf;
mod plan;

pub use docx::DocxRenderer;
pub use error::Error;
pub use fonts::StandardFont;
pub use images::{ImageSet, load_lenient, load_strict};
pub use model::{EmbeddedImage, ImageFormat};
pub use pdf::layout::{draw_page, wrap_text};
pub use pdf::{Canvas, LETTER_HEIGHT, LETTER_WIDTH, PdfCanvas, PdfRenderer};
pub use plan::{
    IMAGE_FILES, PAGE_COUNT, PROGRESS_INTERVAL, PagePlan, RunStyle, SAMPLE_PARAGRAPHS, StyledRun,
    plan_page,
};

use std::path::{Path, PathBuf};
use std::time::Instant;

pub const IMAGES_DIR: &str = "images";
pub const DOCX_OUTPUT: &str = "output.docx";
pub const PDF_OUTPUT: &str = "output.pdf";

/// Turns planned pages into one output format.
pub trait PageRenderer {
    fn render_page(&mut self, plan: &PagePlan) -> Result<(), Error>;

    /// Serialize everything rendered so far.
    fn finish(self) -> Result<Vec<u8>, Error>;
}

/// Render pages `1..=page_count` in order and serialize the result.
/// The first error aborts the run.
pub fn assemble<R: PageRenderer>(mut renderer: R, page_count: u32) -> Result<Vec<u8>, Error> {
    for page in 1..=page_count {
        if page % PROGRESS_INTERVAL == 0 {
            log::info!("Generated {page} pages...");
        }
        renderer.render_page(&plan_page(page))?;
    }
    renderer.finish()
}

/// Summary of a completed generation run.
#[derive(Clone, Debug)]
pub struct Generated {
    pub path: PathBuf,
    pub pages: u32,
    pub bytes: usize,
}

impl Generated {
    pub fn size_mib(&self) -> f64 {
        self.bytes as f64 / 1024.0 / 1024.0
    }
}

fn write_output(bytes: &[u8], output: &Path) -> Result<(), Error> {
    std::fs::write(output, bytes).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", e, output.display()),
        ))
    })
}

/// Generate `output.docx` under `root` from the images in `root/images`.
///
/// Every image must be readable; a missing one aborts before any page is built
/// and no output file is written.
pub fn generate_docx(root: &Path) -> Result<Generated, Error> {
    let t0 = Instant::now();
    log::info!("Starting DOCX generation...");
    log::info!("Target: {PAGE_COUNT} pages");
    log::info!("Loading sample images...");

    let images = load_strict(&root.join(IMAGES_DIR))?;
    let t_load = t0.elapsed();

    let bytes = assemble(DocxRenderer::new(&images), PAGE_COUNT)?;
    let t_render = t0.elapsed();

    log::info!("Generating DOCX file...");
    let output = root.join(DOCX_OUTPUT);
    write_output(&bytes, &output)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: load={:.1}ms, render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        t_load.as_secs_f64() * 1000.0,
        (t_render - t_load).as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(Generated {
        path: output,
        pages: PAGE_COUNT,
        bytes: bytes.len(),
    })
}

/// Generate `output.pdf` under `root` from the images in `root/images`.
///
/// Unreadable images are skipped with a warning; pages planned to show them
/// are rendered without an image.
pub fn generate_pdf(root: &Path) -> Result<Generated, Error> {
    let t0 = Instant::now();
    log::info!("Starting PDF generation...");
    log::info!("Target: {PAGE_COUNT} pages");
    log::info!("Loading sample images...");

    let images = load_lenient(&root.join(IMAGES_DIR));
    let t_load = t0.elapsed();

    let bytes = assemble(PdfRenderer::new(&images), PAGE_COUNT)?;
    let t_render = t0.elapsed();

    log::info!("Generating PDF file...");
    let output = root.join(PDF_OUTPUT);
    write_output(&bytes, &output)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: load={:.1}ms, render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes, {}/{} images)",
        t_load.as_secs_f64() * 1000.0,
        (t_render - t_load).as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
        images.loaded_count(),
        images.len(),
    );

    Ok(Generated {
        path: output,
        pages: PAGE_COUNT,
        bytes: bytes.len(),
    })
}
