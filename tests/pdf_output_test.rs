mod common;

use std::fs;

use common::{pdf_image_xobject_count, pdf_page_count, working_tree};
use sampledoc::{
    Canvas, PAGE_COUNT, PageRenderer, PdfCanvas, PdfRenderer, StandardFont, draw_page,
    load_lenient, plan_page,
};

#[test]
fn generates_five_hundred_letter_pages() {
    let _ = env_logger::try_init();
    let tree = working_tree(&[]);

    let generated = sampledoc::generate_pdf(tree.path()).expect("PDF generation succeeds");
    assert_eq!(generated.pages, PAGE_COUNT);
    assert_eq!(generated.path, tree.path().join("output.pdf"));

    let bytes = fs::read(&generated.path).unwrap();
    assert_eq!(bytes.len(), generated.bytes);
    assert!(bytes.starts_with(b"%PDF-"));
    assert_eq!(pdf_page_count(&bytes), PAGE_COUNT as usize);
    assert_eq!(pdf_image_xobject_count(&bytes), 5, "each image embedded once");
}

#[test]
fn missing_image_file_still_produces_every_page() {
    let _ = env_logger::try_init();
    let tree = working_tree(&["sample2.png"]);

    let generated = sampledoc::generate_pdf(tree.path()).expect("missing images are not fatal");
    let bytes = fs::read(&generated.path).unwrap();
    assert_eq!(pdf_page_count(&bytes), PAGE_COUNT as usize);
    assert_eq!(pdf_image_xobject_count(&bytes), 4);
}

#[test]
fn undecodable_image_is_skipped_per_page() {
    let _ = env_logger::try_init();
    let tree = working_tree(&["sample5.png"]);
    fs::write(tree.path().join("images/sample5.png"), b"not a png").unwrap();

    let generated = sampledoc::generate_pdf(tree.path()).expect("draw failures are not fatal");
    let bytes = fs::read(&generated.path).unwrap();
    assert_eq!(pdf_page_count(&bytes), PAGE_COUNT as usize);
    assert_eq!(pdf_image_xobject_count(&bytes), 4);
}

#[test]
fn canvas_caches_a_failed_image_slot() {
    let tree = working_tree(&["sample1.png"]);
    fs::write(tree.path().join("images/sample1.png"), b"garbage").unwrap();
    let images = load_lenient(&tree.path().join("images"));
    let image = images.get(0).expect("garbage is still readable");

    let mut canvas = PdfCanvas::letter();
    assert!(canvas.image(0, image, 36.0, 81.0, 120.0, 90.0).is_err());
    assert!(canvas.image(0, image, 36.0, 81.0, 120.0, 90.0).is_err());
    let bytes = canvas.finish();
    assert_eq!(pdf_image_xobject_count(&bytes), 0);
}

#[test]
fn renderer_appends_a_page_per_plan() {
    let tree = working_tree(&[]);
    let images = load_lenient(&tree.path().join("images"));

    let bytes = sampledoc::assemble(PdfRenderer::new(&images), 7).expect("render 7 pages");
    assert_eq!(pdf_page_count(&bytes), 7);
    assert_eq!(pdf_image_xobject_count(&bytes), 5);

    let mut renderer = PdfRenderer::new(&images);
    renderer.render_page(&plan_page(1)).unwrap();
    let single = renderer.finish().unwrap();
    assert_eq!(pdf_page_count(&single), 1);
    assert_eq!(pdf_image_xobject_count(&single), 1);
}

#[test]
fn canvas_tracks_font_state() {
    let tree = working_tree(&[]);
    let images = load_lenient(&tree.path().join("images"));
    let mut canvas = PdfCanvas::letter();

    draw_page(&mut canvas, &plan_page(1), &images);
    // The closing line ends in the regular face.
    assert_eq!(canvas.font(), (StandardFont::Helvetica, 12.0));
    assert_eq!(canvas.page_count(), 1);
    canvas.add_page();
    assert_eq!(canvas.page_count(), 2);
}

#[test]
fn reruns_are_byte_identical() {
    let tree = working_tree(&[]);
    let first = sampledoc::generate_pdf(tree.path()).expect("first run");
    let first_bytes = fs::read(&first.path).unwrap();
    let second = sampledoc::generate_pdf(tree.path()).expect("second run");
    let second_bytes = fs::read(&second.path).unwrap();
    assert_eq!(first_bytes, second_bytes);
}
