use crate::fonts::StandardFont;
use crate::images::ImageSet;
use crate::plan::{PagePlan, RunStyle};

use super::Canvas;

pub const MARGIN: f32 = 36.0; // 0.5 inches
const FIRST_BASELINE_OFFSET: f32 = 20.0;

const TITLE_FONT_SIZE: f32 = 18.0;
const TITLE_ADVANCE: f32 = 25.0;

pub const IMAGE_WIDTH: f32 = 120.0;
pub const IMAGE_HEIGHT: f32 = 90.0;
const IMAGE_SPACING: f32 = 20.0;
const IMAGE_FAILURE_ADVANCE: f32 = 20.0;

pub const BODY_FONT_SIZE: f32 = 12.0;
pub const LINE_HEIGHT: f32 = 15.0;
const PARAGRAPH_SPACING: f32 = 10.0;

/// No new paragraph (or closing line) starts below `page_height - PARAGRAPH_CUTOFF`.
const PARAGRAPH_CUTOFF: f32 = 100.0;
/// No line is drawn below `page_height - LINE_CUTOFF`.
const LINE_CUTOFF: f32 = 50.0;

/// Greedy single-pass word wrap.
///
/// Words are taken in order; a word moves to a new line only when appending it
/// would make the current, non-empty line wider than `max_width`. A word that
/// is wider than `max_width` on its own is never split.
pub fn wrap_text(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split(' ') {
        let test_line = if current_line.is_empty() {
            word.to_string()
        } else {
            format!("{current_line} {word}")
        };

        if measure(&test_line) > max_width && !current_line.is_empty() {
            lines.push(std::mem::replace(&mut current_line, word.to_string()));
        } else {
            current_line = test_line;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }
    lines
}

fn font_for(style: RunStyle) -> StandardFont {
    match style {
        RunStyle::Normal => StandardFont::Helvetica,
        RunStyle::Bold => StandardFont::HelveticaBold,
        RunStyle::Italic => StandardFont::HelveticaOblique,
    }
}

/// Draw one planned page onto the canvas's current page and return the final
/// cursor position.
///
/// Image draw failures are logged and the page continues without the image.
pub fn draw_page<C: Canvas + ?Sized>(canvas: &mut C, plan: &PagePlan, images: &ImageSet) -> f32 {
    let (page_width, page_height) = canvas.page_size();
    let max_width = page_width - MARGIN * 2.0;
    let mut current_y = MARGIN + FIRST_BASELINE_OFFSET;

    canvas.set_font(StandardFont::HelveticaBold, TITLE_FONT_SIZE);
    canvas.text(&plan.title, MARGIN, current_y);
    current_y += TITLE_ADVANCE;

    if let Some(image) = images.get(plan.image_index) {
        match canvas.image(
            plan.image_index,
            image,
            MARGIN,
            current_y,
            IMAGE_WIDTH,
            IMAGE_HEIGHT,
        ) {
            Ok(()) => current_y += IMAGE_HEIGHT + IMAGE_SPACING,
            Err(e) => {
                log::warn!(
                    "Failed to add image {} to page {}: {e}",
                    plan.image_file(),
                    plan.page_number
                );
                current_y += IMAGE_FAILURE_ADVANCE;
            }
        }
    }

    canvas.set_font(StandardFont::Helvetica, BODY_FONT_SIZE);

    for paragraph in plan.paragraphs() {
        if current_y > page_height - PARAGRAPH_CUTOFF {
            break;
        }

        let lines = wrap_text(paragraph, max_width, |s| canvas.string_width(s));
        for line in &lines {
            if current_y > page_height - LINE_CUTOFF {
                break;
            }
            canvas.text(line, MARGIN, current_y);
            current_y += LINE_HEIGHT;
        }

        current_y += PARAGRAPH_SPACING;
    }

    if current_y < page_height - PARAGRAPH_CUTOFF {
        let mut x = MARGIN;
        for run in plan.closing_runs() {
            canvas.set_font(font_for(run.style), BODY_FONT_SIZE);
            canvas.text(&run.text, x, current_y);
            x += canvas.string_width(&run.text);
        }
    }

    current_y
}
