//! Per-page content planning shared by the DOCX and PDF generators.
//!
//! A page's content is a pure function of its 1-based page number and the two
//! fixed tables below.

/// Number of pages produced by each generator.
pub const PAGE_COUNT: u32 = 500;

/// Progress is logged every this many pages.
pub const PROGRESS_INTERVAL: u32 = 50;

/// Sample images, read from the `images/` directory of the working tree.
pub const IMAGE_FILES: [&str; 5] = [
    "sample1.png",
    "sample2.png",
    "sample3.png",
    "sample4.png",
    "sample5.png",
];

pub const SAMPLE_PARAGRAPHS: [&str; 8] = [
    "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat.",
    "Duis aute irure dolor in reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur. Excepteur sint occaecat cupidatat non proident, sunt in culpa qui officia deserunt mollit anim id est laborum.",
    "Sed ut perspiciatis unde omnis iste natus error sit voluptatem accusantium doloremque laudantium, totam rem aperiam, eaque ipsa quae ab illo inventore veritatis et quasi architecto beatae vitae dicta sunt explicabo.",
    "Nemo enim ipsam voluptatem quia voluptas sit aspernatur aut odit aut fugit, sed quia consequuntur magni dolores eos qui ratione voluptatem sequi nesciunt.",
    "Neque porro quisquam est, qui dolorem ipsum quia dolor sit amet, consectetur, adipisci velit, sed quia non numquam eius modi tempora incidunt ut labore et dolore magnam aliquam quaerat voluptatem.",
    "At vero eos et accusamus et iusto odio dignissimos ducimus qui blanditiis praesentium voluptatum deleniti atque corrupti quos dolores et quas molestias excepturi sint occaecati cupiditate non provident.",
    "Similique sunt in culpa qui officia deserunt mollitia animi, id est laborum et dolorum fuga. Et harum quidem rerum facilis est et expedita distinctio.",
    "Nam libero tempore, cum soluta nobis est eligendi optio cumque nihil impedit quo minus id quod maxime placeat facere possimus, omnis voluptas assumenda est, omnis dolor repellendus.",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStyle {
    Normal,
    Bold,
    Italic,
}

/// A contiguous span of text in the closing sentence sharing one style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledRun {
    pub text: String,
    pub style: RunStyle,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PagePlan {
    pub page_number: u32,
    pub image_index: usize,
    pub paragraph_indices: Vec<usize>,
    pub title: String,
}

impl PagePlan {
    pub fn image_file(&self) -> &'static str {
        IMAGE_FILES[self.image_index]
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.paragraph_indices.iter().map(|&i| SAMPLE_PARAGRAPHS[i])
    }

    /// The mixed-formatting sentence that closes every page.
    pub fn closing_runs(&self) -> Vec<StyledRun> {
        let run = |text: String, style| StyledRun { text, style };
        vec![
            run("Additional content with ".into(), RunStyle::Normal),
            run("bold formatting".into(), RunStyle::Bold),
            run(" and ".into(), RunStyle::Normal),
            run("italic text".into(), RunStyle::Italic),
            run(
                format!(" for variety on page {}.", self.page_number),
                RunStyle::Normal,
            ),
        ]
    }
}

/// Plan the content of a 1-based page number.
pub fn plan_page(page_number: u32) -> PagePlan {
    let n = page_number as usize;
    let image_index = n.saturating_sub(1) % IMAGE_FILES.len();
    let paragraph_count = 2 + n % 2;
    let paragraph_indices = (0..paragraph_count)
        .map(|i| (n + i) % SAMPLE_PARAGRAPHS.len())
        .collect();

    PagePlan {
        page_number,
        image_index,
        paragraph_indices,
        title: format!("Page {page_number}"),
    }
}
