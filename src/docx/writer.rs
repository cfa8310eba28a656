//! Serializes the section model into an OOXML (DOCX) package.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use super::{DML_NS, PIC_NS, REL_NS, WML_NS, WPD_NS, pts_to_emu, pts_to_half_points, pts_to_twips};
use crate::error::Error;
use crate::model::{Document, EmbeddedImage, InlineImage, Paragraph, Run, SectionProperties};

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const PKG_RELS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const REL_TYPE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_TYPE_CORE: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_TYPE_IMAGE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

fn media_name(slot: usize, img: &EmbeddedImage) -> String {
    format!("image{}.{}", slot + 1, img.format.extension())
}

fn image_rel_id(slot: usize) -> String {
    format!("rIdImage{}", slot + 1)
}

fn content_types_xml(doc: &Document) -> String {
    let mut out = format!(r#"{XML_DECL}<Types xmlns="{CONTENT_TYPES_NS}">"#);
    out.push_str(
        r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    );
    out.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);

    let mut formats: Vec<_> = doc.media.iter_loaded().map(|(_, img)| img.format).collect();
    formats.sort_by_key(|f| f.extension());
    formats.dedup();
    for format in formats {
        out.push_str(&format!(
            r#"<Default Extension="{}" ContentType="{}"/>"#,
            format.extension(),
            format.content_type()
        ));
    }

    out.push_str(
        r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
    );
    out.push_str(
        r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#,
    );
    out.push_str("</Types>");
    out
}

fn package_rels_xml() -> String {
    format!(
        r#"{XML_DECL}<Relationships xmlns="{PKG_RELS_NS}"><Relationship Id="rId1" Type="{REL_TYPE_DOCUMENT}" Target="word/document.xml"/><Relationship Id="rId2" Type="{REL_TYPE_CORE}" Target="docProps/core.xml"/></Relationships>"#
    )
}

fn core_properties_xml() -> String {
    format!(
        r#"{XML_DECL}<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:title>Sample Document</dc:title><dc:creator>sampledoc {}</dc:creator></cp:coreProperties>"#,
        env!("CARGO_PKG_VERSION")
    )
}

fn document_rels_xml(doc: &Document) -> String {
    let mut out = format!(r#"{XML_DECL}<Relationships xmlns="{PKG_RELS_NS}">"#);
    for (slot, img) in doc.media.iter_loaded() {
        out.push_str(&format!(
            r#"<Relationship Id="{}" Type="{REL_TYPE_IMAGE}" Target="media/{}"/>"#,
            image_rel_id(slot),
            media_name(slot, img)
        ));
    }
    out.push_str("</Relationships>");
    out
}

fn sect_pr_xml(sp: &SectionProperties) -> String {
    format!(
        r#"<w:sectPr><w:pgSz w:w="{}" w:h="{}" w:orient="portrait"/><w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="708" w:footer="708" w:gutter="0"/><w:cols w:space="708"/><w:docGrid w:linePitch="360"/></w:sectPr>"#,
        pts_to_twips(sp.page_width),
        pts_to_twips(sp.page_height),
        pts_to_twips(sp.margin_top),
        pts_to_twips(sp.margin_right),
        pts_to_twips(sp.margin_bottom),
        pts_to_twips(sp.margin_left),
    )
}

fn run_xml(run: &Run) -> String {
    let mut rpr = String::new();
    if run.bold {
        rpr.push_str("<w:b/><w:bCs/>");
    }
    if run.italic {
        rpr.push_str("<w:i/><w:iCs/>");
    }
    let size = pts_to_half_points(run.font_size);
    rpr.push_str(&format!(r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#));
    format!(
        r#"<w:r><w:rPr>{rpr}</w:rPr><w:t xml:space="preserve">{}</w:t></w:r>"#,
        escape_xml(&run.text)
    )
}

fn drawing_xml(img: &InlineImage, media: &EmbeddedImage, doc_pr_id: u32) -> String {
    let cx = pts_to_emu(img.display_width);
    let cy = pts_to_emu(img.display_height);
    let rel_id = image_rel_id(img.slot);
    let name = escape_xml(&media.file_name);
    format!(
        concat!(
            r#"<w:r><w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0">"#,
            r#"<wp:extent cx="{cx}" cy="{cy}"/><wp:effectExtent l="0" t="0" r="0" b="0"/>"#,
            r#"<wp:docPr id="{id}" name="Picture {id}"/>"#,
            r#"<wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect="1"/></wp:cNvGraphicFramePr>"#,
            r#"<a:graphic><a:graphicData uri="{pic_ns}"><pic:pic>"#,
            r#"<pic:nvPicPr><pic:cNvPr id="{id}" name="{name}"/><pic:cNvPicPr/></pic:nvPicPr>"#,
            r#"<pic:blipFill><a:blip r:embed="{rel_id}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
            r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
            r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr>"#,
            r#"</pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r>"#,
        ),
        cx = cx,
        cy = cy,
        id = doc_pr_id,
        pic_ns = PIC_NS,
        name = name,
        rel_id = rel_id,
    )
}

fn paragraph_xml(
    para: &Paragraph,
    doc: &Document,
    sect_pr: Option<&str>,
    next_doc_pr_id: &mut u32,
) -> String {
    let mut out = format!(
        r#"<w:p><w:pPr><w:spacing w:after="{}"/>{}</w:pPr>"#,
        pts_to_twips(para.space_after),
        sect_pr.unwrap_or("")
    );
    // Slots are checked when the section is built.
    if let Some(img) = &para.image
        && let Some(media) = doc.media.get(img.slot)
    {
        out.push_str(&drawing_xml(img, media, *next_doc_pr_id));
        *next_doc_pr_id += 1;
    }
    for run in &para.runs {
        out.push_str(&run_xml(run));
    }
    out.push_str("</w:p>");
    out
}

fn document_xml(doc: &Document) -> String {
    let mut out = format!(
        r#"{XML_DECL}<w:document xmlns:w="{WML_NS}" xmlns:r="{REL_NS}" xmlns:wp="{WPD_NS}" xmlns:a="{DML_NS}" xmlns:pic="{PIC_NS}"><w:body>"#
    );
    let mut next_doc_pr_id = 1u32;
    let last_section = doc.sections.len().saturating_sub(1);

    for (si, section) in doc.sections.iter().enumerate() {
        let sect_pr = sect_pr_xml(&section.properties);
        let last_para = section.paragraphs.len().saturating_sub(1);
        for (pi, para) in section.paragraphs.iter().enumerate() {
            // A section ends at the paragraph carrying its properties;
            // the final section's properties close the body instead.
            let inline_sect_pr =
                (si != last_section && pi == last_para).then_some(sect_pr.as_str());
            out.push_str(&paragraph_xml(para, doc, inline_sect_pr, &mut next_doc_pr_id));
        }
        if si == last_section {
            out.push_str(&sect_pr);
        }
    }

    out.push_str("</w:body></w:document>");
    out
}

pub(super) fn write_package(doc: &Document) -> Result<Vec<u8>, Error> {
    let t0 = std::time::Instant::now();
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());
    let media_options = options.compression_method(CompressionMethod::Stored);

    let document = document_xml(doc);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    let parts = [
        ("[Content_Types].xml", content_types_xml(doc)),
        ("_rels/.rels", package_rels_xml()),
        ("docProps/core.xml", core_properties_xml()),
        ("word/_rels/document.xml.rels", document_rels_xml(doc)),
        ("word/document.xml", document),
    ];
    for (name, xml) in &parts {
        zip.start_file(*name, options)?;
        zip.write_all(xml.as_bytes())?;
    }

    for (slot, img) in doc.media.iter_loaded() {
        zip.start_file(format!("word/media/{}", media_name(slot, img)), media_options)?;
        zip.write_all(&img.data)?;
    }

    let bytes = zip.finish()?.into_inner();
    log::debug!(
        "write_package: {} sections, {} bytes in {:.1}ms",
        doc.sections.len(),
        bytes.len(),
        t0.elapsed().as_secs_f64() * 1000.0,
    );
    Ok(bytes)
}
