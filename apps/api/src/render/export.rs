//! Static export adapter: a self-contained, print-ready HTML document.
//!
//! The browser's "print to PDF" turns this into the final file; nothing here
//! writes a PDF directly.

use crate::document::model::ResumeDocument;
use crate::document::section_order::{SectionOrder, SectionTag};
use crate::layout::buckets::BucketRole;
use crate::layout::registry::LayoutDefinition;
use crate::render::blocks::{
    assemble, ContactKind, EntryView, HeaderView, RenderedBucket, RenderedResume, SectionBlock,
    SectionBody,
};

const FONT_IMPORT: &str = "@import url('https://fonts.googleapis.com/css2?family=Inter:wght@400;700&family=Roboto:wght@400;700&family=Open+Sans:wght@400;700&family=Poppins:wght@400;700&family=Montserrat:wght@400;700&family=Lato:wght@400;700&family=Merriweather:wght@400;700&family=Playfair+Display:wght@400;700&family=Fira+Code:wght@400;700&display=swap');";

/// Gap between side-by-side columns.
const COLUMN_GAP_PX: u8 = 20;

#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Document title; browsers use it as the suggested PDF file name.
    pub title: String,
    /// Open the print dialog as soon as the document loads.
    pub auto_print: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            title: "Resume".to_string(),
            auto_print: false,
        }
    }
}

pub fn render_export_document(
    document: &ResumeDocument,
    order: &SectionOrder,
    layout: &'static LayoutDefinition,
    options: &ExportOptions,
) -> String {
    to_html(&assemble(document, order, layout), options)
}

fn to_html(rendered: &RenderedResume, options: &ExportOptions) -> String {
    let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(&options.title)));
    html.push_str("<style>\n");
    html.push_str(&stylesheet(rendered));
    html.push_str("</style>\n</head>\n<body>\n<div class=\"resume-container\">\n");

    html.push_str(&header_html(&rendered.header, rendered.layout.accent_color));

    for row in &rendered.rows {
        let side_by_side = row.buckets.len() > 1;
        if side_by_side {
            html.push_str(&format!(
                "<div class=\"row\" style=\"display: flex; gap: {COLUMN_GAP_PX}px;\">\n"
            ));
        } else {
            html.push_str("<div class=\"row\">\n");
        }
        for bucket in &row.buckets {
            html.push_str(&bucket_html(bucket, side_by_side));
        }
        html.push_str("</div>\n");
    }

    html.push_str("</div>\n");
    if options.auto_print {
        html.push_str("<script>window.onload = function () { window.print(); };</script>\n");
    }
    html.push_str("</body>\n</html>\n");
    html
}

fn stylesheet(rendered: &RenderedResume) -> String {
    let accent = rendered.layout.accent_color;
    let font = rendered.font_family.css_stack();
    let size = rendered.font_size_pt;
    let align = rendered.header.alignment.css();
    format!(
        r#"{FONT_IMPORT}
@page {{ size: A4; margin: 20mm; }}
* {{ margin: 0; padding: 0; box-sizing: border-box; }}
body {{ font-family: {font}; font-size: {size}pt; line-height: 1.5; color: #000000; background: white; }}
.resume-container {{ max-width: 100%; margin: 0 auto; }}
header {{ text-align: {align}; margin-bottom: 20px; }}
h1 {{ font-size: 32pt; font-weight: 900; text-transform: uppercase; margin-bottom: 10px; }}
.contact-info {{ display: flex; flex-wrap: wrap; gap: 15px; font-size: 9pt; font-weight: bold; text-transform: uppercase; color: #666666; }}
.section {{ margin-bottom: 15px; page-break-inside: avoid; break-inside: avoid; }}
.section-title {{ font-size: 12pt; font-weight: 900; text-transform: uppercase; color: {accent}; border-bottom: 1px solid #e5e5e5; padding-bottom: 5px; margin-bottom: 10px; }}
.section-content {{ padding-left: 5px; }}
.entry {{ margin-bottom: 12px; page-break-inside: avoid; break-inside: avoid; }}
.entry-header {{ display: flex; justify-content: space-between; font-weight: bold; margin-bottom: 3px; }}
.link {{ font-weight: normal; font-size: 8pt; }}
.date {{ font-size: 8pt; color: #666666; text-transform: uppercase; }}
.position {{ font-style: italic; color: {accent}; margin-bottom: 5px; }}
.description {{ font-size: 9pt; line-height: 1.4; text-align: justify; }}
.summary-content {{ font-size: 10pt; line-height: 1.6; text-align: justify; }}
.name-grid {{ display: grid; grid-template-columns: 1fr 1fr; gap: 0 10px; }}
.name-item {{ padding: 3px 0; border-bottom: 1px solid #f0f0f0; page-break-inside: avoid; break-inside: avoid; }}
"#
    )
}

fn header_html(header: &HeaderView, accent: &str) -> String {
    let mut style = Vec::new();
    let rules = header.rules;
    if rules.top_px > 0 {
        style.push(format!(
            "border-top: {}px solid {accent}; padding-top: 1.5rem;",
            rules.top_px
        ));
    }
    if rules.bottom_px > 0 {
        style.push(format!(
            "border-bottom: {}px solid {accent}; padding-bottom: 1.5rem;",
            rules.bottom_px
        ));
    }
    if rules.left_px > 0 {
        style.push(format!(
            "border-left: {}px solid {accent}; padding-left: 1rem;",
            rules.left_px
        ));
    }

    let mut html = if style.is_empty() {
        "<header>\n".to_string()
    } else {
        format!("<header style=\"{}\">\n", style.join(" "))
    };
    html.push_str(&format!("<h1>{}</h1>\n", escape_html(&header.name)));
    if !header.contacts.is_empty() {
        html.push_str(&format!(
            "<div class=\"contact-info\" style=\"justify-content: {};\">\n",
            header.alignment.justify()
        ));
        for contact in &header.contacts {
            let class = match contact.kind {
                ContactKind::Email => "email",
                ContactKind::Phone => "phone",
                ContactKind::Linkedin => "linkedin",
                ContactKind::Github => "github",
            };
            html.push_str(&format!(
                "<span class=\"contact {class}\">{}</span>\n",
                escape_html(&contact.value)
            ));
        }
        html.push_str("</div>\n");
    }
    html.push_str("</header>\n");
    html
}

fn bucket_html(bucket: &RenderedBucket, side_by_side: bool) -> String {
    let class = match bucket.role {
        BucketRole::Main => "main",
        BucketRole::Banner => "banner",
        BucketRole::GridLeft => "grid-left",
        BucketRole::GridRight => "grid-right",
        BucketRole::Sidebar => "sidebar",
        BucketRole::Body => "body",
    };
    let mut html = if side_by_side {
        format!(
            "<div class=\"column {class}\" style=\"width: {}%;\">\n",
            bucket.width_percent
        )
    } else {
        format!("<div class=\"column {class}\">\n")
    };
    for block in &bucket.blocks {
        html.push_str(&section_html(block));
    }
    html.push_str("</div>\n");
    html
}

fn section_html(block: &SectionBlock) -> String {
    let mut html = format!("<div class=\"section {}\">\n", section_class(block.tag));
    if let Some(title) = block.title {
        html.push_str(&format!(
            "<h3 class=\"section-title\">{}</h3>\n",
            escape_html(title)
        ));
    }
    html.push_str("<div class=\"section-content\">\n");
    match &block.body {
        SectionBody::Paragraph { lines } => {
            html.push_str(&format!(
                "<p class=\"summary-content\">{}</p>\n",
                join_lines(lines)
            ));
        }
        SectionBody::Entries { entries } => {
            for entry in entries {
                html.push_str(&entry_html(entry));
            }
        }
        SectionBody::NameGrid { names } => {
            html.push_str("<div class=\"name-grid\">\n");
            for name in names {
                html.push_str(&format!(
                    "<div class=\"name-item\">{}</div>\n",
                    escape_html(name)
                ));
            }
            html.push_str("</div>\n");
        }
    }
    html.push_str("</div>\n</div>\n");
    html
}

fn entry_html(entry: &EntryView) -> String {
    let mut html = String::from("<div class=\"entry\">\n<div class=\"entry-header\">\n<span>");
    html.push_str(&escape_html(&entry.heading));
    if let Some(link) = &entry.link {
        html.push_str(&format!(" <span class=\"link\">({})</span>", escape_html(link)));
    }
    html.push_str(&format!(
        "</span>\n<span class=\"date\">{}</span>\n</div>\n",
        escape_html(&entry.dates)
    ));
    if let Some(subtitle) = &entry.subtitle {
        html.push_str(&format!(
            "<div class=\"position\">{}</div>\n",
            escape_html(subtitle)
        ));
    }
    if !entry.lines.is_empty() {
        html.push_str(&format!(
            "<div class=\"description\">{}</div>\n",
            join_lines(&entry.lines)
        ));
    }
    html.push_str("</div>\n");
    html
}

fn section_class(tag: SectionTag) -> &'static str {
    match tag {
        SectionTag::Summary => "summary",
        SectionTag::Education => "education",
        SectionTag::Work => "work",
        SectionTag::Projects => "projects",
        SectionTag::Skills => "skills",
        SectionTag::Languages => "languages",
    }
}

fn join_lines(lines: &[String]) -> String {
    lines
        .iter()
        .map(|l| escape_html(l))
        .collect::<Vec<_>>()
        .join("<br>")
}

/// Escapes text for use in HTML element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
