//! Section assembly: the one place that decides what each section shows.
//!
//! `assemble` folds a layout's bucket plan over the document and produces a
//! `RenderedResume`. The preview and export adapters only translate that
//! structure; neither re-implements the emptiness or cleaning rules.

use serde::Serialize;

use crate::document::bullets::{clean_bullets, display_lines};
use crate::document::model::{FontFamily, NamedItem, ResumeDocument};
use crate::document::section_order::{SectionOrder, SectionTag};
use crate::layout::buckets::{bucket_plan, BucketDef, BucketRole};
use crate::layout::registry::{BorderTreatment, LayoutDefinition, StructureKind, TextAlignment};

pub const NAME_PLACEHOLDER: &str = "YOUR NAME";

#[derive(Debug, Clone, Serialize)]
pub struct RenderedResume {
    pub layout: &'static LayoutDefinition,
    pub font_family: FontFamily,
    pub font_size_pt: f32,
    pub header: HeaderView,
    pub rows: Vec<RenderedRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderView {
    pub name: String,
    pub contacts: Vec<Contact>,
    pub alignment: TextAlignment,
    pub rules: HeaderRules,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    Email,
    Phone,
    Linkedin,
    Github,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contact {
    pub kind: ContactKind,
    pub value: String,
}

/// Rule widths (px) drawn around the header, in the layout's accent colour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HeaderRules {
    pub top_px: u8,
    pub bottom_px: u8,
    pub left_px: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedRow {
    pub buckets: Vec<RenderedBucket>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedBucket {
    pub role: BucketRole,
    pub width_percent: u8,
    pub reorderable: bool,
    pub blocks: Vec<SectionBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionBlock {
    pub tag: SectionTag,
    pub title: Option<&'static str>,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionBody {
    /// Free text; one entry per line.
    Paragraph { lines: Vec<String> },
    Entries { entries: Vec<EntryView> },
    /// Dense two-column grid of names.
    NameGrid { names: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryView {
    pub heading: String,
    pub link: Option<String>,
    pub subtitle: Option<String>,
    pub dates: String,
    pub lines: Vec<String>,
}

#[cfg(test)]
impl RenderedResume {
    /// All section blocks in page order: row by row, bucket by bucket.
    pub fn blocks(&self) -> impl Iterator<Item = &SectionBlock> {
        self.rows
            .iter()
            .flat_map(|row| row.buckets.iter())
            .flat_map(|bucket| bucket.blocks.iter())
    }
}

/// Builds the renderable structure. Never mutates the document.
pub fn assemble(
    document: &ResumeDocument,
    order: &SectionOrder,
    layout: &'static LayoutDefinition,
) -> RenderedResume {
    let rows = bucket_plan(layout.structure)
        .iter()
        .map(|row| RenderedRow {
            buckets: row
                .iter()
                .map(|bucket| assemble_bucket(document, order, bucket))
                .collect(),
        })
        .filter(|row| row.buckets.iter().any(|b| !b.blocks.is_empty()))
        .collect();

    RenderedResume {
        layout,
        font_family: document.settings.font_family,
        font_size_pt: document.settings.font_size,
        header: header_view(document, layout),
        rows,
    }
}

fn assemble_bucket(
    document: &ResumeDocument,
    order: &SectionOrder,
    bucket: &BucketDef,
) -> RenderedBucket {
    let blocks = bucket
        .sections(order)
        .into_iter()
        .filter_map(|tag| {
            section_body(document, tag).map(|body| SectionBlock {
                tag,
                title: bucket.show_titles.then(|| tag.title()),
                body,
            })
        })
        .collect();

    RenderedBucket {
        role: bucket.role,
        width_percent: bucket.width_percent,
        reorderable: bucket.reorderable,
        blocks,
    }
}

/// The body of a section, or `None` when it has nothing to show.
pub fn section_body(document: &ResumeDocument, tag: SectionTag) -> Option<SectionBody> {
    match tag {
        SectionTag::Summary => {
            let summary = &document.summary;
            if !summary.visible || summary.content.trim().is_empty() {
                return None;
            }
            let lines = clean_bullets(&summary.content)
                .split('\n')
                .map(|l| l.trim_end().to_string())
                .collect();
            Some(SectionBody::Paragraph { lines })
        }
        SectionTag::Education => {
            let entries: Vec<_> = document
                .education
                .iter()
                .filter(|e| e.visible)
                .map(|e| EntryView {
                    heading: or_placeholder(&e.school, "School"),
                    link: None,
                    subtitle: Some(or_placeholder(&e.degree, "Degree")),
                    dates: date_range(&e.start, &e.end, ""),
                    lines: vec![],
                })
                .collect();
            non_empty_entries(entries)
        }
        SectionTag::Work => {
            let entries: Vec<_> = document
                .work
                .iter()
                .filter(|w| w.visible)
                .map(|w| EntryView {
                    heading: or_placeholder(&w.company, "Company"),
                    link: None,
                    subtitle: Some(or_placeholder(&w.role, "Position")),
                    dates: date_range(&w.start, &w.end, "Present"),
                    lines: display_lines(&w.description),
                })
                .collect();
            non_empty_entries(entries)
        }
        SectionTag::Projects => {
            let entries: Vec<_> = document
                .projects
                .iter()
                .filter(|p| p.visible)
                .map(|p| EntryView {
                    heading: or_placeholder(&p.name, "Project"),
                    link: non_blank(&p.link),
                    subtitle: None,
                    dates: date_range(&p.start, &p.end, ""),
                    lines: display_lines(&p.description),
                })
                .collect();
            non_empty_entries(entries)
        }
        SectionTag::Skills => name_grid(&document.skills, "Skill"),
        SectionTag::Languages => name_grid(&document.languages, "Language"),
    }
}

fn non_empty_entries(entries: Vec<EntryView>) -> Option<SectionBody> {
    (!entries.is_empty()).then_some(SectionBody::Entries { entries })
}

fn name_grid(items: &[NamedItem], placeholder: &str) -> Option<SectionBody> {
    if items.is_empty() {
        return None;
    }
    Some(SectionBody::NameGrid {
        names: items
            .iter()
            .map(|i| or_placeholder(&i.name, placeholder))
            .collect(),
    })
}

fn header_view(document: &ResumeDocument, layout: &LayoutDefinition) -> HeaderView {
    let p = &document.personal;
    let contacts = [
        (ContactKind::Email, &p.email),
        (ContactKind::Phone, &p.phone),
        (ContactKind::Linkedin, &p.linkedin_handle),
        (ContactKind::Github, &p.github_handle),
    ]
    .into_iter()
    .filter_map(|(kind, value)| non_blank(value).map(|value| Contact { kind, value }))
    .collect();

    HeaderView {
        name: or_placeholder(&p.name, NAME_PLACEHOLDER),
        contacts,
        alignment: layout.alignment,
        rules: header_rules(layout),
    }
}

/// Bottom rules are only drawn on single-column layouts, where the header
/// spans the full page width above every section.
pub fn header_rules(layout: &LayoutDefinition) -> HeaderRules {
    let mut rules = match layout.border {
        BorderTreatment::None => HeaderRules::default(),
        BorderTreatment::Bottom(w) => HeaderRules {
            bottom_px: w,
            ..HeaderRules::default()
        },
        BorderTreatment::Top(w) => HeaderRules {
            top_px: w,
            ..HeaderRules::default()
        },
        BorderTreatment::TopAndBottom(w) => HeaderRules {
            top_px: w,
            bottom_px: w,
            ..HeaderRules::default()
        },
        BorderTreatment::Left(w) => HeaderRules {
            left_px: w,
            ..HeaderRules::default()
        },
    };
    if layout.structure != StructureKind::TopDown {
        rules.bottom_px = 0;
    }
    rules
}

fn date_range(start: &str, end: &str, open_end: &str) -> String {
    let start = start.trim();
    let end = match end.trim() {
        "" => open_end,
        end => end,
    };
    match (start.is_empty(), end.is_empty()) {
        (true, true) => String::new(),
        _ => format!("{start} — {end}").trim().to_string(),
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    non_blank(value).unwrap_or_else(|| placeholder.to_string())
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
