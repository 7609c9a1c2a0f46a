//! Interactive preview adapter.
//!
//! Translates a `RenderedResume` into the tree the editor screen draws,
//! attaching move up / move down affordances to sections that may be freely
//! reordered.

use serde::Serialize;

use crate::document::model::ResumeDocument;
use crate::document::section_order::{SectionOrder, SectionTag};
use crate::layout::buckets::BucketRole;
use crate::layout::registry::{LayoutDefinition, StructureKind};
use crate::render::blocks::{assemble, HeaderView, RenderedResume, SectionBody};

#[derive(Debug, Clone, Serialize)]
pub struct PreviewTree {
    pub layout_id: u8,
    pub layout_name: &'static str,
    pub structure: StructureKind,
    pub accent_color: &'static str,
    pub font_family: &'static str,
    pub font_size_pt: f32,
    pub header: HeaderView,
    pub rows: Vec<PreviewRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreviewRow {
    pub columns: Vec<PreviewColumn>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreviewColumn {
    pub role: BucketRole,
    pub width_percent: u8,
    pub blocks: Vec<PreviewBlock>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreviewBlock {
    pub tag: SectionTag,
    pub title: Option<&'static str>,
    /// Absent when the section sits in a fixed bucket (`noControls`).
    pub controls: Option<ReorderControls>,
    pub body: SectionBody,
}

/// Arguments for the editor's `move_section` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReorderControls {
    pub index: usize,
    pub can_move_up: bool,
    pub can_move_down: bool,
}

pub fn render_preview(
    document: &ResumeDocument,
    order: &SectionOrder,
    layout: &'static LayoutDefinition,
) -> PreviewTree {
    to_preview(assemble(document, order, layout), order)
}

fn to_preview(rendered: RenderedResume, order: &SectionOrder) -> PreviewTree {
    let layout = rendered.layout;
    let rows = rendered
        .rows
        .into_iter()
        .map(|row| PreviewRow {
            columns: row
                .buckets
                .into_iter()
                .map(|bucket| {
                    let reorderable = bucket.reorderable;
                    PreviewColumn {
                        role: bucket.role,
                        width_percent: bucket.width_percent,
                        blocks: bucket
                            .blocks
                            .into_iter()
                            .map(|block| PreviewBlock {
                                tag: block.tag,
                                title: block.title,
                                controls: reorderable.then(|| controls_for(order, block.tag)),
                                body: block.body,
                            })
                            .collect(),
                    }
                })
                .collect(),
        })
        .collect();

    PreviewTree {
        layout_id: layout.id,
        layout_name: layout.display_name,
        structure: layout.structure,
        accent_color: layout.accent_color,
        font_family: rendered.font_family.css_stack(),
        font_size_pt: rendered.font_size_pt,
        header: rendered.header,
        rows,
    }
}

fn controls_for(order: &SectionOrder, tag: SectionTag) -> ReorderControls {
    let index = order.position(tag);
    ReorderControls {
        index,
        can_move_up: index > 0,
        can_move_down: index + 1 < order.len(),
    }
}
