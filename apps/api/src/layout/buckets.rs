//! Which sections go in which visual bucket, per structure kind.
//!
//! `top-down` has a single bucket that follows the user's section order.
//! The structured kinds pin each section to a fixed bucket; the section order
//! only decides the order of sections inside a bucket.

use serde::Serialize;

use crate::document::section_order::{SectionOrder, SectionTag};
use crate::layout::registry::StructureKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketRole {
    /// The single column of a top-down layout.
    Main,
    /// Full-width band above the grid.
    Banner,
    GridLeft,
    GridRight,
    /// The narrow column of a sidebar layout.
    Sidebar,
    /// The wide column of a sidebar layout.
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketMembers {
    /// Every section, in the user's order.
    FollowOrder,
    /// A fixed subset of sections.
    Fixed(&'static [SectionTag]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketDef {
    pub role: BucketRole,
    /// Share of the row width, in percent.
    pub width_percent: u8,
    pub members: BucketMembers,
    pub show_titles: bool,
    /// Whether per-section move up / move down affordances are offered.
    pub reorderable: bool,
}

/// One horizontal band of the page; its buckets sit side by side.
pub type BucketRow = &'static [BucketDef];

const MAIN: BucketDef = BucketDef {
    role: BucketRole::Main,
    width_percent: 100,
    members: BucketMembers::FollowOrder,
    show_titles: true,
    reorderable: true,
};

const SIDEBAR: BucketDef = BucketDef {
    role: BucketRole::Sidebar,
    width_percent: 25,
    members: BucketMembers::Fixed(&[SectionTag::Skills, SectionTag::Languages]),
    show_titles: false,
    reorderable: false,
};

const BODY: BucketDef = BucketDef {
    role: BucketRole::Body,
    width_percent: 75,
    members: BucketMembers::Fixed(&[
        SectionTag::Summary,
        SectionTag::Education,
        SectionTag::Work,
        SectionTag::Projects,
    ]),
    show_titles: true,
    reorderable: false,
};

const BANNER: BucketDef = BucketDef {
    role: BucketRole::Banner,
    width_percent: 100,
    members: BucketMembers::Fixed(&[SectionTag::Summary]),
    show_titles: true,
    reorderable: false,
};

const GRID_LEFT: BucketDef = BucketDef {
    role: BucketRole::GridLeft,
    width_percent: 50,
    members: BucketMembers::Fixed(&[
        SectionTag::Education,
        SectionTag::Skills,
        SectionTag::Languages,
    ]),
    show_titles: true,
    reorderable: false,
};

const GRID_RIGHT: BucketDef = BucketDef {
    role: BucketRole::GridRight,
    width_percent: 50,
    members: BucketMembers::Fixed(&[SectionTag::Work, SectionTag::Projects]),
    show_titles: true,
    reorderable: false,
};

static TOP_DOWN_PLAN: [BucketRow; 1] = [&[MAIN]];
static GRID_PLAN: [BucketRow; 2] = [&[BANNER], &[GRID_LEFT, GRID_RIGHT]];
static SIDEBAR_LEFT_PLAN: [BucketRow; 1] = [&[SIDEBAR, BODY]];
static SIDEBAR_RIGHT_PLAN: [BucketRow; 1] = [&[BODY, SIDEBAR]];

/// Rows of buckets, top to bottom, for a structure kind.
pub fn bucket_plan(kind: StructureKind) -> &'static [BucketRow] {
    match kind {
        StructureKind::TopDown => &TOP_DOWN_PLAN,
        StructureKind::Grid2Col => &GRID_PLAN,
        StructureKind::SidebarLeft => &SIDEBAR_LEFT_PLAN,
        StructureKind::SidebarRight => &SIDEBAR_RIGHT_PLAN,
    }
}

impl BucketDef {
    /// The bucket's sections in rendering order.
    pub fn sections(&self, order: &SectionOrder) -> Vec<SectionTag> {
        match self.members {
            BucketMembers::FollowOrder => order.tags().to_vec(),
            BucketMembers::Fixed(members) => order
                .tags()
                .iter()
                .copied()
                .filter(|tag| members.contains(tag))
                .collect(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
