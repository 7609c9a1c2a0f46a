//! The fixed catalog of visual layouts.
//!
//! Layouts differ only in a handful of declarative attributes, so they live in
//! a static table rather than behind a trait.

use serde::Serialize;
use tracing::debug;

/// How sections are arranged on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StructureKind {
    TopDown,
    #[serde(rename = "grid-2col")]
    Grid2Col,
    SidebarLeft,
    SidebarRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    Left,
    Center,
}

impl TextAlignment {
    pub fn css(self) -> &'static str {
        match self {
            TextAlignment::Left => "left",
            TextAlignment::Center => "center",
        }
    }

    /// Flexbox `justify-content` value that lines up a row of items the same way.
    pub fn justify(self) -> &'static str {
        match self {
            TextAlignment::Left => "flex-start",
            TextAlignment::Center => "center",
        }
    }
}

/// Decorative rule drawn around the resume header. Widths are in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "width", rename_all = "snake_case")]
pub enum BorderTreatment {
    None,
    Bottom(u8),
    Top(u8),
    TopAndBottom(u8),
    Left(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutDefinition {
    pub id: u8,
    pub display_name: &'static str,
    pub structure: StructureKind,
    pub alignment: TextAlignment,
    pub border: BorderTreatment,
    pub accent_color: &'static str,
}

pub const DEFAULT_LAYOUT_ID: u8 = 1;

pub static LAYOUTS: [LayoutDefinition; 10] = [
    LayoutDefinition {
        id: 1,
        display_name: "Classic ATS",
        structure: StructureKind::TopDown,
        alignment: TextAlignment::Left,
        border: BorderTreatment::Bottom(2),
        accent_color: "#000000",
    },
    LayoutDefinition {
        id: 2,
        display_name: "Modern Professional",
        structure: StructureKind::TopDown,
        alignment: TextAlignment::Left,
        border: BorderTreatment::Bottom(2),
        accent_color: "#1e293b",
    },
    LayoutDefinition {
        id: 3,
        display_name: "Executive",
        structure: StructureKind::TopDown,
        alignment: TextAlignment::Center,
        border: BorderTreatment::TopAndBottom(2),
        accent_color: "#000000",
    },
    LayoutDefinition {
        id: 4,
        display_name: "Minimalist ATS",
        structure: StructureKind::TopDown,
        alignment: TextAlignment::Left,
        border: BorderTreatment::None,
        accent_color: "#475569",
    },
    LayoutDefinition {
        id: 5,
        display_name: "Tech Focus",
        structure: StructureKind::Grid2Col,
        alignment: TextAlignment::Left,
        border: BorderTreatment::Top(4),
        accent_color: "#2563eb",
    },
    LayoutDefinition {
        id: 6,
        display_name: "Academic",
        structure: StructureKind::SidebarLeft,
        alignment: TextAlignment::Left,
        border: BorderTreatment::Left(4),
        accent_color: "#7c3aed",
    },
    LayoutDefinition {
        id: 7,
        display_name: "Creative Professional",
        structure: StructureKind::SidebarRight,
        alignment: TextAlignment::Left,
        border: BorderTreatment::None,
        accent_color: "#dc2626",
    },
    LayoutDefinition {
        id: 8,
        display_name: "Corporate",
        structure: StructureKind::TopDown,
        alignment: TextAlignment::Left,
        border: BorderTreatment::Bottom(8),
        accent_color: "#0f172a",
    },
    LayoutDefinition {
        id: 9,
        display_name: "Clean Lines",
        structure: StructureKind::Grid2Col,
        alignment: TextAlignment::Left,
        border: BorderTreatment::Bottom(1),
        accent_color: "#1e40af",
    },
    LayoutDefinition {
        id: 10,
        display_name: "Simple & Effective",
        structure: StructureKind::TopDown,
        alignment: TextAlignment::Left,
        border: BorderTreatment::Bottom(2),
        accent_color: "#334155",
    },
];

/// Resolves a layout id. Anything outside 1–10 is treated as layout 1.
pub fn layout_for(id: i64) -> &'static LayoutDefinition {
    match LAYOUTS.iter().find(|l| i64::from(l.id) == id) {
        Some(layout) => layout,
        None => {
            debug!("Unknown layout id {id}, using layout {DEFAULT_LAYOUT_ID}");
            &LAYOUTS[0]
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
