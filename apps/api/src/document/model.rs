//! The resume data model shared by the editor, the renderer and the saved-resume library.
//!
//! Field names on the wire follow the JSON blobs the web client has always saved
//! (`linkedin`, `desc`, `themeColor`, ...), so records written before this service
//! existed still load. Every field defaults when absent.

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

/// Marker the editor seeds into empty bullet descriptions.
pub const BULLET_MARKER: &str = "• ";

pub const MIN_FONT_SIZE_PT: f32 = 8.0;
pub const MAX_FONT_SIZE_PT: f32 = 14.0;

/// Notice surfaced when a saved record could not be parsed.
pub const LOAD_FAILED_NOTICE: &str = "could not load saved data";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ResumeDocument {
    pub personal: PersonalInfo,
    pub summary: Summary,
    pub education: Vec<EducationItem>,
    pub work: Vec<WorkItem>,
    pub projects: Vec<ProjectItem>,
    pub skills: Vec<NamedItem>,
    pub languages: Vec<NamedItem>,
    pub settings: Settings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "linkedin", alias = "linkedinHandle")]
    pub linkedin_handle: String,
    #[serde(rename = "github", alias = "githubHandle")]
    pub github_handle: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Summary {
    pub content: String,
    pub visible: bool,
}

impl Default for Summary {
    fn default() -> Self {
        Self {
            content: String::new(),
            visible: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationItem {
    pub id: String,
    pub school: String,
    pub degree: String,
    pub start: String,
    pub end: String,
    pub visible: bool,
}

impl Default for EducationItem {
    fn default() -> Self {
        Self {
            id: new_item_id(),
            school: String::new(),
            degree: String::new(),
            start: String::new(),
            end: String::new(),
            visible: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkItem {
    pub id: String,
    pub company: String,
    pub role: String,
    pub start: String,
    pub end: String,
    #[serde(rename = "desc", alias = "description")]
    pub description: String,
    pub visible: bool,
}

impl Default for WorkItem {
    fn default() -> Self {
        Self {
            id: new_item_id(),
            company: String::new(),
            role: String::new(),
            start: String::new(),
            end: String::new(),
            description: BULLET_MARKER.to_string(),
            visible: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectItem {
    pub id: String,
    pub name: String,
    pub link: String,
    pub start: String,
    pub end: String,
    #[serde(rename = "desc", alias = "description")]
    pub description: String,
    pub visible: bool,
}

impl Default for ProjectItem {
    fn default() -> Self {
        Self {
            id: new_item_id(),
            name: String::new(),
            link: String::new(),
            start: String::new(),
            end: String::new(),
            description: BULLET_MARKER.to_string(),
            visible: true,
        }
    }
}

/// A skill or a language. Only the name is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedItem {
    pub id: String,
    pub name: String,
}

impl Default for NamedItem {
    fn default() -> Self {
        Self {
            id: new_item_id(),
            name: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub theme_color: String,
    pub font_family: FontFamily,
    /// Points.
    pub font_size: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme_color: "#2563eb".to_string(),
            font_family: FontFamily::Georgia,
            font_size: 11.0,
        }
    }
}

/// The fonts offered in the design panel. Serialized as the CSS font stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FontFamily {
    #[default]
    #[serde(rename = "Georgia, serif")]
    Georgia,
    #[serde(rename = "'Times New Roman', serif")]
    TimesNewRoman,
    #[serde(rename = "'Playfair Display', serif")]
    PlayfairDisplay,
    #[serde(rename = "'Merriweather', serif")]
    Merriweather,
    #[serde(rename = "'Inter', sans-serif")]
    Inter,
    #[serde(rename = "'Roboto', sans-serif")]
    Roboto,
    #[serde(rename = "'Open Sans', sans-serif")]
    OpenSans,
    #[serde(rename = "'Poppins', sans-serif")]
    Poppins,
    #[serde(rename = "'Montserrat', sans-serif")]
    Montserrat,
    #[serde(rename = "'Lato', sans-serif")]
    Lato,
    #[serde(rename = "'Courier New', monospace")]
    CourierNew,
    #[serde(rename = "'Fira Code', monospace")]
    FiraCode,
}

impl FontFamily {
    /// The CSS `font-family` value.
    pub fn css_stack(self) -> &'static str {
        match self {
            FontFamily::Georgia => "Georgia, serif",
            FontFamily::TimesNewRoman => "'Times New Roman', serif",
            FontFamily::PlayfairDisplay => "'Playfair Display', serif",
            FontFamily::Merriweather => "'Merriweather', serif",
            FontFamily::Inter => "'Inter', sans-serif",
            FontFamily::Roboto => "'Roboto', sans-serif",
            FontFamily::OpenSans => "'Open Sans', sans-serif",
            FontFamily::Poppins => "'Poppins', sans-serif",
            FontFamily::Montserrat => "'Montserrat', sans-serif",
            FontFamily::Lato => "'Lato', sans-serif",
            FontFamily::CourierNew => "'Courier New', monospace",
            FontFamily::FiraCode => "'Fira Code', monospace",
        }
    }
}

/// Result of hydrating a document from a saved record.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub document: ResumeDocument,
    /// Set when the saved data was unreadable and defaults were used instead.
    pub notice: Option<String>,
}

impl ResumeDocument {
    /// A fresh editor document: one blank entry per collection, summary empty.
    pub fn fresh() -> Self {
        Self {
            personal: PersonalInfo::default(),
            summary: Summary::default(),
            education: vec![EducationItem::default()],
            work: vec![WorkItem::default()],
            projects: vec![ProjectItem::default()],
            skills: vec![NamedItem::default()],
            languages: vec![NamedItem::default()],
            settings: Settings::default(),
        }
    }

    /// Parses a saved JSON blob. Never fails: unreadable data yields a fresh
    /// document plus a notice for the user.
    pub fn from_saved_json(text: &str) -> LoadedDocument {
        match serde_json::from_str::<ResumeDocument>(text) {
            Ok(document) => LoadedDocument {
                document,
                notice: None,
            },
            Err(e) => {
                warn!("Saved resume data is unreadable, falling back to defaults: {e}");
                LoadedDocument {
                    document: ResumeDocument::fresh(),
                    notice: Some(LOAD_FAILED_NOTICE.to_string()),
                }
            }
        }
    }
}

/// Fresh, stable identifier for a collection item.
pub fn new_item_id() -> String {
    Uuid::new_v4().to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
