//! Field-level edits applied by the editing session.
//!
//! Each command changes exactly one leaf of the document (or adds/removes one
//! collection item). Collection items are addressed by their stable id.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::bullets::insert_bullet_break;
use crate::document::model::{
    EducationItem, FontFamily, NamedItem, ProjectItem, ResumeDocument, WorkItem,
    MAX_FONT_SIZE_PT, MIN_FONT_SIZE_PT,
};
use crate::document::section_order::{MoveDirection, SectionOrder};

/// The repeatable sections of a resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListSection {
    Education,
    Work,
    Projects,
    Skills,
    Languages,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalField {
    Name,
    Email,
    Phone,
    Linkedin,
    Github,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemField {
    Company,
    Role,
    School,
    Degree,
    Name,
    Link,
    Start,
    End,
    Description,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditCommand {
    SetPersonal {
        field: PersonalField,
        value: String,
    },
    SetSummary {
        content: String,
    },
    SetSummaryVisible {
        visible: bool,
    },
    SetItemField {
        section: ListSection,
        id: String,
        field: ItemField,
        value: String,
    },
    SetItemVisible {
        section: ListSection,
        id: String,
        visible: bool,
    },
    AddItem {
        section: ListSection,
    },
    DeleteItem {
        section: ListSection,
        id: String,
    },
    MoveSection {
        index: usize,
        direction: MoveDirection,
    },
    /// The paragraph-break key inside a bulleted description.
    BreakBulletLine {
        section: ListSection,
        id: String,
        cursor: usize,
    },
    SetLayout {
        layout_id: i64,
    },
    SetFontFamily {
        font_family: FontFamily,
    },
    SetFontSize {
        font_size: f32,
    },
    SetThemeColor {
        color: String,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    #[error("{0}")]
    Invalid(String),
    #[error("no {section:?} item with id '{id}'")]
    UnknownItem { section: ListSection, id: String },
}

/// What an edit produced besides the mutation itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EditOutcome {
    /// Cursor position after a bulleted line break.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<usize>,
    /// Id of an item created by `add_item`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_id: Option<String>,
    /// False when a `move_section` fell off either end.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moved: Option<bool>,
}

/// The editable state of one session: document, order and chosen layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditableResume {
    pub document: ResumeDocument,
    pub section_order: SectionOrder,
    /// Raw layout id as selected; unknown ids render as layout 1.
    pub layout_id: i64,
}

impl EditableResume {
    pub fn new(document: ResumeDocument) -> Self {
        Self {
            document,
            section_order: SectionOrder::default(),
            layout_id: 1,
        }
    }

    pub fn apply(&mut self, command: EditCommand) -> Result<EditOutcome, EditError> {
        let doc = &mut self.document;
        let mut outcome = EditOutcome::default();

        match command {
            EditCommand::SetPersonal { field, value } => {
                let slot = match field {
                    PersonalField::Name => &mut doc.personal.name,
                    PersonalField::Email => &mut doc.personal.email,
                    PersonalField::Phone => &mut doc.personal.phone,
                    PersonalField::Linkedin => &mut doc.personal.linkedin_handle,
                    PersonalField::Github => &mut doc.personal.github_handle,
                };
                *slot = value;
            }
            EditCommand::SetSummary { content } => doc.summary.content = content,
            EditCommand::SetSummaryVisible { visible } => doc.summary.visible = visible,
            EditCommand::SetItemField {
                section,
                id,
                field,
                value,
            } => {
                if matches!(field, ItemField::Start | ItemField::End) {
                    validate_month(&value)?;
                }
                *item_field_mut(doc, section, &id, field)? = value;
            }
            EditCommand::SetItemVisible {
                section,
                id,
                visible,
            } => {
                let slot = match section {
                    ListSection::Education => find(&mut doc.education, &id, |i| &i.id)
                        .map(|i| &mut i.visible),
                    ListSection::Work => find(&mut doc.work, &id, |i| &i.id).map(|i| &mut i.visible),
                    ListSection::Projects => {
                        find(&mut doc.projects, &id, |i| &i.id).map(|i| &mut i.visible)
                    }
                    ListSection::Skills | ListSection::Languages => {
                        return Err(EditError::Invalid(format!(
                            "{section:?} items have no visibility flag"
                        )))
                    }
                };
                *slot.ok_or(EditError::UnknownItem { section, id })? = visible;
            }
            EditCommand::AddItem { section } => {
                let id = match section {
                    ListSection::Education => push_default::<EducationItem>(&mut doc.education, |i| &i.id),
                    ListSection::Work => push_default::<WorkItem>(&mut doc.work, |i| &i.id),
                    ListSection::Projects => push_default::<ProjectItem>(&mut doc.projects, |i| &i.id),
                    ListSection::Skills => push_default::<NamedItem>(&mut doc.skills, |i| &i.id),
                    ListSection::Languages => push_default::<NamedItem>(&mut doc.languages, |i| &i.id),
                };
                outcome.created_id = Some(id);
            }
            EditCommand::DeleteItem { section, id } => {
                let removed = match section {
                    ListSection::Education => remove(&mut doc.education, &id, |i| &i.id),
                    ListSection::Work => remove(&mut doc.work, &id, |i| &i.id),
                    ListSection::Projects => remove(&mut doc.projects, &id, |i| &i.id),
                    ListSection::Skills => remove(&mut doc.skills, &id, |i| &i.id),
                    ListSection::Languages => remove(&mut doc.languages, &id, |i| &i.id),
                };
                if !removed {
                    return Err(EditError::UnknownItem { section, id });
                }
            }
            EditCommand::MoveSection { index, direction } => {
                outcome.moved = Some(self.section_order.move_section(index, direction));
            }
            EditCommand::BreakBulletLine {
                section,
                id,
                cursor,
            } => {
                if !matches!(section, ListSection::Work | ListSection::Projects) {
                    return Err(EditError::Invalid(format!(
                        "{section:?} has no bulleted description"
                    )));
                }
                let text = item_field_mut(doc, section, &id, ItemField::Description)?;
                let (updated, new_cursor) = insert_bullet_break(text, cursor);
                *text = updated;
                outcome.cursor = Some(new_cursor);
            }
            EditCommand::SetLayout { layout_id } => self.layout_id = layout_id,
            EditCommand::SetFontFamily { font_family } => doc.settings.font_family = font_family,
            EditCommand::SetFontSize { font_size } => {
                validate_font_size(font_size)?;
                doc.settings.font_size = font_size;
            }
            EditCommand::SetThemeColor { color } => {
                validate_hex_color(&color)?;
                doc.settings.theme_color = color;
            }
        }

        Ok(outcome)
    }
}

fn item_field_mut<'a>(
    doc: &'a mut ResumeDocument,
    section: ListSection,
    id: &str,
    field: ItemField,
) -> Result<&'a mut String, EditError> {
    let unknown_item = || EditError::UnknownItem {
        section,
        id: id.to_string(),
    };
    let slot = match section {
        ListSection::Education => {
            let item = find(&mut doc.education, id, |i| &i.id).ok_or_else(unknown_item)?;
            match field {
                ItemField::School => Some(&mut item.school),
                ItemField::Degree => Some(&mut item.degree),
                ItemField::Start => Some(&mut item.start),
                ItemField::End => Some(&mut item.end),
                _ => None,
            }
        }
        ListSection::Work => {
            let item = find(&mut doc.work, id, |i| &i.id).ok_or_else(unknown_item)?;
            match field {
                ItemField::Company => Some(&mut item.company),
                ItemField::Role => Some(&mut item.role),
                ItemField::Start => Some(&mut item.start),
                ItemField::End => Some(&mut item.end),
                ItemField::Description => Some(&mut item.description),
                _ => None,
            }
        }
        ListSection::Projects => {
            let item = find(&mut doc.projects, id, |i| &i.id).ok_or_else(unknown_item)?;
            match field {
                ItemField::Name => Some(&mut item.name),
                ItemField::Link => Some(&mut item.link),
                ItemField::Start => Some(&mut item.start),
                ItemField::End => Some(&mut item.end),
                ItemField::Description => Some(&mut item.description),
                _ => None,
            }
        }
        ListSection::Skills | ListSection::Languages => {
            let items = if section == ListSection::Skills {
                &mut doc.skills
            } else {
                &mut doc.languages
            };
            let item = find(items, id, |i| &i.id).ok_or_else(unknown_item)?;
            match field {
                ItemField::Name => Some(&mut item.name),
                _ => None,
            }
        }
    };
    slot.ok_or_else(|| EditError::Invalid(format!("{section:?} items have no {field:?} field")))
}

fn find<'a, T>(items: &'a mut [T], id: &str, key: impl Fn(&T) -> &String) -> Option<&'a mut T> {
    items.iter_mut().find(|item| key(item) == id)
}

fn remove<T>(items: &mut Vec<T>, id: &str, key: impl Fn(&T) -> &String) -> bool {
    let before = items.len();
    items.retain(|item| key(item) != id);
    items.len() != before
}

fn push_default<T: Default>(items: &mut Vec<T>, key: impl Fn(&T) -> &String) -> String {
    let item = T::default();
    let id = key(&item).clone();
    items.push(item);
    id
}

/// Accepts `YYYY-MM` or an empty string.
pub fn validate_month(value: &str) -> Result<(), EditError> {
    if value.is_empty() {
        return Ok(());
    }
    let well_formed = value.len() == 7
        && NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d").is_ok();
    if well_formed {
        Ok(())
    } else {
        Err(EditError::Invalid(format!(
            "'{value}' is not a YYYY-MM month"
        )))
    }
}

pub fn validate_font_size(size: f32) -> Result<(), EditError> {
    let in_range = (MIN_FONT_SIZE_PT..=MAX_FONT_SIZE_PT).contains(&size);
    let on_step = (size * 2.0).fract() == 0.0;
    if in_range && on_step {
        Ok(())
    } else {
        Err(EditError::Invalid(format!(
            "font size {size} must be between {MIN_FONT_SIZE_PT} and {MAX_FONT_SIZE_PT} in 0.5pt steps"
        )))
    }
}

pub fn validate_hex_color(color: &str) -> Result<(), EditError> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(EditError::Invalid(format!("'{color}' is not a #rrggbb colour")))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
