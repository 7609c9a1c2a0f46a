//! Section tags and the user-controlled order they render in.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionTag {
    Summary,
    Education,
    Work,
    Projects,
    Skills,
    Languages,
}

impl SectionTag {
    pub const ALL: [SectionTag; 6] = [
        SectionTag::Summary,
        SectionTag::Education,
        SectionTag::Work,
        SectionTag::Projects,
        SectionTag::Skills,
        SectionTag::Languages,
    ];

    /// Heading shown above the section.
    pub fn title(self) -> &'static str {
        match self {
            SectionTag::Summary => "Professional Summary",
            SectionTag::Education => "Education",
            SectionTag::Work => "Work Experience",
            SectionTag::Projects => "Key Projects",
            SectionTag::Skills => "Skills",
            SectionTag::Languages => "Languages",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SectionOrderError {
    #[error("section order must contain exactly 6 tags, got {0}")]
    WrongLength(usize),
    #[error("section order lists {0:?} more than once")]
    Duplicate(SectionTag),
}

/// A permutation of the six section tags. Construction rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SectionTag>", into = "Vec<SectionTag>")]
pub struct SectionOrder([SectionTag; 6]);

impl Default for SectionOrder {
    fn default() -> Self {
        Self(SectionTag::ALL)
    }
}

impl TryFrom<Vec<SectionTag>> for SectionOrder {
    type Error = SectionOrderError;

    fn try_from(tags: Vec<SectionTag>) -> Result<Self, Self::Error> {
        let tags: [SectionTag; 6] = tags
            .try_into()
            .map_err(|v: Vec<SectionTag>| SectionOrderError::WrongLength(v.len()))?;
        for (i, tag) in tags.iter().enumerate() {
            if tags[..i].contains(tag) {
                return Err(SectionOrderError::Duplicate(*tag));
            }
        }
        Ok(Self(tags))
    }
}

impl From<SectionOrder> for Vec<SectionTag> {
    fn from(order: SectionOrder) -> Self {
        order.0.to_vec()
    }
}

impl SectionOrder {
    pub fn tags(&self) -> &[SectionTag] {
        &self.0
    }

    pub fn position(&self, tag: SectionTag) -> usize {
        // Every tag is present by construction.
        self.0.iter().position(|t| *t == tag).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Swaps the tag at `index` with its neighbour in `direction`.
    ///
    /// Returns `false` and leaves the order untouched when the neighbour would
    /// fall outside the sequence.
    pub fn move_section(&mut self, index: usize, direction: MoveDirection) -> bool {
        let target = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => index.checked_add(1).filter(|i| *i < self.0.len()),
        };
        match target {
            Some(target) if index < self.0.len() => {
                self.0.swap(index, target);
                true
            }
            _ => false,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
