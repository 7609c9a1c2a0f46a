// Resume document model and the editing rules that operate on it.
// Everything here is pure data manipulation; no I/O.

pub mod bullets;
pub mod edit;
pub mod model;
pub mod section_order;

pub use edit::{EditCommand, EditError, EditOutcome, EditableResume};
pub use model::ResumeDocument;
pub use section_order::SectionOrder;
