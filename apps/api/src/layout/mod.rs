// Layout registry and bucket plans.
// Pure lookup tables; the render module folds over them.

pub mod buckets;
pub mod registry;

pub use registry::{layout_for, LayoutDefinition, LAYOUTS};
