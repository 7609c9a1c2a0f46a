// Saved-resume library and the save-then-print export flow.

pub mod export;
pub mod handlers;
pub mod print;
pub mod repository;
