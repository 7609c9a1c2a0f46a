// Rendering: one section-assembly fold with two outputs, the interactive
// preview tree and the print-ready export document.

pub mod blocks;
pub mod export;
pub mod handlers;
pub mod preview;
