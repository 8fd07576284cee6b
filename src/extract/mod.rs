//! Extraction passes over raw upstream replies.
//!
//! Three independent pieces: the section segmenter (strict marker matching),
//! the code block extractor (loose fence matching), and the content
//! sanitizer. The two scanning passes are deliberately separate — they use
//! different fence-matching strictness, and collapsing them would change
//! which lines toggle code mode.

mod code_blocks;
mod sanitizer;
mod segmenter;

pub use code_blocks::extract_code;
pub use sanitizer::{FilterConfigError, Sanitizer};
pub use segmenter::{segment, Section, FENCE};
