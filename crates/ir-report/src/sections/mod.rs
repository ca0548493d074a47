//! Report section data structures.

pub mod cover;
pub mod details;
pub mod letter;
pub mod summary;

pub use cover::CoverSection;
pub use details::{DetailPage, DetailsSection};
pub use letter::{LetterSection, LETTER_BODY};
pub use summary::{SummarySection, ENVIRONMENTAL_IMPACT};
