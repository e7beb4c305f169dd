mod error;
mod month;
mod names;

pub use error::DomainError;
pub use month::Month;
pub use names::{normalize_name, normalize_section_name};
