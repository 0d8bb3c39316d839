pub mod parser;
pub mod section;

pub use parser::parse;
pub use section::{FileSections, Section};
