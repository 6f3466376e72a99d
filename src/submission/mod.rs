pub mod parser;

pub use parser::{parse, ParseError};
