pub mod parser;
pub mod request;
pub mod uri;

pub use parser::request_from_reader;
pub use uhsapi::http::{HttpVersion, Method};
