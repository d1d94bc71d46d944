mod filename;
mod title;

pub use filename::{FilenamePattern, ParsedName, parse_file_name};
pub use title::{TitleRule, normalize_title};
