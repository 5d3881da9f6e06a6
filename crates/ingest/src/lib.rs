pub mod canonical;
pub mod encoder;
pub mod intervals;
pub mod parser;
pub mod paths;
pub mod types;

pub use canonical::{canonicalize, extract_tags};
pub use encoder::{append_entry, append_session_end, encode_line, strip_markup};
pub use intervals::{intervals_from_path, intervals_from_str, reconstruct};
pub use parser::{events_from_str, parse_line, parse_new_format, parse_old_format};
pub use paths::default_log_path;
pub use types::{Result, TrackError};
