mod clean;
mod decode;
mod error;

pub use clean::{clean_path, is_rooted};
pub use decode::decode_percent;
pub use error::{PathError, PathResult};
