pub mod enums;
pub mod handler;
pub mod matcher;
pub mod path;
pub mod router;
pub mod types;

pub use enums::{HttpMethod, MethodSet};
pub use handler::{BoxedHandler, Handler};
pub use matcher::{MatcherError, PathMatcher, RadixMatcher};
pub use path::PathError;
pub use router::{
    AllowedMethods, MethodOrder, RouteStats, Router, RouterError, RouterOptions,
    RouterOptionsBuilder, RouterOptionsError, RouterResult, WildcardError,
};
pub use types::Params;
