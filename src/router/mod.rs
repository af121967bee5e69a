mod allowed;
mod errors;
mod options;
mod route_table;
mod service;
mod stats;
mod wildcard;

pub use allowed::AllowedMethods;
pub use errors::{RouterError, RouterResult, WildcardError};
pub use options::{
    DEFAULT_ALLOW_SEPARATOR, DEFAULT_NOT_FOUND_BODY, MethodOrder, RouterOptions,
    RouterOptionsBuilder, RouterOptionsError,
};
pub use service::Router;
pub use stats::RouteStats;
pub use wildcard::ANONYMOUS_WILDCARD;
