use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_ALLOW_SEPARATOR: &str = ", ";
pub const DEFAULT_NOT_FOUND_BODY: &str = "404 page not found\n";

/// Order of methods in a computed `Allow` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MethodOrder {
    /// GET, HEAD, POST, PUT, PATCH, DELETE, OPTIONS.
    #[default]
    Canonical,
    /// Order in which each method received its first route.
    Registration,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouterOptions {
    pub method_order: MethodOrder,
    pub allow_separator: String,
    pub not_found_body: String,
    /// Percent-decode request paths before cleaning and matching.
    pub decode_uri: bool,
    pub debug: bool,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            method_order: MethodOrder::default(),
            allow_separator: DEFAULT_ALLOW_SEPARATOR.to_string(),
            not_found_body: DEFAULT_NOT_FOUND_BODY.to_string(),
            decode_uri: true,
            debug: false,
        }
    }
}

impl RouterOptions {
    pub fn builder() -> RouterOptionsBuilder {
        RouterOptionsBuilder::default()
    }

    pub fn validate(&self) -> Result<(), RouterOptionsError> {
        if self.allow_separator.is_empty() {
            return Err(RouterOptionsError::EmptyAllowSeparator);
        }
        if !self
            .allow_separator
            .bytes()
            .all(|b| b == b'\t' || (0x20..0x7f).contains(&b))
        {
            return Err(RouterOptionsError::InvalidAllowSeparator {
                separator: self.allow_separator.clone(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct RouterOptionsBuilder {
    options: RouterOptions,
}

impl RouterOptionsBuilder {
    pub fn method_order(mut self, value: MethodOrder) -> Self {
        self.options.method_order = value;
        self
    }

    pub fn allow_separator<S: Into<String>>(mut self, value: S) -> Self {
        self.options.allow_separator = value.into();
        self
    }

    pub fn not_found_body<S: Into<String>>(mut self, value: S) -> Self {
        self.options.not_found_body = value.into();
        self
    }

    pub fn decode_uri(mut self, value: bool) -> Self {
        self.options.decode_uri = value;
        self
    }

    pub fn debug(mut self, value: bool) -> Self {
        self.options.debug = value;
        self
    }

    pub fn build(self) -> Result<RouterOptions, RouterOptionsError> {
        self.options.validate()?;
        Ok(self.options)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouterOptionsError {
    #[error("allow_separator must not be empty")]
    EmptyAllowSeparator,
    #[error("allow_separator {separator:?} contains characters not valid in a header value")]
    InvalidAllowSeparator { separator: String },
}
