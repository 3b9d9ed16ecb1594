//! # obrand-core - Core Types
//!
//! Foundation crate for obrand. Provides error handling, logging setup,
//! the locale model, the branding message-key parser and a reader for
//! Java-style `.properties` files.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, serde_json, thiserror, tracing, dirs).
//!
//! ## Public API
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ### Message Keys (`key`)
//! - [`MessageKey`] - A parsed `obrand.<scope>.<name>` key
//! - [`BRAND_PREFIX`], [`COMMON_SCOPE`] - Fixed key segments
//!
//! ### Locales (`locale`)
//! - [`Locale`] - Language/country/variant triple with bundle fallback chain
//!
//! ### Properties (`properties`)
//! - [`parse_properties()`] - Parse `.properties` text into a key/value map
//! - [`read_properties()`] - Read and parse a `.properties` file
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use obrand_core::prelude::*;
//! ```

pub mod error;
pub mod key;
pub mod locale;
pub mod logging;
pub mod prelude;
pub mod properties;

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use key::{
    match_bundle_key, scope_prefix, MessageKey, ScopedName, BRAND_PREFIX, COMMON_PREFIX,
    COMMON_SCOPE,
};
pub use locale::Locale;
pub use properties::{parse_properties, read_properties, Properties};
