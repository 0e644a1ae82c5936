//! Engine configuration readers
//!
//! Car data files use a loose INI dialect:
//! - `[SECTION]` headers, matched case-insensitively
//! - `KEY=value` lines, keys matched case-sensitively
//! - `;` starts a trailing comment
//!
//! Only key lookup is provided; nothing here tries to model a whole file.

mod scanner;

pub use scanner::{find_global_key, find_key, section_header};
