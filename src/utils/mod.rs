// ABOUTME: Leaf utility module for template helpers
// ABOUTME: Exports string helpers and object key-path globbing

pub mod error;
pub mod glob;
pub mod string;

pub use error::{Result, UtilsError};
pub use glob::{build_object_paths, glob_object, glob_paths, Pattern};
pub use string::{lower_case, lower_case_value, trim, trim_value};
