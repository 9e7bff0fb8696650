//! Application naming.
//!
//! The logger is named after the binary: `/usr/local/bin/my-service` logs as
//! `my-service`. Empty names and `"."` mean "no name".

use std::path::Path;

/// Final path component of `path`, or `None` when there is nothing to name.
///
/// # Example
/// ```
/// use runvisor::app_name;
///
/// assert_eq!(app_name("/usr/bin/my-tool").as_deref(), Some("my-tool"));
/// assert_eq!(app_name("."), None);
/// assert_eq!(app_name(""), None);
/// ```
pub fn app_name(path: &str) -> Option<String> {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty() && *name != ".")
        .map(str::to_owned)
}
