//! Target Resolver - address lists and reverse DNS
//!
//! Two small services around addresses:
//! - loading the address list from a text file (one address per line)
//! - best-effort reverse lookup of an address to a hostname
//!
//! Addresses are not validated here. Anything that is not a usable address
//! simply fails every probe and lookup later on.

mod reverse;

pub use reverse::ReverseResolver;

use drishti_common::{DrishtiError, DrishtiResult};
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

pub struct TargetResolver;

impl TargetResolver {
    pub fn new() -> Self {
        Self
    }

    /// Read `path` and return its addresses in file order.
    ///
    /// A missing file maps to `DrishtiError::InputNotFound` so callers can
    /// report it separately from other I/O failures.
    pub async fn load_addresses(path: &Path) -> DrishtiResult<Vec<String>> {
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                DrishtiError::InputNotFound(path.to_path_buf())
            } else {
                DrishtiError::Io(e)
            }
        })?;

        let addresses = parse_address_list(&contents);
        debug!("Loaded {} address(es) from {}", addresses.len(), path.display());
        Ok(addresses)
    }
}

impl Default for TargetResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Split text into trimmed, non-blank lines.
pub fn parse_address_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_skips_blank_lines() {
        let list = parse_address_list("10.0.0.1\n\n   \n10.0.0.2\r\n  10.0.0.3  \n");
        assert_eq!(list, vec!["10.0.0.1", "10.0.0.2", "10.0.0.3"]);
    }

    #[test]
    fn test_parse_keeps_order_and_duplicates() {
        let list = parse_address_list("10.0.0.9\n10.0.0.1\n10.0.0.9\n");
        assert_eq!(list, vec!["10.0.0.9", "10.0.0.1", "10.0.0.9"]);
    }

    #[test]
    fn test_parse_does_not_validate() {
        let list = parse_address_list("not-an-address\n999.1.1.1\n");
        assert_eq!(list, vec!["not-an-address", "999.1.1.1"]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_address_list("").is_empty());
        assert!(parse_address_list("\n \n\t\n").is_empty());
    }

    #[tokio::test]
    async fn test_load_addresses_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "192.168.1.10").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "192.168.1.11").unwrap();

        let addresses = TargetResolver::load_addresses(file.path()).await.unwrap();
        assert_eq!(addresses, vec!["192.168.1.10", "192.168.1.11"]);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.txt");

        let result = TargetResolver::load_addresses(&missing).await;
        assert!(matches!(result, Err(DrishtiError::InputNotFound(p)) if p == missing));
    }

    #[tokio::test]
    async fn test_load_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = TargetResolver::load_addresses(dir.path()).await;
        assert!(matches!(result, Err(DrishtiError::Io(_))));
    }
}
