//! Entry Point Resolution
//!
//! Turns the raw per-session activation string into an [`EntryPointSpec`].
//!
//! ```text
//! [archive.jar] qualified.Name [residual arguments ...]
//! ```
//!
//! The residual is an offset into the original string, so spacing after the
//! consumed tokens survives untouched:
//!
//! ```
//! use callbridge::resolver::{EntryPointResolver, SourceKind};
//!
//! let spec = EntryPointResolver::resolve("apps.jar org.example.Ivr  menu=main  lang=en").unwrap();
//! assert_eq!(spec.source, SourceKind::Archive("apps.jar".to_string()));
//! assert_eq!(spec.qualified_name, "org.example.Ivr");
//! assert_eq!(spec.residual_args, " menu=main  lang=en");
//! ```

use crate::error::{BridgeError, Result};
use std::fmt;

/// File extension (case-insensitive) that marks the first token as an archive.
pub const ARCHIVE_EXTENSION: &str = ".jar";

/// Where the named code unit is looked up.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// The normal search locations.
    Classpath,
    /// Scoped to the archive at this path, plus the normal search locations.
    Archive(String),
}

impl SourceKind {
    pub fn archive_path(&self) -> Option<&str> {
        match self {
            SourceKind::Classpath => None,
            SourceKind::Archive(path) => Some(path),
        }
    }
}

/// Parsed form of an activation string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPointSpec {
    pub source: SourceKind,
    /// Dotted identifier of the unit to instantiate.
    pub qualified_name: String,
    /// Contiguous suffix of the original input; never re-tokenized.
    pub residual_args: String,
}

impl fmt::Display for EntryPointSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            SourceKind::Classpath => write!(f, "{}", self.qualified_name),
            SourceKind::Archive(path) => write!(f, "{}!{}", path, self.qualified_name),
        }
    }
}

pub struct EntryPointResolver;

impl EntryPointResolver {
    /// Parse `input` into an [`EntryPointSpec`].
    ///
    /// # Errors
    ///
    /// - [`BridgeError::MalformedArguments`] when no leading token exists
    ///   (empty input, only spaces, or a leading space).
    /// - [`BridgeError::MissingQualifiedName`] when an archive path is not
    ///   followed by a name.
    pub fn resolve(input: &str) -> Result<EntryPointSpec> {
        let tokens = tokenize(input);
        let first = match tokens.first() {
            Some(token) if !token.is_empty() => *token,
            _ => {
                return Err(BridgeError::MalformedArguments {
                    input: input.to_string(),
                });
            }
        };

        let (source, qualified_name, offset) = if is_archive(first) {
            let name = match tokens.get(1) {
                Some(token) if !token.is_empty() => *token,
                _ => {
                    return Err(BridgeError::MissingQualifiedName {
                        archive: first.to_string(),
                    });
                }
            };
            (
                SourceKind::Archive(first.to_string()),
                name,
                first.len() + name.len() + 2,
            )
        } else {
            (SourceKind::Classpath, first, first.len() + 1)
        };

        let residual_args = input.get(offset..).unwrap_or_default().to_string();

        tracing::trace!(
            input,
            qualified_name,
            residual = %residual_args,
            "Resolved entry point"
        );

        Ok(EntryPointSpec {
            source,
            qualified_name: qualified_name.to_string(),
            residual_args,
        })
    }
}

/// Split on single spaces, dropping trailing empty tokens.
fn tokenize(input: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = input.split(' ').collect();
    while tokens.last().is_some_and(|t| t.is_empty()) {
        tokens.pop();
    }
    tokens
}

/// Matches the trailing extension only.
fn is_archive(token: &str) -> bool {
    let ext = ARCHIVE_EXTENSION.len();
    token.len() >= ext
        && token.is_char_boundary(token.len() - ext)
        && token[token.len() - ext..].eq_ignore_ascii_case(ARCHIVE_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_form() {
        let spec = EntryPointResolver::resolve("a.jar b.C.D rest of args").unwrap();
        assert_eq!(spec.source, SourceKind::Archive("a.jar".to_string()));
        assert_eq!(spec.source.archive_path(), Some("a.jar"));
        assert_eq!(spec.qualified_name, "b.C.D");
        assert_eq!(spec.residual_args, "rest of args");
    }

    #[test]
    fn test_classpath_form() {
        let spec = EntryPointResolver::resolve("b.C.D rest").unwrap();
        assert_eq!(spec.source, SourceKind::Classpath);
        assert_eq!(spec.qualified_name, "b.C.D");
        assert_eq!(spec.residual_args, "rest");
    }

    #[test]
    fn test_single_token_has_empty_residual() {
        let spec = EntryPointResolver::resolve("b.C.D").unwrap();
        assert_eq!(spec.qualified_name, "b.C.D");
        assert_eq!(spec.residual_args, "");

        let spec = EntryPointResolver::resolve("a.jar b.C.D").unwrap();
        assert_eq!(spec.residual_args, "");
    }

    #[test]
    fn test_trailing_separator_gives_empty_residual() {
        let spec = EntryPointResolver::resolve("b.C.D ").unwrap();
        assert_eq!(spec.residual_args, "");
    }

    #[test]
    fn test_empty_input_is_malformed() {
        let err = EntryPointResolver::resolve("").unwrap_err();
        assert!(matches!(err, BridgeError::MalformedArguments { .. }));

        let err = EntryPointResolver::resolve("   ").unwrap_err();
        assert!(matches!(err, BridgeError::MalformedArguments { .. }));

        let err = EntryPointResolver::resolve(" b.C.D").unwrap_err();
        assert!(matches!(err, BridgeError::MalformedArguments { .. }));
    }

    #[test]
    fn test_archive_without_name() {
        let err = EntryPointResolver::resolve("x.jar").unwrap_err();
        match err {
            BridgeError::MissingQualifiedName { archive } => assert_eq!(archive, "x.jar"),
            other => panic!("unexpected error: {other}"),
        }

        let err = EntryPointResolver::resolve("x.jar  b.C.D").unwrap_err();
        assert!(matches!(err, BridgeError::MissingQualifiedName { .. }));
    }

    #[test]
    fn test_archive_suffix_case_insensitive() {
        let spec = EntryPointResolver::resolve("/opt/apps/IVR.JAR org.Ivr x").unwrap();
        assert_eq!(spec.source, SourceKind::Archive("/opt/apps/IVR.JAR".to_string()));
        assert_eq!(spec.residual_args, "x");
    }

    #[test]
    fn test_suffix_elsewhere_is_not_an_archive() {
        let spec = EntryPointResolver::resolve("org.jarvis.App a b").unwrap();
        assert_eq!(spec.source, SourceKind::Classpath);
        assert_eq!(spec.qualified_name, "org.jarvis.App");
        assert_eq!(spec.residual_args, "a b");

        let spec = EntryPointResolver::resolve("/opt/x.jar.d/App arg").unwrap();
        assert_eq!(spec.source, SourceKind::Classpath);
    }

    #[test]
    fn test_irregular_whitespace_preserved_in_residual() {
        let spec = EntryPointResolver::resolve("b.C.D   two  spaces ").unwrap();
        assert_eq!(spec.residual_args, "  two  spaces ");
    }

    #[test]
    fn test_non_ascii_arguments() {
        let spec = EntryPointResolver::resolve("org.Greeter héllo wörld").unwrap();
        assert_eq!(spec.residual_args, "héllo wörld");
    }

    #[test]
    fn test_display() {
        let spec = EntryPointResolver::resolve("a.jar b.C.D").unwrap();
        assert_eq!(spec.to_string(), "a.jar!b.C.D");
    }
}
