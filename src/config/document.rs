//! Config document abstraction layer.
//!
//! `ConfigDocument` and `ParseNode` wrap the `kdl` crate types so the rest of
//! the config module never touches KDL entries or spans directly.

use std::io::ErrorKind;
use std::path::Path;

use super::ConfigError;

/// Parsed KDL document plus the byte offset where each source line starts.
pub(super) struct ConfigDocument {
    doc: kdl::KdlDocument,
    line_starts: Vec<usize>,
}

/// One top-level setting node.
pub(super) struct ParseNode<'a> {
    node: &'a kdl::KdlNode,
    line_starts: &'a [usize],
}

impl ConfigDocument {
    pub(super) fn parse(source: &str) -> Result<Self, ConfigError> {
        let doc = source
            .parse::<kdl::KdlDocument>()
            .map_err(|err| ConfigError::ParseError(err.to_string()))?;
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(at, _)| at + 1))
            .collect();
        Ok(Self { doc, line_starts })
    }

    /// Read `path` and parse it. A missing file is reported separately from
    /// other read failures.
    pub(super) fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(source) => Self::parse(&source),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(ConfigError::NotFound(path.to_path_buf()))
            }
            Err(err) => Err(ConfigError::ReadError(err)),
        }
    }

    pub(super) fn nodes(&self) -> Vec<ParseNode<'_>> {
        let line_starts = self.line_starts.as_slice();
        self.doc
            .nodes()
            .iter()
            .map(|node| ParseNode { node, line_starts })
            .collect()
    }
}

impl<'a> ParseNode<'a> {
    /// The setting name, e.g. `venv-candidates`.
    pub(super) fn name(&self) -> &'a str {
        self.node.name().value()
    }

    pub(super) fn string_values(&self) -> Vec<&'a str> {
        self.arguments().filter_map(kdl::KdlValue::as_string).collect()
    }

    pub(super) fn bool_values(&self) -> Vec<bool> {
        self.arguments().filter_map(kdl::KdlValue::as_bool).collect()
    }

    /// Positional arguments of any type.
    pub(super) fn argument_count(&self) -> usize {
        self.arguments().count()
    }

    /// Settings take plain arguments only: any `key=value` property or a
    /// `{ }` block makes the node malformed.
    pub(super) fn has_extras(&self) -> bool {
        self.node.children().is_some()
            || self.node.entries().iter().any(|entry| entry.name().is_some())
    }

    /// 1-based source line of the node.
    pub(super) fn line(&self) -> usize {
        let offset = self.node.span().offset();
        self.line_starts.partition_point(|&start| start <= offset)
    }

    fn arguments(&self) -> impl Iterator<Item = &'a kdl::KdlValue> {
        self.node
            .entries()
            .iter()
            .filter(|entry| entry.name().is_none())
            .map(kdl::KdlEntry::value)
    }
}
