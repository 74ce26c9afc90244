//! Comparable sink descriptors

use std::path::{Path, PathBuf};

/// Where a sink writes, as a plain comparable value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SinkTarget {
    /// Rotating file at an absolute path, optionally tagged with the absolute
    /// form of the prefix the path was generated from
    File {
        prefix: Option<PathBuf>,
        path: PathBuf,
    },
    /// Process standard output
    Console,
}

impl SinkTarget {
    pub fn file(path: impl Into<PathBuf>, prefix: Option<&Path>) -> Self {
        Self::File {
            prefix: prefix.map(Path::to_path_buf),
            path: path.into(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File { path, .. } => Some(path),
            Self::Console => None,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }

    /// Whether both descriptors name the same destination
    ///
    /// Two file targets match on equal paths, or on equal generating
    /// prefixes (the timestamp part of a generated name moves every second).
    /// Paths compare by component, so `/logs/./x` and `/logs/x` are equal.
    pub fn same_destination(&self, other: &SinkTarget) -> bool {
        match (self, other) {
            (
                Self::File {
                    prefix: prefix_a,
                    path: path_a,
                },
                Self::File {
                    prefix: prefix_b,
                    path: path_b,
                },
            ) => path_a == path_b || (prefix_a.is_some() && prefix_a == prefix_b),
            (Self::Console, Self::Console) => true,
            _ => false,
        }
    }
}
