//! Value types shared by snapshots, the editor contract and the driver.

use std::collections::BTreeMap;
use std::fmt;

/// A repository revision number.
pub type Revision = u64;

/// Sorted property list: name to raw value bytes.
///
/// The map's ordering doubles as the property-name comparator, so a
/// merge-walk over two lists visits names in a deterministic order.
pub type PropList = BTreeMap<String, Vec<u8>>;

/// The kind of node a directory entry refers to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NodeKind {
    /// A regular file with content and properties.
    File,
    /// A directory with entries and properties.
    Dir,
}

/// Opaque identity of a historical versioned node.
///
/// Identities are ancestry tokens: a sequence of components where a shared
/// prefix means shared history. Equal identities imply equal content and
/// properties. [`NodeId::distance`] is a cheap proxy for how large a delta
/// between two related nodes will be.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId {
    components: Vec<u64>,
}

impl NodeId {
    /// Builds an identity from its ancestry components.
    #[must_use]
    pub fn new(components: Vec<u64>) -> Self {
        NodeId { components }
    }

    /// Number of ancestry steps separating two identities, or `None` when
    /// they are unrelated. Zero means the identities are equal.
    #[must_use]
    pub fn distance(&self, other: &NodeId) -> Option<u64> {
        let common = self
            .components
            .iter()
            .zip(&other.components)
            .take_while(|(a, b)| a == b)
            .count();
        if common == 0 {
            return None;
        }
        Some((self.components.len() - common + other.components.len() - common) as u64)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for c in &self.components {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{c}")?;
            first = false;
        }
        Ok(())
    }
}

/// Copy-from annotation carried by a node that was copied from elsewhere
/// in history. The driver surfaces it to the editor verbatim; it never
/// invents one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CopyFrom {
    /// Repository path the node was copied from.
    pub path: String,
    /// Revision the copy was taken at.
    pub revision: Revision,
}

/// One entry of a directory snapshot.
#[derive(Clone, Debug)]
pub struct Dirent {
    /// Entry name; entry lists sort by these bytes.
    pub name: String,
    /// Whether the entry refers to a file or a directory.
    pub kind: NodeKind,
    /// Identity of the referenced node.
    pub id: NodeId,
    /// Copy annotation from the node graph, when the node carries one.
    pub copyfrom: Option<CopyFrom>,
}

impl Dirent {
    /// Convenience constructor for an entry without a copy annotation.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: NodeKind, id: NodeId) -> Self {
        Dirent {
            name: name.into(),
            kind,
            id,
            copyfrom: None,
        }
    }
}
