//! The editor contract: the sink the delta driver talks to.
//!
//! An editor is a state machine with states *root*, *directory* and
//! *file*. [`Editor::replace_root`] enters the root directory; from a
//! directory the driver may delete entries, change properties, or open a
//! child directory or file via the `add_*`/`replace_*` calls, each of
//! which returns an opaque per-node handle fed back into subsequent
//! calls. Opens and closes are strictly LIFO, every opened handle is
//! closed exactly once, and no two siblings are ever open at the same
//! time. Implementations range from in-memory node-graph builders to wire
//! serialisers and working-copy appliers; the contract assumes nothing
//! beyond the state machine.
//!
//! Handles are consumed by `close_directory`/`close_file`, so the
//! type system already rules out double closes and use after close.

use crate::error::DeltaResult;
use crate::text::DeltaWindow;
use crate::types::Revision;

/// Reference to a previously existing node used as the base of a replace:
/// the path names the node in the source tree, the revision pins it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ancestor {
    /// Absolute repository path of the ancestor node.
    pub path: String,
    /// Revision the ancestor content is taken from.
    pub revision: Revision,
}

impl Ancestor {
    /// Builds an ancestor reference.
    #[must_use]
    pub fn new(path: impl Into<String>, revision: Revision) -> Self {
        Ancestor {
            path: path.into(),
            revision,
        }
    }
}

/// Receives the text-delta windows for one file, in order, terminated by
/// a final call with `None`.
pub trait TextDeltaSink {
    /// Delivers the next window, or `None` to mark the end of the delta.
    fn window(&mut self, window: Option<&DeltaWindow>) -> DeltaResult<()>;
}

/// The sink for one tree-delta edit stream.
pub trait Editor {
    /// Opaque handle for an open directory.
    type Dir;
    /// Opaque handle for an open file.
    type File;
    /// Sink consuming one file's text-delta windows.
    type Text: TextDeltaSink;

    /// Enters the root directory of the edit. `base_revision` is the
    /// revision the whole delta is based on.
    fn replace_root(&mut self, base_revision: Revision) -> DeltaResult<Self::Dir>;

    /// Removes the entry `name` from the open directory.
    fn delete_entry(&mut self, parent: &mut Self::Dir, name: &str) -> DeltaResult<()>;

    /// Creates the directory `name` with no corresponding source node.
    /// `copyfrom` carries a copy annotation when the node graph recorded
    /// one.
    fn add_directory(
        &mut self,
        parent: &mut Self::Dir,
        name: &str,
        copyfrom: Option<&Ancestor>,
    ) -> DeltaResult<Self::Dir>;

    /// Replaces the directory `name`, basing the edit on `ancestor` when
    /// one was found.
    fn replace_directory(
        &mut self,
        parent: &mut Self::Dir,
        name: &str,
        ancestor: Option<&Ancestor>,
    ) -> DeltaResult<Self::Dir>;

    /// Creates the file `name` with no corresponding source node.
    fn add_file(
        &mut self,
        parent: &mut Self::Dir,
        name: &str,
        copyfrom: Option<&Ancestor>,
    ) -> DeltaResult<Self::File>;

    /// Replaces the file `name`, basing the edit on `ancestor` when one
    /// was found; without one, the ancestor content reads as empty.
    fn replace_file(
        &mut self,
        parent: &mut Self::Dir,
        name: &str,
        ancestor: Option<&Ancestor>,
    ) -> DeltaResult<Self::File>;

    /// Sets (`Some`) or deletes (`None`) a property of the open directory.
    fn change_dir_prop(
        &mut self,
        dir: &mut Self::Dir,
        name: &str,
        value: Option<&[u8]>,
    ) -> DeltaResult<()>;

    /// Sets or deletes a property of the entry `entry` in the open
    /// directory, as opposed to a property of the node it refers to.
    fn change_dirent_prop(
        &mut self,
        dir: &mut Self::Dir,
        entry: &str,
        name: &str,
        value: Option<&[u8]>,
    ) -> DeltaResult<()>;

    /// Sets or deletes a property of the open file.
    fn change_file_prop(
        &mut self,
        file: &mut Self::File,
        name: &str,
        value: Option<&[u8]>,
    ) -> DeltaResult<()>;

    /// Starts the text delta for the open file. The returned sink
    /// receives the windows in order and a final `None`.
    fn apply_textdelta(&mut self, file: &mut Self::File) -> DeltaResult<Self::Text>;

    /// Closes a directory handle. Must match the most recent open.
    fn close_directory(&mut self, dir: Self::Dir) -> DeltaResult<()>;

    /// Closes a file handle. Must match the most recent open.
    fn close_file(&mut self, file: Self::File) -> DeltaResult<()>;
}
