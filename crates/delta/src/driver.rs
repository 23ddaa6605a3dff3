//! The recursive delta driver.
//!
//! `delta_dirs` merge-walks the sorted entry lists of the source and
//! target directories. Entries present in both with differing identities
//! become replaces, source-only entries become deletes, target-only
//! entries become adds emitted as if diffed against the empty tree.

use std::cmp::Ordering;
use std::io;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::editor::{Ancestor, Editor, TextDeltaSink};
use crate::error::{DeltaError, DeltaResult};
use crate::snapshot::{DirSnapshot, FileSnapshot};
use crate::text::{FullTextFactory, TextDeltaFactory};
use crate::types::{Dirent, NodeKind, PropList};

/// Computes the delta between `source` and `target` and drives `editor`
/// with it, using the default options.
///
/// # Errors
///
/// See [`DirDelta::run`].
pub fn dir_delta<E: Editor>(
    source: &Rc<dyn DirSnapshot>,
    target: &Rc<dyn DirSnapshot>,
    editor: &mut E,
) -> DeltaResult<()> {
    DirDelta::new().run(source, target, editor)
}

/// A configured tree-delta invocation.
///
/// ```no_run
/// # use std::rc::Rc;
/// # use delta::{DirDelta, DirSnapshot, Editor};
/// # fn demo<E: Editor>(source: Rc<dyn DirSnapshot>, target: Rc<dyn DirSnapshot>,
/// #                    editor: &mut E) -> delta::DeltaResult<()> {
/// DirDelta::new()
///     .with_cancel(|| false)
///     .run(&source, &target, editor)
/// # }
/// ```
pub struct DirDelta<'a> {
    cancel: Option<Box<dyn FnMut() -> bool + 'a>>,
    factory: Box<dyn TextDeltaFactory + 'a>,
}

impl Default for DirDelta<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> DirDelta<'a> {
    /// Creates an invocation with no cancellation callback and the
    /// [`FullTextFactory`] fallback for content deltas.
    #[must_use]
    pub fn new() -> Self {
        DirDelta {
            cancel: None,
            factory: Box::new(FullTextFactory::default()),
        }
    }

    /// Installs a cancellation query. It is consulted at every directory
    /// boundary, before every sibling edit and before every content-delta
    /// window; returning `true` aborts the run with
    /// [`DeltaError::Cancelled`].
    #[must_use]
    pub fn with_cancel(mut self, cancel: impl FnMut() -> bool + 'a) -> Self {
        self.cancel = Some(Box::new(cancel));
        self
    }

    /// Replaces the content-delta factory.
    #[must_use]
    pub fn with_text_factory(mut self, factory: impl TextDeltaFactory + 'a) -> Self {
        self.factory = Box::new(factory);
        self
    }

    /// Runs the delta: emits onto `editor` the edits that transform
    /// `source` into `target`.
    ///
    /// On success every frame opened here has been closed. On
    /// cancellation the frames owned by the driver are closed before the
    /// error is returned; on any other error the caller is responsible
    /// for tearing down editor state.
    ///
    /// # Errors
    ///
    /// [`DeltaError::NoSuchRevision`] when `source` has no base revision,
    /// [`DeltaError::Cancelled`] when the cancellation query fires, and
    /// any snapshot or editor failure otherwise.
    pub fn run<E: Editor>(
        mut self,
        source: &Rc<dyn DirSnapshot>,
        target: &Rc<dyn DirSnapshot>,
        editor: &mut E,
    ) -> DeltaResult<()> {
        let base_revision = source.base_revision().ok_or(DeltaError::NoSuchRevision)?;
        let mut ctx = Context {
            editor,
            cancel: self.cancel.take(),
            factory: self.factory,
        };

        let mut root = ctx.editor.replace_root(base_revision)?;
        let result = ctx.delta_dirs(&mut root, source, "", target);
        ctx.finish_dir(root, result)
    }
}

/// Parameters that stay constant through one traversal.
struct Context<'a, 'e, E: Editor> {
    editor: &'e mut E,
    cancel: Option<Box<dyn FnMut() -> bool + 'a>>,
    factory: Box<dyn TextDeltaFactory + 'a>,
}

impl<E: Editor> Context<'_, '_, E> {
    fn check_cancel(&mut self) -> DeltaResult<()> {
        if let Some(cancel) = &mut self.cancel {
            if cancel() {
                return Err(DeltaError::Cancelled);
            }
        }
        Ok(())
    }

    /// Closes `dir` when the inner result is success or cancellation;
    /// other errors propagate with the frame left to the caller.
    fn finish_dir(&mut self, dir: E::Dir, result: DeltaResult<()>) -> DeltaResult<()> {
        match result {
            Ok(()) => self.editor.close_directory(dir),
            Err(e) if e.is_cancel() => {
                self.editor.close_directory(dir)?;
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    fn finish_file(&mut self, file: E::File, result: DeltaResult<()>) -> DeltaResult<()> {
        match result {
            Ok(()) => self.editor.close_file(file),
            Err(e) if e.is_cancel() => {
                self.editor.close_file(file)?;
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Emits the edits turning `source` into `target` inside the open
    /// directory `dir`. `source_path` locates `source` relative to the
    /// top of the delta; ancestors are named below it.
    fn delta_dirs(
        &mut self,
        dir: &mut E::Dir,
        source: &Rc<dyn DirSnapshot>,
        source_path: &str,
        target: &Rc<dyn DirSnapshot>,
    ) -> DeltaResult<()> {
        trace!(path = source_path, "comparing directories");
        self.check_cancel()?;

        let source_props = source.dir_props()?;
        let target_props = target.dir_props()?;
        delta_proplists(Some(&source_props), &target_props, |name, value| {
            self.editor.change_dir_prop(dir, name, value)
        })?;

        let source_entries = source.entries()?;
        let target_entries = target.entries()?;
        debug_assert!(entries_sorted(&source_entries));
        debug_assert!(entries_sorted(&target_entries));

        let mut si = 0;
        let mut ti = 0;
        loop {
            let order = match (source_entries.get(si), target_entries.get(ti)) {
                (None, None) => break,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(s), Some(t)) => s.name.as_str().cmp(t.name.as_str()),
            };
            self.check_cancel()?;

            match order {
                Ordering::Equal => {
                    let s = &source_entries[si];
                    let t = &target_entries[ti];
                    self.delta_dirent_props(dir, source, target, &s.name)?;
                    if s.id != t.id {
                        self.replace(dir, source, source_path, target, &source_entries, t)?;
                    }
                    si += 1;
                    ti += 1;
                }
                Ordering::Less => {
                    self.editor.delete_entry(dir, &source_entries[si].name)?;
                    si += 1;
                }
                Ordering::Greater => {
                    self.add(dir, target, &target_entries[ti])?;
                    ti += 1;
                }
            }
        }

        Ok(())
    }

    /// Diffs the per-entry property lists both directories carry for the
    /// shared entry `name`.
    fn delta_dirent_props(
        &mut self,
        dir: &mut E::Dir,
        source: &Rc<dyn DirSnapshot>,
        target: &Rc<dyn DirSnapshot>,
        name: &str,
    ) -> DeltaResult<()> {
        let source_props = source.entry_props(name)?;
        let target_props = target.entry_props(name)?;
        delta_proplists(Some(&source_props), &target_props, |prop, value| {
            self.editor.change_dirent_prop(dir, name, prop, value)
        })
    }

    /// A same-named entry changed identity: pick the best ancestor among
    /// the source entries and replace relative to it, or from scratch
    /// when nothing is related.
    ///
    /// The search is local to `source`; candidates further away in the
    /// source tree are not considered. Ties on distance resolve to the
    /// first candidate so recorded edit streams stay stable.
    fn replace(
        &mut self,
        dir: &mut E::Dir,
        source: &Rc<dyn DirSnapshot>,
        source_path: &str,
        target: &Rc<dyn DirSnapshot>,
        source_entries: &[Dirent],
        target_entry: &Dirent,
    ) -> DeltaResult<()> {
        let mut best: Option<(usize, u64)> = None;
        for (i, candidate) in source_entries.iter().enumerate() {
            if candidate.kind != target_entry.kind {
                continue;
            }
            if let Some(distance) = target_entry.id.distance(&candidate.id) {
                if best.map_or(true, |(_, best_distance)| distance < best_distance) {
                    best = Some((i, distance));
                }
            }
        }

        match best {
            None => self.replace_from_scratch(dir, target, target_entry),
            Some((i, distance)) => {
                debug!(
                    name = %target_entry.name,
                    ancestor = %source_entries[i].name,
                    distance,
                    "replacing with ancestor"
                );
                self.replace_related(
                    dir,
                    source,
                    source_path,
                    &source_entries[i].name,
                    target,
                    target_entry,
                )
            }
        }
    }

    fn replace_related(
        &mut self,
        dir: &mut E::Dir,
        source: &Rc<dyn DirSnapshot>,
        source_path: &str,
        ancestor_name: &str,
        target: &Rc<dyn DirSnapshot>,
        target_entry: &Dirent,
    ) -> DeltaResult<()> {
        let ancestor_path = join_source_path(source_path, ancestor_name);

        match target_entry.kind {
            NodeKind::File => {
                let ancestor_file = source.open_file(ancestor_name)?;
                let ancestor_revision = ancestor_file
                    .base_revision()
                    .ok_or(DeltaError::NoSuchRevision)?;
                let target_file = target.open_file(&target_entry.name)?;

                let ancestor = Ancestor::new(ancestor_path, ancestor_revision);
                let mut file =
                    self.editor
                        .replace_file(dir, &target_entry.name, Some(&ancestor))?;
                let result = self.delta_files(&mut file, Some(&ancestor_file), &target_file);
                drop(target_file);
                drop(ancestor_file);
                self.finish_file(file, result)
            }
            NodeKind::Dir => {
                let ancestor_dir = source.open_dir(ancestor_name)?;
                let ancestor_revision = ancestor_dir
                    .base_revision()
                    .ok_or(DeltaError::NoSuchRevision)?;
                let target_dir = target.open_dir(&target_entry.name)?;

                let ancestor = Ancestor::new(ancestor_path.clone(), ancestor_revision);
                let mut child =
                    self.editor
                        .replace_directory(dir, &target_entry.name, Some(&ancestor))?;
                let result = self.delta_dirs(&mut child, &ancestor_dir, &ancestor_path, &target_dir);
                drop(target_dir);
                drop(ancestor_dir);
                self.finish_dir(child, result)
            }
        }
    }

    /// Replace with no usable ancestor: the new node is described against
    /// the empty file or the empty tree.
    fn replace_from_scratch(
        &mut self,
        dir: &mut E::Dir,
        target: &Rc<dyn DirSnapshot>,
        entry: &Dirent,
    ) -> DeltaResult<()> {
        match entry.kind {
            NodeKind::File => {
                let target_file = target.open_file(&entry.name)?;
                let mut file = self.editor.replace_file(dir, &entry.name, None)?;
                let result = self.file_from_scratch(&mut file, &target_file);
                drop(target_file);
                self.finish_file(file, result)
            }
            NodeKind::Dir => {
                let target_dir = target.open_dir(&entry.name)?;
                let mut child = self.editor.replace_directory(dir, &entry.name, None)?;
                let result = self.dir_from_scratch(&mut child, &target_dir);
                drop(target_dir);
                self.finish_dir(child, result)
            }
        }
    }

    /// An entry only the target has. The node graph's copy annotation, if
    /// any, is passed through verbatim; the subtree itself is emitted as
    /// if compared against the empty tree.
    fn add(
        &mut self,
        dir: &mut E::Dir,
        target: &Rc<dyn DirSnapshot>,
        entry: &Dirent,
    ) -> DeltaResult<()> {
        let copyfrom = entry
            .copyfrom
            .as_ref()
            .map(|c| Ancestor::new(c.path.clone(), c.revision));

        match entry.kind {
            NodeKind::File => {
                let target_file = target.open_file(&entry.name)?;
                let mut file = self
                    .editor
                    .add_file(dir, &entry.name, copyfrom.as_ref())?;
                let result = self.file_from_scratch(&mut file, &target_file);
                drop(target_file);
                self.finish_file(file, result)
            }
            NodeKind::Dir => {
                let target_dir = target.open_dir(&entry.name)?;
                let mut child = self
                    .editor
                    .add_directory(dir, &entry.name, copyfrom.as_ref())?;
                let result = self.dir_from_scratch(&mut child, &target_dir);
                drop(target_dir);
                self.finish_dir(child, result)
            }
        }
    }

    /// Emits a directory subtree as if compared against the empty tree:
    /// every property an add, every entry an add.
    fn dir_from_scratch(
        &mut self,
        dir: &mut E::Dir,
        target: &Rc<dyn DirSnapshot>,
    ) -> DeltaResult<()> {
        let target_props = target.dir_props()?;
        delta_proplists(None, &target_props, |name, value| {
            self.editor.change_dir_prop(dir, name, value)
        })?;

        for entry in target.entries()? {
            self.check_cancel()?;
            self.add(dir, target, &entry)?;
        }
        Ok(())
    }

    /// Emits a file as if compared against the empty file.
    fn file_from_scratch(
        &mut self,
        file: &mut E::File,
        target: &Rc<dyn FileSnapshot>,
    ) -> DeltaResult<()> {
        let target_props = target.props()?;
        delta_proplists(None, &target_props, |name, value| {
            self.editor.change_file_prop(file, name, value)
        })?;
        self.send_text_delta(file, Box::new(io::empty()), target.contents()?)
    }

    /// Emits the property and content edits turning `ancestor` into
    /// `target` on the open file. A missing ancestor reads as the empty
    /// file.
    fn delta_files(
        &mut self,
        file: &mut E::File,
        ancestor: Option<&Rc<dyn FileSnapshot>>,
        target: &Rc<dyn FileSnapshot>,
    ) -> DeltaResult<()> {
        let target_props = target.props()?;
        let ancestor_props = match ancestor {
            Some(a) => Some(a.props()?),
            None => None,
        };
        delta_proplists(ancestor_props.as_ref(), &target_props, |name, value| {
            self.editor.change_file_prop(file, name, value)
        })?;

        let base: Box<dyn io::Read> = match ancestor {
            Some(a) => a.contents()?,
            None => Box::new(io::empty()),
        };
        self.send_text_delta(file, base, target.contents()?)
    }

    /// Pulls windows from the content-delta factory and forwards them to
    /// the editor's sink. An empty delta skips `apply_textdelta`
    /// entirely, so property-only edits never open a text delta.
    fn send_text_delta(
        &mut self,
        file: &mut E::File,
        base: Box<dyn io::Read>,
        target: Box<dyn io::Read>,
    ) -> DeltaResult<()> {
        let mut stream = self.factory.stream(base, target)?;

        self.check_cancel()?;
        let first = stream.next_window()?;
        if first.is_none() {
            return Ok(());
        }

        let mut sink = self.editor.apply_textdelta(file)?;
        let mut window = first;
        loop {
            let done = window.is_none();
            sink.window(window.as_ref())?;
            if done {
                return Ok(());
            }
            self.check_cancel()?;
            window = stream.next_window()?;
        }
    }
}

/// Merge-walk of two sorted property lists. Names only the source has
/// emit a delete (`None`), names only the target has emit an add, shared
/// names with differing values emit a change. `None` for the source
/// treats it as empty.
fn delta_proplists<F>(
    source: Option<&PropList>,
    target: &PropList,
    mut change: F,
) -> DeltaResult<()>
where
    F: FnMut(&str, Option<&[u8]>) -> DeltaResult<()>,
{
    let empty = PropList::new();
    let source = source.unwrap_or(&empty);

    let mut si = source.iter().peekable();
    let mut ti = target.iter().peekable();
    loop {
        match (si.peek(), ti.peek()) {
            (None, None) => return Ok(()),
            (Some((name, _)), None) => {
                change(name, None)?;
                si.next();
            }
            (None, Some((name, value))) => {
                change(name, Some(value.as_slice()))?;
                ti.next();
            }
            (Some((source_name, source_value)), Some((target_name, target_value))) => {
                match source_name.cmp(target_name) {
                    Ordering::Equal => {
                        if source_value != target_value {
                            change(target_name, Some(target_value.as_slice()))?;
                        }
                        si.next();
                        ti.next();
                    }
                    Ordering::Less => {
                        change(source_name, None)?;
                        si.next();
                    }
                    Ordering::Greater => {
                        change(target_name, Some(target_value.as_slice()))?;
                        ti.next();
                    }
                }
            }
        }
    }
}

/// Ancestor paths are absolute within the delta: the root is `""` and
/// every level below appends `/name`.
fn join_source_path(source_path: &str, name: &str) -> String {
    format!("{source_path}/{name}")
}

fn entries_sorted(entries: &[Dirent]) -> bool {
    entries.windows(2).all(|pair| pair[0].name < pair[1].name)
}
