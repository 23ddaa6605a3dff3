//! In-memory snapshot trees and a recording editor for driver tests.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use std::rc::Rc;

use delta::{
    Ancestor, CopyFrom, DeltaResult, DeltaWindow, DirSnapshot, Dirent, Editor, FileSnapshot,
    NodeId, NodeKind, PropList, Revision, TextDeltaSink,
};

/// An immutable in-memory file snapshot.
#[derive(Clone, Debug)]
pub struct MemFile {
    pub revision: Option<Revision>,
    pub id: NodeId,
    pub props: PropList,
    pub content: Vec<u8>,
}

impl MemFile {
    pub fn new(revision: Revision, id: &[u64], content: &[u8]) -> Self {
        MemFile {
            revision: Some(revision),
            id: NodeId::new(id.to_vec()),
            props: PropList::new(),
            content: content.to_vec(),
        }
    }

    pub fn with_prop(mut self, name: &str, value: &[u8]) -> Self {
        self.props.insert(name.to_owned(), value.to_vec());
        self
    }
}

impl FileSnapshot for MemFile {
    fn base_revision(&self) -> Option<Revision> {
        self.revision
    }

    fn props(&self) -> DeltaResult<PropList> {
        Ok(self.props.clone())
    }

    fn contents(&self) -> DeltaResult<Box<dyn Read>> {
        Ok(Box::new(Cursor::new(self.content.clone())))
    }
}

/// An immutable in-memory directory snapshot.
#[derive(Clone, Debug)]
pub struct MemDir {
    pub revision: Option<Revision>,
    pub id: NodeId,
    pub props: PropList,
    pub entry_props: BTreeMap<String, PropList>,
    pub files: BTreeMap<String, Rc<MemFile>>,
    pub dirs: BTreeMap<String, Rc<MemDir>>,
    pub copyfrom: BTreeMap<String, CopyFrom>,
}

impl MemDir {
    pub fn new(revision: Revision, id: &[u64]) -> Self {
        MemDir {
            revision: Some(revision),
            id: NodeId::new(id.to_vec()),
            props: PropList::new(),
            entry_props: BTreeMap::new(),
            files: BTreeMap::new(),
            dirs: BTreeMap::new(),
            copyfrom: BTreeMap::new(),
        }
    }

    pub fn without_revision(mut self) -> Self {
        self.revision = None;
        self
    }

    pub fn with_file(mut self, name: &str, file: MemFile) -> Self {
        self.files.insert(name.to_owned(), Rc::new(file));
        self
    }

    pub fn with_dir(mut self, name: &str, dir: MemDir) -> Self {
        self.dirs.insert(name.to_owned(), Rc::new(dir));
        self
    }

    pub fn with_prop(mut self, name: &str, value: &[u8]) -> Self {
        self.props.insert(name.to_owned(), value.to_vec());
        self
    }

    pub fn with_entry_prop(mut self, entry: &str, name: &str, value: &[u8]) -> Self {
        self.entry_props
            .entry(entry.to_owned())
            .or_default()
            .insert(name.to_owned(), value.to_vec());
        self
    }

    pub fn with_copyfrom(mut self, entry: &str, path: &str, revision: Revision) -> Self {
        self.copyfrom.insert(
            entry.to_owned(),
            CopyFrom {
                path: path.to_owned(),
                revision,
            },
        );
        self
    }

    pub fn into_snapshot(self) -> Rc<dyn DirSnapshot> {
        Rc::new(self)
    }
}

impl DirSnapshot for MemDir {
    fn base_revision(&self) -> Option<Revision> {
        self.revision
    }

    fn entries(&self) -> DeltaResult<Vec<Dirent>> {
        let mut entries: Vec<Dirent> = Vec::new();
        for (name, file) in &self.files {
            let mut entry = Dirent::new(name.clone(), NodeKind::File, file.id.clone());
            entry.copyfrom = self.copyfrom.get(name).cloned();
            entries.push(entry);
        }
        for (name, dir) in &self.dirs {
            let mut entry = Dirent::new(name.clone(), NodeKind::Dir, dir.id.clone());
            entry.copyfrom = self.copyfrom.get(name).cloned();
            entries.push(entry);
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn dir_props(&self) -> DeltaResult<PropList> {
        Ok(self.props.clone())
    }

    fn entry_props(&self, name: &str) -> DeltaResult<PropList> {
        Ok(self.entry_props.get(name).cloned().unwrap_or_default())
    }

    fn open_dir(&self, name: &str) -> DeltaResult<Rc<dyn DirSnapshot>> {
        self.dirs
            .get(name)
            .cloned()
            .map(|d| d as Rc<dyn DirSnapshot>)
            .ok_or_else(|| missing(name))
    }

    fn open_file(&self, name: &str) -> DeltaResult<Rc<dyn FileSnapshot>> {
        self.files
            .get(name)
            .cloned()
            .map(|f| f as Rc<dyn FileSnapshot>)
            .ok_or_else(|| missing(name))
    }
}

fn missing(name: &str) -> delta::DeltaError {
    delta::DeltaError::Io(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!("no such entry: {name}"),
    ))
}

/// Editor that records every call as a readable line and polices the
/// open/close state machine.
pub struct RecordingEditor {
    pub log: Rc<RefCell<Vec<String>>>,
    next_token: usize,
    open: Vec<(&'static str, usize)>,
    pub opens: usize,
    pub closes: usize,
}

impl RecordingEditor {
    pub fn new() -> Self {
        RecordingEditor {
            log: Rc::new(RefCell::new(Vec::new())),
            next_token: 0,
            open: Vec::new(),
            opens: 0,
            closes: 0,
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    pub fn assert_all_closed(&self) {
        assert!(self.open.is_empty(), "frames left open: {:?}", self.open);
        assert_eq!(self.opens, self.closes, "open/close imbalance");
    }

    fn push(&self, line: String) {
        self.log.borrow_mut().push(line);
    }

    fn open_frame(&mut self, kind: &'static str) -> usize {
        let token = self.next_token;
        self.next_token += 1;
        self.open.push((kind, token));
        self.opens += 1;
        token
    }

    fn close_frame(&mut self, kind: &'static str, token: usize) {
        let top = self.open.pop().unwrap_or_else(|| {
            panic!("close_{kind} with no open frame");
        });
        assert_eq!(top, (kind, token), "closes must be LIFO");
        self.closes += 1;
    }

    fn check_parent_open(&self, token: usize) {
        assert!(
            self.open.iter().any(|&(_, t)| t == token),
            "edit on a closed frame"
        );
    }
}

fn render_value(value: Option<&[u8]>) -> String {
    match value {
        Some(v) => String::from_utf8_lossy(v).into_owned(),
        None => "null".to_owned(),
    }
}

fn render_ancestor(ancestor: Option<&Ancestor>) -> String {
    match ancestor {
        Some(a) => format!("{}@{}", a.path, a.revision),
        None => "none".to_owned(),
    }
}

pub struct RecordingSink {
    log: Rc<RefCell<Vec<String>>>,
}

impl TextDeltaSink for RecordingSink {
    fn window(&mut self, window: Option<&DeltaWindow>) -> DeltaResult<()> {
        let line = match window {
            Some(w) => format!("window({})", w.data.len()),
            None => "window(end)".to_owned(),
        };
        self.log.borrow_mut().push(line);
        Ok(())
    }
}

impl Editor for RecordingEditor {
    type Dir = usize;
    type File = usize;
    type Text = RecordingSink;

    fn replace_root(&mut self, base_revision: Revision) -> DeltaResult<usize> {
        self.push(format!("replace_root(r{base_revision})"));
        Ok(self.open_frame("directory"))
    }

    fn delete_entry(&mut self, parent: &mut usize, name: &str) -> DeltaResult<()> {
        self.check_parent_open(*parent);
        self.push(format!("delete({name})"));
        Ok(())
    }

    fn add_directory(
        &mut self,
        parent: &mut usize,
        name: &str,
        copyfrom: Option<&Ancestor>,
    ) -> DeltaResult<usize> {
        self.check_parent_open(*parent);
        match copyfrom {
            Some(c) => self.push(format!("add_directory({name}, copyfrom={}@{})", c.path, c.revision)),
            None => self.push(format!("add_directory({name})")),
        }
        Ok(self.open_frame("directory"))
    }

    fn replace_directory(
        &mut self,
        parent: &mut usize,
        name: &str,
        ancestor: Option<&Ancestor>,
    ) -> DeltaResult<usize> {
        self.check_parent_open(*parent);
        self.push(format!(
            "replace_directory({name}, ancestor={})",
            render_ancestor(ancestor)
        ));
        Ok(self.open_frame("directory"))
    }

    fn add_file(
        &mut self,
        parent: &mut usize,
        name: &str,
        copyfrom: Option<&Ancestor>,
    ) -> DeltaResult<usize> {
        self.check_parent_open(*parent);
        match copyfrom {
            Some(c) => self.push(format!("add_file({name}, copyfrom={}@{})", c.path, c.revision)),
            None => self.push(format!("add_file({name})")),
        }
        Ok(self.open_frame("file"))
    }

    fn replace_file(
        &mut self,
        parent: &mut usize,
        name: &str,
        ancestor: Option<&Ancestor>,
    ) -> DeltaResult<usize> {
        self.check_parent_open(*parent);
        self.push(format!(
            "replace_file({name}, ancestor={})",
            render_ancestor(ancestor)
        ));
        Ok(self.open_frame("file"))
    }

    fn change_dir_prop(
        &mut self,
        dir: &mut usize,
        name: &str,
        value: Option<&[u8]>,
    ) -> DeltaResult<()> {
        self.check_parent_open(*dir);
        self.push(format!("change_dir_prop({name}={})", render_value(value)));
        Ok(())
    }

    fn change_dirent_prop(
        &mut self,
        dir: &mut usize,
        entry: &str,
        name: &str,
        value: Option<&[u8]>,
    ) -> DeltaResult<()> {
        self.check_parent_open(*dir);
        self.push(format!(
            "change_dirent_prop({entry}:{name}={})",
            render_value(value)
        ));
        Ok(())
    }

    fn change_file_prop(
        &mut self,
        file: &mut usize,
        name: &str,
        value: Option<&[u8]>,
    ) -> DeltaResult<()> {
        self.check_parent_open(*file);
        self.push(format!("change_file_prop({name}={})", render_value(value)));
        Ok(())
    }

    fn apply_textdelta(&mut self, file: &mut usize) -> DeltaResult<RecordingSink> {
        self.check_parent_open(*file);
        self.push("apply_textdelta".to_owned());
        Ok(RecordingSink {
            log: Rc::clone(&self.log),
        })
    }

    fn close_directory(&mut self, dir: usize) -> DeltaResult<()> {
        self.close_frame("directory", dir);
        self.push("close_directory".to_owned());
        Ok(())
    }

    fn close_file(&mut self, file: usize) -> DeltaResult<()> {
        self.close_frame("file", file);
        self.push("close_file".to_owned());
        Ok(())
    }
}
