//! Note storage.
//!
//! Titles and timestamps live in `notes/index.json`; each note's body is a
//! sibling `<id>.txt` file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::models::{new_id, now, Note, NoteWithContent};
use crate::store::{JsonIndex, StoreResult};

pub const INDEX_FILE: &str = "index.json";

pub struct NoteStore {
    dir: PathBuf,
    index: JsonIndex<Note>,
}

impl NoteStore {
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let index = JsonIndex::open(dir.join(INDEX_FILE))?;
        Ok(Self { dir, index })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn create(&mut self, title: &str, content: &str) -> StoreResult<Note> {
        let id = new_id();
        let timestamp = now();
        let note = Note {
            filename: format!("{}.txt", id),
            id,
            title: title.to_string(),
            created_at: timestamp,
            updated_at: timestamp,
        };

        let path = self.content_path(&note);
        fs::write(&path, content)?;

        match self.index.insert(note) {
            Ok(note) => Ok(note),
            Err(e) => {
                fs::remove_file(&path).ok();
                Err(e)
            }
        }
    }

    /// All notes, newest first.
    pub fn list(&self) -> Vec<Note> {
        self.index.list()
    }

    /// The note and its content. `None` when the id is unknown or the
    /// content file has gone missing.
    pub fn get(&self, id: &str) -> StoreResult<Option<NoteWithContent>> {
        let Some(note) = self.index.get(id) else {
            return Ok(None);
        };

        match fs::read_to_string(self.content_path(note)) {
            Ok(content) => Ok(Some(NoteWithContent {
                note: note.clone(),
                content,
            })),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::warn!("[NOTES] Content file {} is missing", note.filename);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn update(&mut self, id: &str, title: &str, content: &str) -> StoreResult<Option<Note>> {
        let Some(note) = self.index.get(id) else {
            return Ok(None);
        };

        let path = self.content_path(note);
        let previous = fs::read_to_string(&path).ok();
        fs::write(&path, content)?;

        let title = title.to_string();
        let result = self.index.update(id, move |n| {
            n.title = title;
            n.updated_at = now();
        });
        if result.is_err() {
            match previous {
                Some(old) => fs::write(&path, old).ok(),
                None => fs::remove_file(&path).ok(),
            };
        }
        result
    }

    /// Remove the note from the index and delete its content file.
    pub fn delete(&mut self, id: &str) -> StoreResult<Option<Note>> {
        let Some(note) = self.index.remove(id)? else {
            return Ok(None);
        };

        let path = self.content_path(&note);
        if let Err(e) = fs::remove_file(&path) {
            if e.kind() != io::ErrorKind::NotFound {
                log::warn!("[NOTES] Could not delete {}: {}", path.display(), e);
            }
        }
        Ok(Some(note))
    }

    /// Content file for `note`. Only the final path component of the stored
    /// filename is used so an edited index cannot point outside the notes dir.
    fn content_path(&self, note: &Note) -> PathBuf {
        let name = Path::new(&note.filename)
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| format!("{}.txt", note.id).into());
        self.dir.join(name)
    }
}
