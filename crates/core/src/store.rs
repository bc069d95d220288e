//! File-backed document store.
//!
//! Each document is one pretty-printed JSON file inside its own sharded directory:
//!
//! ```text
//! <root>/
//!   <s1>/
//!     <s2>/
//!       <id>/
//!         patient.json
//! ```
//!
//! where `s1` and `s2` are the first four hex characters of the record id. Embedded data
//! (a patient's follow-ups and prescriptions) lives inside its parent's file, so a single
//! document write covers a whole patient. Writes go to a fresh temporary file that is renamed
//! over the old one, which keeps every document write atomic. There is no locking or versioning:
//! two writers racing on the same document means the last one wins.

use crate::{ClinicError, ClinicResult};
use clinic_uuid::RecordId;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::{ErrorKind, Write};
use tempfile::NamedTempFile;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// A top-level record that owns its own directory in a [`DocumentStore`].
pub trait Document: Serialize + DeserializeOwned {
    /// Human-readable kind, used in log lines and "not found" errors.
    const KIND: &'static str;

    /// Name of the JSON file inside the record directory.
    const FILE_NAME: &'static str;

    fn id(&self) -> RecordId;
}

/// Store for one kind of document rooted at a directory.
#[derive(Debug)]
pub struct DocumentStore<D> {
    root: PathBuf,
    _kind: PhantomData<fn() -> D>,
}

impl<D> Clone for DocumentStore<D> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            _kind: PhantomData,
        }
    }
}

impl<D: Document> DocumentStore<D> {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            _kind: PhantomData,
        }
    }

    fn record_dir(&self, id: RecordId) -> PathBuf {
        id.sharded_dir(&self.root)
    }

    fn document_path(&self, id: RecordId) -> PathBuf {
        self.record_dir(id).join(D::FILE_NAME)
    }

    /// Stores a brand new document.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::RecordDirCreation`] if a record with the same id already
    /// exists or its directory cannot be created, and the write errors of [`Self::save`].
    pub fn insert(&self, doc: &D) -> ClinicResult<()> {
        let dir = self.record_dir(doc.id());
        if let Some(parent) = dir.parent() {
            fs::create_dir_all(parent).map_err(ClinicError::RecordDirCreation)?;
        }
        fs::create_dir(&dir).map_err(ClinicError::RecordDirCreation)?;
        self.write(&dir, doc)
    }

    /// Overwrites an existing document.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::NotFound`] if the record directory is gone (for example the
    /// document was deleted since it was loaded), otherwise serialisation or write errors.
    pub fn save(&self, doc: &D) -> ClinicResult<()> {
        let dir = self.record_dir(doc.id());
        if !dir.is_dir() {
            return Err(ClinicError::NotFound(D::KIND));
        }
        self.write(&dir, doc)
    }

    /// Stages the document in a uniquely named temporary file inside the record directory,
    /// then renames it over the document. Concurrent writers never share a staging file, so
    /// readers only ever see a complete document.
    fn write(&self, dir: &Path, doc: &D) -> ClinicResult<()> {
        let json = serde_json::to_vec_pretty(doc).map_err(ClinicError::Serialization)?;
        let vanished = |e: std::io::Error| {
            if e.kind() == ErrorKind::NotFound {
                ClinicError::NotFound(D::KIND)
            } else {
                ClinicError::FileWrite(e)
            }
        };

        let mut staging = NamedTempFile::new_in(dir).map_err(vanished)?;
        staging.write_all(&json).map_err(ClinicError::FileWrite)?;
        staging
            .persist(dir.join(D::FILE_NAME))
            .map_err(|e| vanished(e.error))?;
        Ok(())
    }

    /// Loads a document, or `None` if no record with this id exists.
    ///
    /// # Errors
    ///
    /// Returns read or deserialisation errors for a record that exists but is unreadable.
    pub fn load(&self, id: RecordId) -> ClinicResult<Option<D>> {
        let path = self.document_path(id);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ClinicError::FileRead(e)),
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(ClinicError::Deserialization)
    }

    /// Deletes a document and its directory. Returns `false` if there was nothing to delete.
    pub fn remove(&self, id: RecordId) -> ClinicResult<bool> {
        match fs::remove_dir_all(self.record_dir(id)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ClinicError::FileDelete(e)),
        }
    }

    /// Reads every document under the root, in no particular order.
    ///
    /// Documents that cannot be read or parsed are logged and skipped so one damaged file
    /// does not hide the rest of the collection. A missing root yields an empty list.
    pub fn list(&self) -> Vec<D> {
        let mut docs = Vec::new();

        let s1_iter = match fs::read_dir(&self.root) {
            Ok(it) => it,
            Err(_) => return docs,
        };
        for s1 in s1_iter.flatten() {
            let s1_path = s1.path();
            if !s1_path.is_dir() {
                continue;
            }

            let s2_iter = match fs::read_dir(&s1_path) {
                Ok(it) => it,
                Err(_) => continue,
            };

            for s2 in s2_iter.flatten() {
                let s2_path = s2.path();
                if !s2_path.is_dir() {
                    continue;
                }

                let id_iter = match fs::read_dir(&s2_path) {
                    Ok(it) => it,
                    Err(_) => continue,
                };

                for id_ent in id_iter.flatten() {
                    let doc_path = id_ent.path().join(D::FILE_NAME);
                    if !doc_path.is_file() {
                        continue;
                    }

                    match fs::read_to_string(&doc_path) {
                        Ok(contents) => match serde_json::from_str::<D>(&contents) {
                            Ok(doc) => docs.push(doc),
                            Err(e) => {
                                tracing::warn!(
                                    "failed to parse {}: {} - {}",
                                    D::KIND,
                                    doc_path.display(),
                                    e
                                );
                            }
                        },
                        Err(e) => {
                            tracing::warn!("failed to read {}: {}", doc_path.display(), e);
                        }
                    }
                }
            }
        }

        docs
    }
}
