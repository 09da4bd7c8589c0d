//! JSON snapshot of the user table.
//!
//! The maintenance binary has no database of its own: it loads users from a
//! snapshot file into [`MemoryUserRepository`](super::memory::MemoryUserRepository),
//! runs the cleanup, and writes the survivors back. Writes go to a hidden
//! temporary file in the same directory and are renamed over the target, so
//! a crash never leaves a half-written snapshot behind.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::User;

/// Format version written to, and expected in, every snapshot.
pub const SNAPSHOT_VERSION: u32 = 1;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Errors raised while reading or writing a user snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// The snapshot path does not name a file inside a directory.
    #[error("snapshot path '{path}' must name a file")]
    InvalidPath {
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// The containing directory could not be opened.
    #[error("failed to open snapshot directory '{path}': {message}")]
    OpenDirectory {
        /// Directory path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        message: String,
    },
    /// The snapshot exists but could not be read.
    #[error("failed to read snapshot '{path}': {message}")]
    Read {
        /// Snapshot path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        message: String,
    },
    /// The snapshot is not valid JSON for the expected document.
    #[error("invalid snapshot '{path}': {message}")]
    Parse {
        /// Snapshot path.
        path: Utf8PathBuf,
        /// Parser error.
        message: String,
    },
    #[error("unsupported snapshot version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Version this build understands.
        expected: u32,
        /// Version found in the file.
        actual: u32,
    },
    /// The snapshot could not be written.
    #[error("failed to write snapshot '{path}': {message}")]
    Write {
        /// Path of the file being written.
        path: Utf8PathBuf,
        /// Underlying error.
        message: String,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotDocument {
    version: u32,
    users: Vec<User>,
}

/// A user snapshot file opened through a capability-scoped directory.
#[derive(Debug)]
pub struct UserSnapshotStore {
    dir: Dir,
    file_name: String,
    path: Utf8PathBuf,
}

impl UserSnapshotStore {
    /// Open the directory holding `path`. The file itself need not exist.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::InvalidPath`] when `path` has no file name and
    /// [`SnapshotError::OpenDirectory`] when its parent cannot be opened.
    pub fn open(path: &Utf8Path) -> Result<Self, SnapshotError> {
        let file_name = path
            .file_name()
            .ok_or_else(|| SnapshotError::InvalidPath {
                path: path.to_path_buf(),
            })?
            .to_owned();
        let parent = match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|err| {
            SnapshotError::OpenDirectory {
                path: parent.to_path_buf(),
                message: err.to_string(),
            }
        })?;
        Ok(Self {
            dir,
            file_name,
            path: path.to_path_buf(),
        })
    }

    /// Path the store reads and writes.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Read every stored user; a missing file is an empty snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] when the file cannot be read or parsed, or
    /// carries an unknown version.
    pub fn load(&self) -> Result<Vec<User>, SnapshotError> {
        let contents = match self.dir.read_to_string(&self.file_name) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(SnapshotError::Read {
                    path: self.path.clone(),
                    message: err.to_string(),
                });
            }
        };
        let document: SnapshotDocument =
            serde_json::from_str(&contents).map_err(|err| SnapshotError::Parse {
                path: self.path.clone(),
                message: err.to_string(),
            })?;
        if document.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                expected: SNAPSHOT_VERSION,
                actual: document.version,
            });
        }
        Ok(document.users)
    }

    /// Replace the snapshot with `users`.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Write`] when serialisation or the atomic
    /// write fails.
    pub fn save(&self, users: &[User]) -> Result<(), SnapshotError> {
        let document = SnapshotDocument {
            version: SNAPSHOT_VERSION,
            users: users.to_vec(),
        };
        let contents =
            serde_json::to_string_pretty(&document).map_err(|err| SnapshotError::Write {
                path: self.path.clone(),
                message: err.to_string(),
            })?;
        write_atomic(&self.dir, Utf8Path::new(&self.file_name), &contents).map_err(
            |(path, message)| SnapshotError::Write {
                path: self.path.with_file_name(path),
                message,
            },
        )
    }
}

/// Write through a uniquely named temporary file, then rename it over
/// `path`. Failures report the name of the file being touched.
fn write_atomic(dir: &Dir, path: &Utf8Path, contents: &str) -> Result<(), (String, String)> {
    let mut components = path.components();
    let (Some(Utf8Component::Normal(file_name)), None) = (components.next(), components.next())
    else {
        return Err((path.to_string(), "snapshot path must be a file".to_owned()));
    };
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    let tmp_name = format!(
        ".{file_name}.tmp.{}.{nanos}.{counter}",
        std::process::id()
    );

    write_temp_file(dir, &tmp_name, contents).map_err(|err| {
        discard(dir, &tmp_name);
        (tmp_name.clone(), err.to_string())
    })?;
    dir.rename(&tmp_name, dir, file_name).map_err(|err| {
        discard(dir, &tmp_name);
        (file_name.to_owned(), err.to_string())
    })?;
    if dir.open(".").and_then(|parent| parent.sync_all()).is_err() {
        // Directory sync is best effort.
    }
    Ok(())
}

fn write_temp_file(dir: &Dir, tmp_name: &str, contents: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

fn discard(dir: &Dir, tmp_name: &str) {
    if dir.remove_file(tmp_name).is_err() {
        // Nothing left to clean up.
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    use super::*;
    use crate::domain::test_fixtures::fixture_timestamp;
    use crate::domain::value_objects::{
        Email, Identifier, Language, NameWithSpaces, Path, Roles,
    };

    struct Workspace {
        _temp: TempDir,
        path: Utf8PathBuf,
    }

    #[fixture]
    fn workspace() -> Workspace {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf-8 temp dir");
        Workspace {
            path: root.join("users.json"),
            _temp: temp,
        }
    }

    fn user(email: &str) -> User {
        User {
            id: Identifier::random(),
            email: Email::new(email),
            password: "$argon2id$stub".to_owned(),
            name: NameWithSpaces::new("Snapshot user"),
            roles: Roles::new([Roles::NOT_ACTIVE]),
            language: Language::new("en"),
            image: Path::null(),
            created_on: fixture_timestamp(),
        }
    }

    #[rstest]
    fn missing_file_is_empty(workspace: Workspace) {
        let store = UserSnapshotStore::open(&workspace.path).expect("open");
        assert!(store.load().expect("load").is_empty());
    }

    #[rstest]
    fn save_then_load_returns_users(workspace: Workspace) {
        let store = UserSnapshotStore::open(&workspace.path).expect("open");
        let users = vec![user("a@example.com"), user("b@example.com")];
        store.save(&users).expect("save");
        store.save(&users).expect("overwrite");
        assert_eq!(store.load().expect("load"), users);

        let parent = workspace.path.parent().expect("parent");
        let leftovers: Vec<_> = std::fs::read_dir(parent)
            .expect("list dir")
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().contains(".tmp."))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[rstest]
    #[case::garbage("not json", "invalid snapshot")]
    #[case::wrong_version(r#"{"version": 9, "users": []}"#, "unsupported snapshot version")]
    fn rejects_bad_documents(
        workspace: Workspace,
        #[case] contents: &str,
        #[case] expected: &str,
    ) {
        std::fs::write(&workspace.path, contents).expect("seed file");
        let store = UserSnapshotStore::open(&workspace.path).expect("open");
        let error = store.load().expect_err("bad document");
        assert!(error.to_string().contains(expected), "{error}");
    }

    #[test]
    fn missing_directory_is_reported() {
        let error = UserSnapshotStore::open(Utf8Path::new("/definitely/not/here/users.json"))
            .expect_err("missing dir");
        assert!(matches!(error, SnapshotError::OpenDirectory { .. }));
    }
}
