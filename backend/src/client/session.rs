//! Client session context backed by a token file.
//!
//! The context is created once at startup and handed to the views. It loads
//! any saved bearer token, saves a new one on login and clears it on logout.

use std::io;
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;
use zeroize::Zeroizing;

/// Location of the persisted bearer token.
#[derive(Debug)]
pub struct TokenFile {
    dir: Dir,
    dir_path: PathBuf,
    file_name: PathBuf,
}

impl TokenFile {
    /// Open (creating if needed) the directory that holds `path`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when `path` has no file name or its directory
    /// cannot be created or opened.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file_name = path.file_name().map(PathBuf::from).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("token path {} has no file name", path.display()),
            )
        })?;
        let dir_path = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Dir::create_ambient_dir_all(&dir_path, ambient_authority())?;
        let dir = Dir::open_ambient_dir(&dir_path, ambient_authority())?;
        Ok(Self {
            dir,
            dir_path,
            file_name,
        })
    }

    /// Full path of the token file, for messages.
    pub fn path(&self) -> PathBuf {
        self.dir_path.join(&self.file_name)
    }

    /// Read the saved token; a missing or blank file means no session.
    ///
    /// # Errors
    ///
    /// Returns I/O errors other than `NotFound`.
    pub fn load(&self) -> io::Result<Option<Zeroizing<String>>> {
        match self.dir.read_to_string(&self.file_name) {
            Ok(contents) => {
                let contents = Zeroizing::new(contents);
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| Zeroizing::new(token.to_owned())))
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Persist `token`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns the underlying write error.
    pub fn save(&self, token: &str) -> io::Result<()> {
        self.dir.write(&self.file_name, token.as_bytes())
    }

    /// Remove the saved token. Removing an absent file succeeds.
    ///
    /// # Errors
    ///
    /// Returns I/O errors other than `NotFound`.
    pub fn clear(&self) -> io::Result<()> {
        match self.dir.remove_file(&self.file_name) {
            Err(error) if error.kind() != io::ErrorKind::NotFound => Err(error),
            _ => Ok(()),
        }
    }
}

/// Explicit replacement for browser-global token storage.
#[derive(Debug)]
pub struct SessionContext {
    file: TokenFile,
    token: Option<Zeroizing<String>>,
}

impl SessionContext {
    /// Load the session saved in `file`, if any.
    ///
    /// # Errors
    ///
    /// Propagates [`TokenFile::load`] failures.
    pub fn load(file: TokenFile) -> io::Result<Self> {
        let token = file.load()?;
        debug!(
            path = %file.path().display(),
            signed_in = token.is_some(),
            "session loaded"
        );
        Ok(Self { file, token })
    }

    /// The current bearer token.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().map(String::as_str)
    }

    pub fn is_signed_in(&self) -> bool {
        self.token.is_some()
    }

    /// Remember `token` for this and later runs.
    ///
    /// # Errors
    ///
    /// Returns the token file write error; the in-memory token is left
    /// unchanged in that case.
    pub fn sign_in(&mut self, token: String) -> io::Result<()> {
        let token = Zeroizing::new(token);
        self.file.save(&token)?;
        self.token = Some(token);
        Ok(())
    }

    /// Forget the token here and on disk.
    ///
    /// # Errors
    ///
    /// Returns the token file removal error. The in-memory token is cleared
    /// regardless.
    pub fn sign_out(&mut self) -> io::Result<()> {
        self.token = None;
        self.file.clear()
    }
}
