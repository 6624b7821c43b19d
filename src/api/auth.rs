//! Authentication state, injected into the client instead of being read
//! from global storage at every call site.

use crate::errors::AppResult;
use std::cell::RefCell;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Bearer token. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

pub trait AuthContext {
    fn current_token(&self) -> Option<Token>;

    /// Called when the server answers 401; the session is gone.
    fn on_unauthorized(&self);
}

/// Token persisted in a file under the configuration directory.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, token: &Token) -> AppResult<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, token.expose())?;
        restrict_permissions(&self.path)?;
        debug!(path = %self.path.display(), "token stored");
        Ok(())
    }

    /// Returns true when a token was actually removed.
    pub fn clear(&self) -> AppResult<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

impl AuthContext for FileTokenStore {
    fn current_token(&self) -> Option<Token> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let raw = raw.trim();
        if raw.is_empty() {
            None
        } else {
            Some(Token::new(raw))
        }
    }

    fn on_unauthorized(&self) {
        if let Err(e) = self.clear() {
            warn!(error = %e, "could not remove rejected token");
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> AppResult<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> AppResult<()> {
    Ok(())
}

/// In-memory auth state, for one-shot tokens (`RCLOCKMARKS_TOKEN`) and
/// tests.
#[derive(Debug, Default)]
pub struct MemoryAuth {
    token: RefCell<Option<Token>>,
    unauthorized_calls: RefCell<usize>,
}

impl MemoryAuth {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RefCell::new(Some(Token::new(token))),
            unauthorized_calls: RefCell::new(0),
        }
    }

    pub fn unauthorized_calls(&self) -> usize {
        *self.unauthorized_calls.borrow()
    }
}

impl AuthContext for MemoryAuth {
    fn current_token(&self) -> Option<Token> {
        self.token.borrow().clone()
    }

    fn on_unauthorized(&self) {
        self.token.borrow_mut().take();
        *self.unauthorized_calls.borrow_mut() += 1;
    }
}

impl<A: AuthContext + ?Sized> AuthContext for Box<A> {
    fn current_token(&self) -> Option<Token> {
        (**self).current_token()
    }

    fn on_unauthorized(&self) {
        (**self).on_unauthorized()
    }
}
