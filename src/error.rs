use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Every way a run can fail. Nothing here is recovered from: the first error
/// aborts the whole run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse '{}': {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("package {package} uses unknown repository '{repository}'")]
    UnknownRepository { package: String, repository: String },

    #[error("libs_dir '{}' must be a relative path inside the project root", .0.display())]
    InvalidLibsDir(PathBuf),

    #[error("repository '{0}' is reserved and cannot be redefined")]
    ReservedRepository(String),

    #[error("package directory '{}' already exists (duplicate package?)", .0.display())]
    DuplicatePackage(PathBuf),

    #[error("GET {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GET {url} returned HTTP {status}")]
    FetchStatus { url: String, status: u16 },

    #[error("malformed XML in '{}': {source}", .path.display())]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("'{}': missing <{element}>", .path.display())]
    MissingElement { path: PathBuf, element: &'static str },

    #[error("'{}': {attribute}=\"{value}\" is not an integer", .path.display())]
    InvalidSdkVersion {
        path: PathBuf,
        attribute: &'static str,
        value: String,
    },

    #[error("cannot extract from '{}': {source}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("{0}: SDK packages don't get a generated module")]
    SdkModule(String),

    #[error("{0}: no library file found (was it resolved?)")]
    MissingLibrary(String),

    #[error("'{}': {message}", .path.display())]
    ManagedBlock { path: PathBuf, message: String },

    #[error("{package}: {source}")]
    Package {
        package: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Attach the package being processed to an error.
    pub(crate) fn in_package(self, package: &str) -> Self {
        Error::Package {
            package: package.to_string(),
            source: Box::new(self),
        }
    }
}
