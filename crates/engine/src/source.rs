//! Hook source resolution and materialization
//!
//! A specifier given to `githook install` is resolved into a [`HookSource`],
//! which knows its default name and how to place its content at a destination.
//!
//! Resolution order (first match wins):
//! - `gist:<digits>` (case-insensitive, anything after the digits is
//!   ignored) becomes [`HookSource::Gist`]
//! - `http://` or `https://` URLs become [`HookSource::Url`]
//! - everything else is a local [`HookSource::File`]

use crate::fetch::Fetcher;
use githook_core::{Error, HookName, Result};
use regex::Regex;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Prefix of temporary files written next to installed hooks
pub(crate) const PARTIAL_PREFIX: &str = ".githook-partial-";

static GIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"(?i)^gist:(\d+)").unwrap()
});

/// How a hook's content lands in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstallMode {
    /// Copy or download the content
    #[default]
    Copy,
    /// Symlink to a local file (File sources only)
    Link,
}

/// Where a hook's content comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookSource {
    /// Local filesystem path
    File(PathBuf),
    /// HTTP(S) URL
    Url(String),
    /// GitHub gist id
    Gist(u64),
}

impl HookSource {
    /// Resolve a specifier into a hook source
    ///
    /// Missing files are not detected here; they fail at materialization.
    ///
    /// # Errors
    ///
    /// Returns `UnresolvableSpecifier` for a blank specifier or a gist id that
    /// does not fit in 64 bits.
    ///
    /// # Examples
    ///
    /// ```
    /// use githook_engine::HookSource;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// assert_eq!(HookSource::resolve("GIST:0042")?, HookSource::Gist(42));
    /// assert!(matches!(HookSource::resolve("https://x.org/lint.sh")?, HookSource::Url(_)));
    /// assert!(matches!(HookSource::resolve("gist:abc")?, HookSource::File(_)));
    /// # Ok(())
    /// # }
    /// ```
    pub fn resolve(specifier: &str) -> Result<Self> {
        let unresolvable = || Error::UnresolvableSpecifier {
            specifier: specifier.to_string(),
        };

        if specifier.trim().is_empty() {
            return Err(unresolvable());
        }

        if let Some(caps) = GIST_RE.captures(specifier) {
            let id = caps[1].parse::<u64>().map_err(|_| unresolvable())?;
            return Ok(Self::Gist(id));
        }

        if has_prefix_ignore_case(specifier, "http://")
            || has_prefix_ignore_case(specifier, "https://")
        {
            return Ok(Self::Url(specifier.to_string()));
        }

        Ok(Self::File(PathBuf::from(specifier)))
    }

    /// Whether the source lives on the local filesystem
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(self, Self::File(_))
    }

    /// Name the hook gets when none is given
    ///
    /// `None` when the specifier has no usable final component, such as
    /// `https://host/` or `..`.
    #[must_use]
    pub fn default_name(&self) -> Option<HookName> {
        let name = match self {
            Self::Gist(id) => format!("gist-{id}"),
            Self::Url(url) => {
                let parsed = url::Url::parse(url).ok()?;
                let segment = parsed.path().rsplit('/').next()?;
                let decoded = urlencoding::decode(segment).ok()?;
                // A decoded %2F must not turn the name into a nested path
                Path::new(decoded.as_ref())
                    .file_name()?
                    .to_string_lossy()
                    .into_owned()
            }
            Self::File(path) => path.file_name()?.to_string_lossy().into_owned(),
        };

        HookName::parse(&name).ok()
    }

    /// URL the content is fetched from, `None` for local files
    #[must_use]
    pub fn fetch_url(&self, fetcher: &dyn Fetcher) -> Option<String> {
        match self {
            Self::File(_) => None,
            Self::Url(url) => Some(url.clone()),
            Self::Gist(id) => Some(fetcher.gist_url(*id)),
        }
    }

    /// Place this hook's content at `destination`
    ///
    /// Parent directories are created as needed. The result is executable.
    ///
    /// # Errors
    ///
    /// - `LinkUnsupported` for [`InstallMode::Link`] on a remote source
    /// - `SourceUnavailable` if the file cannot be read or the fetch fails
    /// - `Io` if writing the destination fails
    pub fn materialize(
        &self,
        destination: &Path,
        mode: InstallMode,
        fetcher: &dyn Fetcher,
    ) -> Result<()> {
        if mode == InstallMode::Link && !self.is_local() {
            return Err(Error::LinkUnsupported {
                specifier: self.to_string(),
            });
        }

        let parent = destination.parent().ok_or_else(|| {
            Error::Message(format!("No parent directory for {}", destination.display()))
        })?;
        create_dirs(parent)?;

        match self {
            Self::File(path) if mode == InstallMode::Link => return link_file(path, destination),
            Self::File(path) => copy_file(path, parent, destination)?,
            Self::Url(_) | Self::Gist(_) => {
                let url = self
                    .fetch_url(fetcher)
                    .ok_or_else(|| Error::Message("Remote source without URL".to_string()))?;
                download(fetcher, &url, parent, destination)?;
            }
        }

        ensure_executable(destination)
    }
}

impl fmt::Display for HookSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
            Self::Gist(id) => write!(f, "gist:{id}"),
        }
    }
}

fn has_prefix_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn create_dirs(dir: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(dir)?;
    Ok(())
}

fn partial_file(dir: &Path) -> Result<tempfile::NamedTempFile> {
    Ok(tempfile::Builder::new()
        .prefix(PARTIAL_PREFIX)
        .tempfile_in(dir)?)
}

fn copy_file(source: &Path, dir: &Path, destination: &Path) -> Result<()> {
    let location = source.display().to_string();
    let mut input =
        fs::File::open(source).map_err(|e| Error::source_unavailable(&location, e))?;
    let permissions = input
        .metadata()
        .map_err(|e| Error::source_unavailable(&location, e))?
        .permissions();

    let mut tmp = partial_file(dir)?;
    io::copy(&mut input, tmp.as_file_mut())
        .map_err(|e| Error::source_unavailable(&location, e))?;
    tmp.as_file().set_permissions(permissions)?;
    tmp.persist(destination).map_err(|e| Error::Io(e.error))?;

    tracing::debug!(from = %location, to = %destination.display(), "Copied hook");
    Ok(())
}

fn download(fetcher: &dyn Fetcher, url: &str, dir: &Path, destination: &Path) -> Result<()> {
    let mut tmp = partial_file(dir)?;
    let bytes = fetcher.fetch(url, tmp.as_file_mut())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o755))?;
    }
    tmp.persist(destination).map_err(|e| Error::Io(e.error))?;

    tracing::debug!(%url, bytes, to = %destination.display(), "Downloaded hook");
    Ok(())
}

#[cfg(unix)]
fn link_file(source: &Path, destination: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let location = source.display().to_string();
    let target = source
        .canonicalize()
        .map_err(|e| Error::source_unavailable(&location, e))?;
    let mode = fs::metadata(&target)
        .map_err(|e| Error::source_unavailable(&location, e))?
        .permissions()
        .mode();

    std::os::unix::fs::symlink(&target, destination)?;

    if mode & 0o111 == 0 {
        tracing::warn!(
            "Linked hook target {} is not executable, it will fail when dispatched",
            target.display()
        );
    }
    Ok(())
}

#[cfg(not(unix))]
fn link_file(_source: &Path, _destination: &Path) -> Result<()> {
    Err(Error::Message(
        "Linking hooks is only supported on Unix".to_string(),
    ))
}

fn ensure_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mut permissions = fs::metadata(path)?.permissions();
        let mode = permissions.mode();
        if mode & 0o111 == 0 {
            permissions.set_mode(mode | 0o111);
            fs::set_permissions(path, permissions)?;
        }
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}
