//! Platform attribute reset.

use std::fs::{self, Metadata};
use std::io;
use std::path::Path;

/// Resets a single file's attributes to the platform's normal state.
pub trait AttributeReset {
    /// Reset the attributes of `path`.
    ///
    /// Returns `Ok(())` if the file's attributes are normal afterwards,
    /// including when they already were.
    fn reset(&self, path: &Path) -> io::Result<()>;
}

impl<F> AttributeReset for F
where
    F: Fn(&Path) -> io::Result<()>,
{
    fn reset(&self, path: &Path) -> io::Result<()> {
        self(path)
    }
}

/// Attribute backend using the native filesystem APIs.
///
/// - Windows: clears read-only, hidden, system, archive and the other
///   settable flags by writing `FILE_ATTRIBUTE_NORMAL`.
/// - Unix: a file is normal when its owner may write it; the owner write
///   bit is added and other mode bits are kept.
///
/// On Unix symlinks are followed, as `chmod` does. On Windows the link
/// itself is checked and written, since that is what `SetFileAttributesW`
/// changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformAttributes;

impl AttributeReset for PlatformAttributes {
    fn reset(&self, path: &Path) -> io::Result<()> {
        let metadata = attribute_metadata(path)?;
        if is_normal(&metadata) {
            return Ok(());
        }
        set_normal(path, &metadata)
    }
}

/// Metadata of the object the platform's attribute call will modify.
#[cfg(not(windows))]
fn attribute_metadata(path: &Path) -> io::Result<Metadata> {
    fs::metadata(path)
}

#[cfg(windows)]
fn attribute_metadata(path: &Path) -> io::Result<Metadata> {
    fs::symlink_metadata(path)
}

#[cfg(unix)]
const OWNER_WRITE: u32 = 0o200;

/// Check whether metadata already describes a file with normal attributes.
#[cfg(unix)]
pub fn is_normal(metadata: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & OWNER_WRITE != 0
}

#[cfg(unix)]
fn set_normal(path: &Path, metadata: &Metadata) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut permissions = metadata.permissions();
    permissions.set_mode(permissions.mode() | OWNER_WRITE);
    fs::set_permissions(path, permissions)
}

#[cfg(windows)]
mod win {
    use windows::Win32::Storage::FileSystem::{
        FILE_ATTRIBUTE_ARCHIVE, FILE_ATTRIBUTE_HIDDEN, FILE_ATTRIBUTE_NOT_CONTENT_INDEXED,
        FILE_ATTRIBUTE_OFFLINE, FILE_ATTRIBUTE_READONLY, FILE_ATTRIBUTE_SYSTEM,
        FILE_ATTRIBUTE_TEMPORARY,
    };

    /// Attributes that `FILE_ATTRIBUTE_NORMAL` clears.
    pub(super) const SPECIAL_ATTRIBUTES: u32 = FILE_ATTRIBUTE_READONLY.0
        | FILE_ATTRIBUTE_HIDDEN.0
        | FILE_ATTRIBUTE_SYSTEM.0
        | FILE_ATTRIBUTE_ARCHIVE.0
        | FILE_ATTRIBUTE_TEMPORARY.0
        | FILE_ATTRIBUTE_NOT_CONTENT_INDEXED.0
        | FILE_ATTRIBUTE_OFFLINE.0;
}

/// Check whether metadata already describes a file with normal attributes.
#[cfg(windows)]
pub fn is_normal(metadata: &Metadata) -> bool {
    use std::os::windows::fs::MetadataExt;
    metadata.file_attributes() & win::SPECIAL_ATTRIBUTES == 0
}

#[cfg(windows)]
fn set_normal(path: &Path, _metadata: &Metadata) -> io::Result<()> {
    use std::os::windows::ffi::OsStrExt;
    use windows::Win32::Storage::FileSystem::{FILE_ATTRIBUTE_NORMAL, SetFileAttributesW};
    use windows::core::PCWSTR;

    let wide_path: Vec<u16> = path
        .as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();

    // SAFETY: `wide_path` is NUL-terminated and outlives the call.
    unsafe { SetFileAttributesW(PCWSTR(wide_path.as_ptr()), FILE_ATTRIBUTE_NORMAL) }
        .map_err(win32_io_error)
}

/// Convert a Win32 failure into an `io::Error` that keeps its error kind.
///
/// HRESULTs in the Win32 facility carry the original error code in their
/// low 16 bits; anything else keeps its message only.
#[cfg(windows)]
fn win32_io_error(err: windows::core::Error) -> io::Error {
    let hresult = err.code().0 as u32;
    if hresult & 0xFFFF_0000 == 0x8007_0000 {
        io::Error::from_raw_os_error((hresult & 0xFFFF) as i32)
    } else {
        io::Error::other(err.to_string())
    }
}

/// Check whether metadata already describes a file with normal attributes.
#[cfg(not(any(unix, windows)))]
pub fn is_normal(metadata: &Metadata) -> bool {
    !metadata.permissions().readonly()
}

#[cfg(not(any(unix, windows)))]
fn set_normal(path: &Path, metadata: &Metadata) -> io::Result<()> {
    let mut permissions = metadata.permissions();
    permissions.set_readonly(false);
    fs::set_permissions(path, permissions)
}
