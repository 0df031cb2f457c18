//! Writer-side sinks and their worker-side encoders.

mod obj;
mod prt;

use std::io;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

pub use obj::{FaceIndexing, ObjEncoder, ObjOptions, ObjSink};
pub use prt::{PRT_HEADER_BYTES, PrtEncoder, PrtSink, write_prt_header};

/// Creates a temp file in the target's directory so the final rename stays on one filesystem.
///
/// The file is deleted on drop unless [`persist`] moves it into place.
fn temp_beside(target: &Path) -> io::Result<NamedTempFile> {
    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    tempfile::Builder::new()
        .prefix(&format!(".{name}."))
        .suffix(".tmp")
        .tempfile_in(dir)
}

fn persist(file: NamedTempFile, target: &Path) -> io::Result<()> {
    file.persist(target).map_err(|e| e.error)?;
    Ok(())
}

/// Path of the material library written next to `output`.
pub fn mtl_path(output: &Path) -> PathBuf {
    output.with_extension("mtl")
}
