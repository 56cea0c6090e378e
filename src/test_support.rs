//! Shared fixtures for unit tests.

use crate::command_handlers::Session;
use crate::config::{BackendKind, Config};
use crate::error::GovmError;
use crate::fetch::{ArchiveBackend, NativeBackend};
use crate::platform::Platform;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub fn config_in(root: &Path) -> Config {
    Config {
        root: root.to_path_buf(),
        bin_dir: root.join("bin"),
        goroot: root.join("go"),
        download_host: "https://dl.invalid".to_string(),
        backend: BackendKind::Native,
    }
}

pub fn linux_amd64() -> Platform {
    Platform::from_parts("linux", "x86_64").unwrap()
}

/// Writes a tarball shaped like an official release: everything below `go/`.
pub fn write_go_tarball(path: &Path, version: &str) {
    let gz = GzEncoder::new(std::fs::File::create(path).unwrap(), Compression::fast());
    let mut builder = tar::Builder::new(gz);
    let body = format!("go{version}\n");
    let mut header = tar::Header::new_gnu();
    header.set_size(body.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    builder.append_data(&mut header, "go/VERSION", body.as_bytes()).unwrap();

    let mut header = tar::Header::new_gnu();
    header.set_size(0);
    header.set_mode(0o755);
    header.set_cksum();
    builder.append_data(&mut header, "go/bin/go", std::io::empty()).unwrap();
    builder.into_inner().unwrap().finish().unwrap();
}

pub fn session_in(root: &Path, backend: impl ArchiveBackend + 'static) -> Session {
    Session {
        cfg: config_in(root),
        platform: linux_amd64(),
        backend: Box::new(backend),
    }
}

/// Serves a locally built tarball instead of hitting the network, and counts
/// every fetch. Counters are shared so they stay readable once boxed.
pub struct FakeBackend {
    pub version: String,
    pub fetches: Rc<Cell<usize>>,
    pub urls: Rc<RefCell<Vec<String>>>,
    pub fail_fetch: bool,
}

impl FakeBackend {
    pub fn serving(version: &str) -> Self {
        Self {
            version: version.to_string(),
            fetches: Rc::new(Cell::new(0)),
            urls: Rc::new(RefCell::new(Vec::new())),
            fail_fetch: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_fetch: true,
            ..Self::serving("0")
        }
    }
}

impl ArchiveBackend for FakeBackend {
    fn required_tools(&self) -> &'static [&'static str] {
        &[]
    }

    fn fetch(&self, url: &str, dest: &Path) -> Result<(), GovmError> {
        self.fetches.set(self.fetches.get() + 1);
        self.urls.borrow_mut().push(url.to_string());
        if self.fail_fetch {
            return Err(GovmError::Download {
                url: url.to_string(),
                reason: "server responded 404 Not Found".into(),
            });
        }
        write_go_tarball(dest, &self.version);
        Ok(())
    }

    fn decompress(&self, src: &Path, dest: &Path) -> Result<(), GovmError> {
        NativeBackend.decompress(src, dest)
    }

    fn extract(&self, tar: &Path, into: &Path) -> Result<(), GovmError> {
        NativeBackend.extract(tar, into)
    }
}

pub fn read_link(path: &Path) -> PathBuf {
    std::fs::read_link(path).unwrap()
}
