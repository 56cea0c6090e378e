use crate::config::BackendKind;
use crate::error::GovmError;
use flate2::read::GzDecoder;
use fs_err as fs;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use std::io::{self, BufReader};
use std::path::Path;
use std::process::{Command, Stdio};
use tar::Archive;

/// The three primitive steps of an install. Each step writes exactly one
/// target and leaves the caller to clean up.
pub trait ArchiveBackend {
    /// Executables that must be on PATH for this backend to work.
    fn required_tools(&self) -> &'static [&'static str];
    fn fetch(&self, url: &str, dest: &Path) -> Result<(), GovmError>;
    /// gunzip `src` into `dest`.
    fn decompress(&self, src: &Path, dest: &Path) -> Result<(), GovmError>;
    /// Unpack the tarball at `tar` below `into`.
    fn extract(&self, tar: &Path, into: &Path) -> Result<(), GovmError>;
}

pub fn backend_for(kind: BackendKind) -> Box<dyn ArchiveBackend> {
    match kind {
        BackendKind::Native => Box::new(NativeBackend),
        BackendKind::System => Box::new(SystemBackend),
    }
}

pub struct NativeBackend;

impl ArchiveBackend for NativeBackend {
    fn required_tools(&self) -> &'static [&'static str] {
        &[]
    }

    fn fetch(&self, url: &str, dest: &Path) -> Result<(), GovmError> {
        let fail = |reason: String| GovmError::Download {
            url: url.to_string(),
            reason,
        };
        let client = Client::builder()
            .user_agent(concat!("govm/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| fail(e.to_string()))?;
        let mut resp = client.get(url).send().map_err(|e| fail(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(fail(format!("server responded {}", resp.status())));
        }

        let pb = match resp.content_length() {
            Some(len) => {
                let pb = ProgressBar::new(len);
                pb.set_style(
                    ProgressStyle::with_template("{msg} [{bar:30}] {bytes}/{total_bytes} ({eta})")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("=> "),
                );
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(
                    ProgressStyle::with_template("{spinner} {msg} {bytes}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                pb
            }
        };
        pb.set_message(format!("Downloading {}", file_label(dest)));

        let file = fs::File::create(dest).map_err(|e| fail(e.to_string()))?;
        let copied = io::copy(&mut resp, &mut pb.wrap_write(file));
        pb.finish_and_clear();
        let bytes = copied.map_err(|e| fail(e.to_string()))?;
        tracing::debug!(url, bytes, "download finished");
        Ok(())
    }

    fn decompress(&self, src: &Path, dest: &Path) -> Result<(), GovmError> {
        let fail = |reason: String| GovmError::Decompress {
            path: src.to_path_buf(),
            reason,
        };
        let input = fs::File::open(src).map_err(|e| fail(e.to_string()))?;
        let mut decoder = GzDecoder::new(BufReader::new(input));
        let mut output = fs::File::create(dest).map_err(|e| fail(e.to_string()))?;
        io::copy(&mut decoder, &mut output).map_err(|e| fail(e.to_string()))?;
        Ok(())
    }

    fn extract(&self, tar: &Path, into: &Path) -> Result<(), GovmError> {
        let fail = |reason: String| GovmError::Extract {
            path: tar.to_path_buf(),
            reason,
        };
        let input = fs::File::open(tar).map_err(|e| fail(e.to_string()))?;
        let mut archive = Archive::new(BufReader::new(input));
        archive.set_preserve_permissions(true);
        archive.unpack(into).map_err(|e| fail(e.to_string()))
    }
}

/// Drives `wget`, `gzip` and `tar` from PATH.
pub struct SystemBackend;

impl ArchiveBackend for SystemBackend {
    fn required_tools(&self) -> &'static [&'static str] {
        &["wget", "gzip", "tar"]
    }

    fn fetch(&self, url: &str, dest: &Path) -> Result<(), GovmError> {
        let mut cmd = Command::new("wget");
        cmd.arg("-q").arg("-O").arg(dest).arg(url);
        run(cmd).map_err(|reason| GovmError::Download {
            url: url.to_string(),
            reason,
        })
    }

    fn decompress(&self, src: &Path, dest: &Path) -> Result<(), GovmError> {
        let fail = |reason: String| GovmError::Decompress {
            path: src.to_path_buf(),
            reason,
        };
        let out = std::fs::File::create(dest).map_err(|e| fail(format!("{}: {e}", dest.display())))?;
        let mut cmd = Command::new("gzip");
        cmd.arg("-d").arg("-c").arg(src).stdout(Stdio::from(out));
        run(cmd).map_err(fail)
    }

    fn extract(&self, tar: &Path, into: &Path) -> Result<(), GovmError> {
        let mut cmd = Command::new("tar");
        cmd.arg("-xf").arg(tar).arg("-C").arg(into);
        run(cmd).map_err(|reason| GovmError::Extract {
            path: tar.to_path_buf(),
            reason,
        })
    }
}

fn run(mut cmd: Command) -> Result<(), String> {
    tracing::debug!(?cmd, "spawning");
    let status = cmd.status().map_err(|e| format!("{:?}: {e}", cmd.get_program()))?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("{:?} exited with {status}", cmd.get_program()))
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::write_go_tarball;

    #[test]
    fn native_decompress_and_extract() {
        let dir = tempfile::tempdir().unwrap();
        let gz = dir.path().join("a.tar.gz");
        let tar = dir.path().join("a.tar");
        let out = dir.path().join("out");
        std::fs::create_dir(&out).unwrap();
        write_go_tarball(&gz, "1.99");

        NativeBackend.decompress(&gz, &tar).unwrap();
        NativeBackend.extract(&tar, &out).unwrap();
        let version = std::fs::read_to_string(out.join("go/VERSION")).unwrap();
        assert_eq!(version, "go1.99\n");
    }

    #[test]
    fn native_decompress_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let gz = dir.path().join("bad.tar.gz");
        std::fs::write(&gz, b"not gzip at all").unwrap();
        let err = NativeBackend.decompress(&gz, &dir.path().join("bad.tar")).unwrap_err();
        assert!(matches!(err, GovmError::Decompress { .. }));
    }

    #[test]
    fn required_tools_per_backend() {
        assert!(backend_for(BackendKind::Native).required_tools().is_empty());
        assert_eq!(backend_for(BackendKind::System).required_tools(), &["wget", "gzip", "tar"]);
    }
}
