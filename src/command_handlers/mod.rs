use crate::config::Config;
use crate::fetch::ArchiveBackend;
use crate::platform::Platform;

pub mod dispatch;
pub mod download;
pub mod init;
pub mod list;
pub mod use_version;

/// Everything a command needs, validated once before dispatch.
pub struct Session {
    pub cfg: Config,
    pub platform: Platform,
    pub backend: Box<dyn ArchiveBackend>,
}
