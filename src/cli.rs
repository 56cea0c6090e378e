use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use std::ffi::OsString;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    version,
    name = "govm",
    about = "Go Version Manager: download, cache and switch Go toolchains",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Create the govm directories and seed the known-versions list
    Init,
    /// Show known versions marked current / installed / not installed
    List,
    /// Fetch and unpack a Go release into the versions cache (no-op if cached)
    Download {
        /// Go version, e.g. 1.21.5
        #[arg(value_name = "VERSION")]
        version: String,
    },
    /// Download if needed, then point the current toolchain link at VERSION
    Use {
        /// Go version, e.g. 1.21.5
        #[arg(value_name = "VERSION")]
        version: String,
    },
}

/// Parse `args` (program name first). `-help` is accepted as `--help`.
pub fn try_parse_from<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args = args.into_iter().map(|a| {
        let a: OsString = a.into();
        if a.to_str() == Some("-help") {
            OsString::from("--help")
        } else {
            a
        }
    });
    Cli::try_parse_from(args)
}

/// Print a parse failure the way the user expects and pick the exit code:
/// help/version succeed, everything else exits 1. Unknown commands also get
/// the full help text.
pub fn report_parse_error(err: &clap::Error) -> ExitCode {
    let _ = err.print();
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
        ErrorKind::InvalidSubcommand => {
            eprintln!();
            let _ = Cli::command().write_help(&mut std::io::stderr());
            ExitCode::FAILURE
        }
        _ => ExitCode::FAILURE,
    }
}
