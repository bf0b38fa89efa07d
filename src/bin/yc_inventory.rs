//! Ansible dynamic inventory for Yandex Cloud.
//!
//! Prints the inventory JSON to stdout. On failure prints the error to
//! stderr, prints nothing to stdout, and exits with code 1.

use std::ffi::OsString;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;

use devops_info_service::inventory::{render, InventoryConfig, Mode, SystemCommand, YcCli};
use devops_info_service::utils::init_logging;

/// Ansible dynamic inventory built from `yc compute instance list`.
///
/// Reads YC_FOLDER_ID (folder to list) and YC_BIN (CLI binary, default "yc").
/// Any argument list other than `--list` or `--host [NAME]` prints an empty
/// inventory.
#[derive(Parser, Debug)]
#[command(name = "yc-inventory")]
#[command(version)]
struct Args {
    /// Print the full inventory.
    #[arg(long, conflicts_with = "host")]
    list: bool,

    /// Print variables for a single host.
    #[arg(long, value_name = "NAME", num_args = 0..=1, default_missing_value = "")]
    host: Option<String>,
}

impl Args {
    fn mode(self) -> Mode {
        match (self.list, self.host) {
            (true, _) => Mode::List,
            (false, Some(name)) => Mode::Host(name),
            (false, None) => Mode::Empty,
        }
    }
}

/// Resolve the invocation mode. Help and version still print and exit;
/// every other parse failure falls back to the empty inventory.
fn mode_from_args<I, T>(args: I) -> Mode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Args::try_parse_from(args) {
        Ok(args) => args.mode(),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(_) => Mode::Empty,
    }
}

fn main() -> ExitCode {
    let mode = mode_from_args(std::env::args_os());

    let directive = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    init_logging(&directive);

    match run(mode) {
        Ok(document) => {
            println!("{}", document);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(1)
        }
    }
}

fn run(mode: Mode) -> devops_info_service::Result<String> {
    let config = InventoryConfig::load()?;
    let cli = YcCli::new(SystemCommand, &config);
    Ok(render(&mode, &cli)?)
}
