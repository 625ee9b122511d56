//! CLI definitions and command routing.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::{parse_address, Settings};
use crate::error::{HostsError, EXIT_ERROR};
use crate::hosts;
use crate::line::Line;

#[derive(Parser)]
#[command(name = "hosts")]
#[command(about = "Parse, list and edit the hosts file")]
pub struct Cli {
    /// Hosts file to operate on [default: $HOSTS_FILE, config file, then the OS hosts file]
    #[arg(short, long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Append a host entry at the end of the hosts file
    #[command(visible_aliases = ["append", "a"])]
    Add {
        host: String,
        /// IP address for the host [default: 127.0.0.1 or config default_address]
        ip: Option<String>,
        /// Comment line written above the entry
        #[arg(short, long)]
        comment: Option<String>,
    },
    /// List host entries as "Host: <name>, IP: <address>"
    #[command(visible_aliases = ["l", "print", "p"])]
    List {
        /// Also print comment lines
        #[arg(long)]
        comments: bool,
    },
    /// Remove every entry for a host (all of its addresses)
    #[command(visible_aliases = ["r", "erase"])]
    Remove { host: String },
    /// Print the version
    Version,
}

/// Exit code for an error returned by [`run`].
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|e| e.downcast_ref::<HostsError>())
        .map_or(EXIT_ERROR, HostsError::exit_code)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Run CLI and dispatch to handlers.
pub fn run() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = Settings::from_env(cli.file)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&settings, cli.command, &mut out)
}

/// Run one command against the resolved settings, writing user output to `out`.
pub fn execute(settings: &Settings, command: Commands, out: &mut dyn Write) -> Result<()> {
    let path = settings.hosts_file.as_path();
    match command {
        Commands::Add { host, ip, comment } => {
            let address = match ip {
                Some(ip) => parse_address(&ip)?,
                None => settings.default_address,
            };
            hosts::add_host(path, &host, address, comment.as_deref())
                .with_context(|| format!("add {host} to {}", path.display()))?;
            writeln!(out, "Added host: {host} {address}")?;
            Ok(())
        }
        Commands::List { comments } => {
            hosts::list_hosts(path, comments, |line| print_line(out, line))
                .with_context(|| format!("list hosts in {}", path.display()))?;
            Ok(())
        }
        Commands::Remove { host } => {
            let removed = hosts::remove_host(path, &host)
                .with_context(|| format!("remove {host} from {}", path.display()))?;
            writeln!(out, "Removed host: {host} ({removed} entries)")?;
            Ok(())
        }
        Commands::Version => {
            writeln!(out, "{}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
    }
}

/// One output line per host name; aliases are listed as their own hosts.
fn print_line(out: &mut dyn Write, line: Line<'_>) -> io::Result<()> {
    match line {
        Line::Record(r) => {
            writeln!(out, "Host: {}, IP: {}", r.name(), r.address())?;
            for alias in r.aliases() {
                writeln!(out, "Host: {alias}, IP: {}", r.address())?;
            }
            Ok(())
        }
        Line::Comment(text) | Line::Invalid(text) => writeln!(out, "{text}"),
    }
}
