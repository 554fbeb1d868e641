//! CLI module for qqwry-rs
//!
//! This module handles command line argument parsing and query logic.

pub mod formatter;

use crate::config::AppConfig;
use crate::database::{DatabaseManager, QQwryDatabase};
use crate::error::Result;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "qqwry")]
#[command(version, about = "Look up IPv4 addresses in the QQWry (cz88.net) database")]
#[command(long_about = "qqwry looks up IPv4 addresses in a local QQWry database.\n\n\
    Addresses are read from the command line, from files, or from standard input.\n\n\
    Examples:\n  \
    $ qqwry 1.2.3.4 8.8.8.8\n  \
    $ qqwry --query-file ips.txt\n  \
    $ cat ips.txt | qqwry --json\n  \
    $ qqwry --dump -o ip.txt")]
pub struct Cli {
    /// IPv4 addresses to look up (read from stdin when none are given)
    #[arg(value_name = "IP")]
    pub queries: Vec<String>,

    /// IPv4 addresses to look up, same as the positional form
    #[arg(short = 'q', long = "query", value_name = "IP", num_args = 1..)]
    pub query_args: Vec<String>,

    /// Look up addresses from files, one per line
    #[arg(long = "query-file", value_name = "FILE", num_args = 1.., conflicts_with_all = ["queries", "query_args"])]
    pub query_files: Vec<PathBuf>,

    /// Dump every range in the database to a text file
    #[arg(long, conflicts_with_all = ["queries", "query_args", "query_files"])]
    pub dump: bool,

    /// Output file for --dump
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path of qqwry.dat
    #[arg(short = 'f', long = "dbpath", value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Do not print the database version banner
    #[arg(long)]
    pub quiet: bool,

    /// Output JSON, one object per line
    #[arg(short, long)]
    pub json: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Addresses given on the command line, positional and `-q` alike
    pub fn addresses(&self) -> impl Iterator<Item = &str> {
        self.queries
            .iter()
            .chain(self.query_args.iter())
            .map(String::as_str)
    }

    /// Default log filter; `RUST_LOG` still overrides it
    pub fn log_level(&self, config: &AppConfig) -> &'static str {
        if self.verbose || config.global.verbose {
            "debug"
        } else {
            "warn"
        }
    }

    /// Fold command line options into the loaded configuration
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(path) = &self.db_path {
            config.database.path = Some(path.to_string_lossy().into_owned());
        }
        if let Some(output) = &self.output {
            config.output.dump_file = output.to_string_lossy().into_owned();
        }
        if self.json {
            config.output.json = true;
        }
        if self.quiet {
            config.global.quiet = true;
        }
        if !atty::is(atty::Stream::Stdout) {
            config.output.enable_colors = false;
        }
    }

    pub fn run(&self, mut config: AppConfig) -> Result<()> {
        self.apply(&mut config);

        let manager = DatabaseManager::new(config.clone());
        let db = manager.handle()?;

        let stdout = io::stdout();
        let mut out = stdout.lock();

        if !config.global.quiet && !config.output.json {
            print_banner(&db, &mut out)?;
        }

        if self.dump {
            return dump_to_file(&db, &config, &mut out);
        }

        if self.addresses().next().is_some() {
            for query in self.addresses() {
                query_and_print(&db, query, &config, &mut out)?;
            }
        } else if !self.query_files.is_empty() {
            for path in &self.query_files {
                log::debug!("Reading addresses from {}", path.display());
                let reader = BufReader::new(File::open(path)?);
                process_lines(&db, reader, &config, &mut out)?;
            }
        } else {
            self.process_stdin(&db, &config, &mut out)?;
        }

        Ok(())
    }

    /// Query from stdin (interactive or pipe mode)
    fn process_stdin<W: Write>(&self, db: &QQwryDatabase, config: &AppConfig, out: &mut W) -> Result<()> {
        let stdin = io::stdin();

        if atty::is(atty::Stream::Stdin) {
            writeln!(out, "qqwry interactive mode (type quit or Ctrl+D to exit)")?;
            out.flush()?;

            for line in stdin.lock().lines() {
                let line = line?;
                let trimmed = line.trim();

                if trimmed.is_empty() {
                    continue;
                }
                if trimmed == "quit" || trimmed == "exit" {
                    break;
                }

                query_and_print(db, trimmed, config, out)?;
                out.flush()?;
            }
            Ok(())
        } else {
            process_lines(db, stdin.lock(), config, out)
        }
    }
}

/// Print the version banner
///
/// A corrupt version record is reported on stderr; lookups still run.
pub fn print_banner<W: Write>(db: &QQwryDatabase, out: &mut W) -> Result<()> {
    match db.version() {
        Ok(version) => {
            writeln!(out, "{}", formatter::format_banner(&version, db.total_entries()))?;
        }
        Err(e) => {
            eprintln!("Failed to read database version: {}", e);
        }
    }
    Ok(())
}

/// Look up every non-empty line of `reader`
pub fn process_lines<R: BufRead, W: Write>(
    db: &QQwryDatabase,
    reader: R,
    config: &AppConfig,
    out: &mut W,
) -> Result<()> {
    for line in reader.lines() {
        let line = line?;
        let ip = line.trim();
        if ip.is_empty() {
            continue;
        }
        query_and_print(db, ip, config, out)?;
    }
    Ok(())
}

/// Query and print a single address
///
/// Lookup failures are reported on stderr so a batch keeps going.
pub fn query_and_print<W: Write>(
    db: &QQwryDatabase,
    ip: &str,
    config: &AppConfig,
    out: &mut W,
) -> Result<()> {
    match db.query(ip) {
        Ok((area, detail)) => {
            let line = if config.output.json {
                formatter::format_json(ip, &area, &detail)?
            } else {
                formatter::format_text(ip, &area, &detail, config.output.enable_colors)
            };
            writeln!(out, "{}", line)?;
        }
        Err(e) => {
            eprintln!("Query failed: {}", e);
        }
    }
    Ok(())
}

/// Write the whole database to the configured dump file
fn dump_to_file<W: Write>(db: &QQwryDatabase, config: &AppConfig, out: &mut W) -> Result<()> {
    let path = PathBuf::from(&config.output.dump_file);
    writeln!(out, "dumping to {} ...", path.display())?;

    let file = File::create(&path)?;
    let lines = db.export(BufWriter::new(file))?;

    log::info!("Dumped {} ranges to {}", lines, path.display());
    writeln!(out, "{} ranges written", lines)?;
    Ok(())
}
