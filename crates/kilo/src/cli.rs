#![forbid(unsafe_code)]

//! Command-line argument parsing.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.

use std::env;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
kilo — a small screen-oriented terminal text editor

USAGE:
    kilo [FILE]

ARGS:
    FILE    Path of the file to view; omit to start with an empty document

OPTIONS:
    --help, -h       Show this help message
    --version, -V    Show version

KEYBINDINGS:
    Arrow keys       Move the cursor
    Home / End       Jump to start / end of line
    PgUp / PgDn      Move by one screen
    Ctrl-Q           Quit

ENVIRONMENT VARIABLES:
    KILO_LOG         Append structured logs to this file (never the terminal)
    RUST_LOG         Log filter, e.g. 'info' or 'kilo=debug'";

/// Parsed command-line options.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Opts {
    /// File to open; `None` starts an empty document.
    pub file: Option<String>,
}

impl Opts {
    /// Parse from `env::args`, exiting on `--help`, `--version`, or a usage
    /// error.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(env::args().skip(1))
    }

    fn parse_from<I: IntoIterator<Item = String>>(args: I) -> Self {
        let mut opts = Self::default();
        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => {
                    println!("{HELP_TEXT}");
                    process::exit(0);
                }
                "--version" | "-V" => {
                    println!("kilo {VERSION}");
                    process::exit(0);
                }
                _ if arg.starts_with('-') && arg.len() > 1 => {
                    eprintln!("unknown option: {arg}");
                    eprintln!("try 'kilo --help'");
                    process::exit(2);
                }
                _ => {
                    if opts.file.is_some() {
                        eprintln!("expected at most one FILE argument");
                        eprintln!("try 'kilo --help'");
                        process::exit(2);
                    }
                    opts.file = Some(arg);
                }
            }
        }
        opts
    }
}
