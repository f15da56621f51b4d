//! Command-line checker for WADL documents.
//!
//! Parses each file, reports the first error with its location and element
//! path, and optionally re-serializes the document or lists the URI
//! patterns its resources would be attached at.

use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use wadloxide::reader::{parse_str_with_options, ReadOptions, UnknownElementPolicy};
use wadloxide::router::{mount_path, resolve_routes};
use wadloxide::serial::{to_string, WriteOptions};
use wadloxide::ApplicationInfo;

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// wadllint -- parse, check, and rewrite WADL files.
#[derive(Parser, Debug)]
#[command(name = "wadllint", version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// WADL files to process (use `-` for stdin).
    #[arg(required = true)]
    files: Vec<String>,

    /// Print additional information during processing.
    #[arg(long)]
    verbose: bool,

    // -- Parsing options ---------------------------------------------------
    /// Reject elements outside the WADL vocabulary instead of skipping them.
    #[arg(long)]
    strict: bool,

    /// Maximum element nesting depth.
    #[arg(long, value_name = "N", default_value_t = 256)]
    max_depth: u32,

    // -- Output options ----------------------------------------------------
    /// Do not output the re-serialized document.
    #[arg(long)]
    noout: bool,

    /// Reformat the output, indenting element-only content.
    #[arg(long)]
    format: bool,

    /// Omit the `xml-stylesheet` processing instruction.
    #[arg(long)]
    nostylesheet: bool,

    /// Print the absolute URI pattern and identifier of each resource.
    #[arg(long)]
    routes: bool,

    /// Print the namespace declarations of the document.
    #[arg(long)]
    namespaces: bool,

    /// Save output to the given file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<String>,

    /// Print timing information for parsing and processing.
    #[arg(long)]
    timing: bool,
}

// ---------------------------------------------------------------------------
// Exit codes
// ---------------------------------------------------------------------------

const EXIT_SUCCESS: u8 = 0;
const EXIT_READ_ERROR: u8 = 1;
const EXIT_PARSE_ERROR: u8 = 2;

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut worst_exit: u8 = EXIT_SUCCESS;
    for file in &cli.files {
        let exit = process_file(&cli, file);
        if exit > worst_exit {
            worst_exit = exit;
        }
    }

    ExitCode::from(worst_exit)
}

/// Processes a single input file and returns an exit code.
fn process_file(cli: &Cli, filename: &str) -> u8 {
    let start_read = Instant::now();
    let input = match read_input(filename) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("{filename}: failed to read: {e}");
            return EXIT_READ_ERROR;
        }
    };
    if cli.timing {
        let elapsed = start_read.elapsed();
        eprintln!("Reading file {filename} took {elapsed:?}");
    }

    let start_parse = Instant::now();
    let app = match parse_str_with_options(&input, &read_options(cli)) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("{filename}: {e}");
            return EXIT_PARSE_ERROR;
        }
    };
    if cli.timing {
        let elapsed = start_parse.elapsed();
        eprintln!("Parsing took {elapsed:?}");
    }
    log::info!("{filename}: parsed WADL application");

    let mut report = String::new();
    if cli.namespaces {
        report.push_str(&format_namespaces(&app));
    }
    if cli.routes {
        report.push_str(&format_routes(&app));
    }
    if !report.is_empty() {
        write_output(cli, &report);
    }

    if !cli.noout && !cli.routes && !cli.namespaces {
        let start_serial = Instant::now();
        let xml = to_string(&app, &write_options(cli));
        write_output(cli, &xml);
        if cli.timing {
            let elapsed = start_serial.elapsed();
            eprintln!("Serializing took {elapsed:?}");
        }
    }

    EXIT_SUCCESS
}

fn read_options(cli: &Cli) -> ReadOptions {
    let policy = if cli.strict {
        UnknownElementPolicy::Reject
    } else {
        UnknownElementPolicy::Ignore
    };
    ReadOptions::default()
        .max_depth(cli.max_depth)
        .unknown_elements(policy)
}

fn write_options(cli: &Cli) -> WriteOptions {
    let options = WriteOptions::default().indent(cli.format);
    if cli.nostylesheet {
        options.stylesheet(None)
    } else {
        options
    }
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// One `prefix = uri` line per namespace declaration.
fn format_namespaces(app: &ApplicationInfo) -> String {
    app.all_namespaces()
        .iter()
        .map(|(uri, prefix)| format!("{prefix} = {uri}\n"))
        .collect()
}

/// One `pattern<TAB>identifier` line per attachable resource, preceded by
/// the mount path when the resources declare a base.
fn format_routes(app: &ApplicationInfo) -> String {
    let Some(resources) = &app.resources else {
        return String::new();
    };
    let mut out = String::new();
    if let Some(mount) = mount_path(resources) {
        out.push_str(&format!("# mounted at {mount}\n"));
    }
    for route in resolve_routes(resources) {
        out.push_str(&format!("{}\t{}\n", route.pattern, route.identifier()));
    }
    out
}

// ---------------------------------------------------------------------------
// Input / output
// ---------------------------------------------------------------------------

/// Reads input from a file or stdin (when filename is `-`).
fn read_input(filename: &str) -> io::Result<String> {
    if filename == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(filename)
    }
}

/// Writes output to a file or stdout.
fn write_output(cli: &Cli, content: &str) {
    if let Some(ref output_file) = cli.output {
        if let Err(e) = fs::write(output_file, content) {
            eprintln!("{output_file}: failed to write: {e}");
        }
    } else {
        print!("{content}");
        let _ = io::stdout().flush();
    }
}
