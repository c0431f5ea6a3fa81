use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use astgen::CapabilityIssue;
use astgen::report::{format_reports, reports, warnings};

/// Read input from file path or stdin.
/// - `None` or `Some("-")` reads from stdin
/// - `Some(path)` reads from file
pub fn read_input(file: Option<&str>) -> anyhow::Result<String> {
    match file {
        None | Some("-") => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Error reading from stdin")?;
            Ok(buffer)
        }
        Some(path) => fs::read_to_string(path).with_context(|| format!("Error reading {path}")),
    }
}

/// Helper to get display path for error messages
pub fn display_path(file: Option<&str>) -> &str {
    match file {
        None | Some("-") => "<stdin>",
        Some(path) => path,
    }
}

/// Directory the project config search starts from.
pub fn search_dir(file: Option<&str>) -> PathBuf {
    match file {
        None | Some("-") => PathBuf::from("."),
        Some(path) => match Path::new(path).parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        },
    }
}

/// Print annotated reports for a generation error and exit.
pub fn exit_with_error(error: &astgen::Error, source: &str, file: Option<&str>) -> ! {
    let styled = io::stderr().is_terminal();
    eprintln!(
        "{}",
        format_reports(source, display_path(file), &reports(error), styled)
    );
    eprintln!("Error: {error}");
    std::process::exit(1);
}

/// Print annotated warnings for issues that don't stop generation.
pub fn print_warnings(issues: &[CapabilityIssue], source: &str, file: Option<&str>) {
    if issues.is_empty() {
        return;
    }
    let styled = io::stderr().is_terminal();
    eprintln!(
        "{}",
        format_reports(source, display_path(file), &warnings(issues), styled)
    );
}

/// Print an error chain and exit.
pub fn exit_with(error: anyhow::Error) -> ! {
    eprintln!("Error: {error:#}");
    std::process::exit(1);
}
