//! Standalone validator for record data directories.
//!
//! Checks every record file under the data directory against the shapes the
//! profile command expects, so malformed writes are caught before a lookup
//! fails in Discord.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use citizen_profile_bot::records::RecordKind;

/// Record data validator.
#[derive(Parser, Debug)]
#[command(name = "validate_records")]
#[command(about = "Validates record data files for the citizen profile bot")]
#[command(version)]
struct Args {
    /// Directory holding the kind-specific record directories.
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Validate a single record kind (vehicles, police-records, licenses, tickets).
    #[arg(short, long)]
    kind: Option<RecordKind>,

    /// Show every file checked, not just problems.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let kinds: Vec<RecordKind> = match args.kind {
        Some(kind) => vec![kind],
        None => RecordKind::ALL.to_vec(),
    };

    validate_data_dir(&args.data_dir, &kinds, args.verbose)
}

/// Running totals across all checked directories.
#[derive(Debug, Default)]
struct Report {
    files: usize,
    records: usize,
    errors: usize,
    warnings: usize,
}

fn validate_data_dir(data_dir: &Path, kinds: &[RecordKind], verbose: bool) -> ExitCode {
    println!("Validating: {}\n", data_dir.display());

    if !data_dir.is_dir() {
        eprintln!("✗ Data directory not found: {}", data_dir.display());
        return ExitCode::FAILURE;
    }

    let mut report = Report::default();

    for &kind in kinds {
        validate_kind_dir(data_dir, kind, verbose, &mut report);
    }

    println!();

    if report.errors == 0 {
        println!(
            "✓ All {} record file(s) are valid! ({} records)",
            report.files, report.records
        );
        if report.warnings > 0 {
            println!("  ({} warning(s))", report.warnings);
        }
        ExitCode::SUCCESS
    } else {
        let valid = report.files.saturating_sub(report.errors);
        println!(
            "✗ Validation failed: {} error(s) in {} file(s)",
            report.errors, report.files
        );
        println!("  Valid: {valid}/{}", report.files);
        ExitCode::FAILURE
    }
}

fn validate_kind_dir(data_dir: &Path, kind: RecordKind, verbose: bool, report: &mut Report) {
    let dir = data_dir.join(kind.dir_name());

    if !dir.is_dir() {
        report.warnings += 1;
        println!("⚠ Missing directory: {} ({kind})", dir.display());
        return;
    }

    let entries = match std::fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) => {
            report.errors += 1;
            println!("✗ Failed to list {}: {e}", dir.display());
            return;
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    for path in paths {
        report.files += 1;

        if !has_numeric_stem(&path) {
            report.warnings += 1;
            println!(
                "⚠ {}: file name is not a user ID, lookups will never read it",
                path.display()
            );
        }

        match kind.parse_file(&path) {
            Ok(count) => {
                report.records += count;
                if verbose {
                    println!("✓ {} ({count} record(s))", path.display());
                }
            }
            Err(e) => {
                report.errors += 1;
                println!("✗ {e}");
            }
        }
    }
}

/// True when the file stem looks like a Discord user ID.
fn has_numeric_stem(path: &Path) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| !stem.is_empty() && stem.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_file(dir: &Path, name: &str, content: &str) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_has_numeric_stem() {
        assert!(has_numeric_stem(Path::new("data/tickets/42.json")));
        assert!(!has_numeric_stem(Path::new("data/tickets/backup.json")));
        assert!(!has_numeric_stem(Path::new("data/tickets/42-old.json")));
    }

    #[test]
    fn test_validate_kind_dir_counts_files_and_records() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("tickets");
        write_file(
            &dir,
            "42.json",
            r#"[{"offense":"Speeding","price":100,"count":1,"date":0}]"#,
        );
        write_file(&dir, "43.json", "[]");
        write_file(&dir, "notes.txt", "not a record file");

        let mut report = Report::default();
        validate_kind_dir(root.path(), RecordKind::Tickets, false, &mut report);

        assert_eq!(report.files, 2);
        assert_eq!(report.records, 1);
        assert_eq!(report.errors, 0);
        assert_eq!(report.warnings, 0);
    }

    #[test]
    fn test_validate_kind_dir_flags_bad_json_and_odd_names() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("licenses");
        write_file(&dir, "42.json", "{ not valid json");
        write_file(&dir, "backup.json", "[]");

        let mut report = Report::default();
        validate_kind_dir(root.path(), RecordKind::Licenses, false, &mut report);

        assert_eq!(report.files, 2);
        assert_eq!(report.errors, 1);
        assert_eq!(report.warnings, 1);
    }

    #[test]
    fn test_validate_kind_dir_missing_directory_warns() {
        let root = tempfile::tempdir().unwrap();

        let mut report = Report::default();
        validate_kind_dir(root.path(), RecordKind::Vehicles, false, &mut report);

        assert_eq!(report.files, 0);
        assert_eq!(report.errors, 0);
        assert_eq!(report.warnings, 1);
    }
}
