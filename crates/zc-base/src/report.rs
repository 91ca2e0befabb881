//! Plain text report of an analyzed tree.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::constants::{REPORT_FILE_PREFIX, REPORT_RULE_WIDTH, ZIP_EXTENSION};
use crate::tree::{FileEntry, walk};

/// Render the report for `display_name`.
///
/// Pure function of its inputs: no timestamps, no randomness. One line per
/// entry, pre-order, two spaces of indent per depth level.
pub fn format_report(display_name: &str, entries: &[FileEntry]) -> String {
    let rule = "=".repeat(REPORT_RULE_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "AI Project Cleaner Analysis Report for: {}", display_name);
    out.push('\n');
    let _ = writeln!(out, "{}", rule);
    out.push('\n');

    walk(entries, &mut |entry, depth| {
        let _ = writeln!(
            out,
            "{}- [{}] {} ({})",
            "  ".repeat(depth),
            entry.decision.label(),
            entry.name,
            entry.rationale
        );
    });

    out.push('\n');
    let _ = writeln!(out, "{}", rule);
    out
}

/// `analysis_report_<name without .zip>.txt`
pub fn report_file_name(file_name: &str) -> String {
    format!("{}{}.txt", REPORT_FILE_PREFIX, strip_zip_extension(file_name))
}

/// Drop a trailing `.zip` (any case).
pub fn strip_zip_extension(file_name: &str) -> &str {
    let split = file_name.len().saturating_sub(ZIP_EXTENSION.len());
    match (file_name.get(..split), file_name.get(split..)) {
        (Some(base), Some(ext)) if ext.eq_ignore_ascii_case(ZIP_EXTENSION) => base,
        _ => file_name,
    }
}

/// Write the report for `file_name` into `dir`, creating `dir` if needed.
/// Returns the written path.
pub fn write_report(dir: &Path, file_name: &str, entries: &[FileEntry]) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(report_file_name(file_name));
    fs::write(&path, format_report(file_name, entries))?;
    tracing::info!(path = %path.display(), "report written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Decision;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample() -> Vec<FileEntry> {
        vec![
            FileEntry::file("package.json", Decision::Keep, "Core manifest."),
            FileEntry::folder(
                "src",
                Decision::Keep,
                "Application source.",
                vec![FileEntry::folder(
                    "components",
                    Decision::Keep,
                    "UI parts.",
                    vec![FileEntry::file("Demo.tsx", Decision::Delete, "Boilerplate demo.")],
                )],
            ),
            FileEntry::folder("dist", Decision::Delete, "Build output.", vec![]),
        ]
    }

    #[test]
    fn test_golden_report() {
        let expected = "\
AI Project Cleaner Analysis Report for: my-app.zip

========================================

- [KEEP] package.json (Core manifest.)
- [KEEP] src (Application source.)
  - [KEEP] components (UI parts.)
    - [DELETE] Demo.tsx (Boilerplate demo.)
- [DELETE] dist (Build output.)

========================================
";
        assert_eq!(format_report("my-app.zip", &sample()), expected);
    }

    #[test]
    fn test_header_names_the_app() {
        let report = format_report("shop.zip", &[]);
        assert_eq!(report.lines().next(), Some("AI Project Cleaner Analysis Report for: shop.zip"));
    }

    #[test]
    fn test_report_is_deterministic() {
        let tree = sample();
        assert_eq!(format_report("a.zip", &tree), format_report("a.zip", &tree));
    }

    #[test]
    fn test_depth_two_indent() {
        let report = format_report("a.zip", &sample());
        let line = report.lines().find(|l| l.contains("Demo.tsx")).unwrap();
        assert!(line.starts_with("    - "));
        assert!(!line.starts_with("     "));
    }

    #[test]
    fn test_empty_folder_has_no_child_lines() {
        let tree = vec![FileEntry::folder("empty", Decision::Delete, "Nothing inside.", vec![])];
        let report = format_report("a.zip", &tree);
        let body: Vec<&str> = report.lines().filter(|l| l.trim_start().starts_with("- ")).collect();
        assert_eq!(body, vec!["- [DELETE] empty (Nothing inside.)"]);
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(report_file_name("my-app.zip"), "analysis_report_my-app.txt");
        assert_eq!(report_file_name("Project.ZIP"), "analysis_report_Project.txt");
        assert_eq!(report_file_name("archive"), "analysis_report_archive.txt");
        assert_eq!(report_file_name("a.zip.zip"), "analysis_report_a.zip.txt");
    }

    #[test]
    fn test_strip_zip_extension_multibyte() {
        assert_eq!(strip_zip_extension("проект.zip"), "проект");
        assert_eq!(strip_zip_extension("zé"), "zé");
    }

    #[test]
    fn test_write_report() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("reports");
        let path = write_report(&dir, "my-app.zip", &sample()).unwrap();
        assert_eq!(path.file_name().unwrap(), "analysis_report_my-app.txt");
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content, format_report("my-app.zip", &sample()));
    }
}
