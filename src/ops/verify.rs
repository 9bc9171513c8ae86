//! Implementation of `sigwire verify`.
//!
//! Checks that the support files in a generated token-service directory are
//! byte-identical to the bundled templates. Files are compared by SHA-256.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use serde::Serialize;

use crate::auth::SUPPORT_FILES;
use crate::util::hash::sha256_file;

/// Outcome of checking one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum FileStatus {
    /// Identical to the template
    Ok,
    /// Not present
    Missing,
    /// Present with different contents
    Modified { expected: String, actual: String },
}

/// Check result for one support file.
#[derive(Debug, Clone, Serialize)]
pub struct FileCheck {
    pub path: PathBuf,
    pub template: &'static str,
    #[serde(flatten)]
    pub status: FileStatus,
}

/// Result of verifying a directory.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    pub dir: PathBuf,
    pub files: Vec<FileCheck>,
}

impl VerifyReport {
    /// Check whether every file matched.
    pub fn passed(&self) -> bool {
        self.files.iter().all(|f| f.status == FileStatus::Ok)
    }

    /// Get the files that did not match.
    pub fn failures(&self) -> impl Iterator<Item = &FileCheck> + '_ {
        self.files.iter().filter(|f| f.status != FileStatus::Ok)
    }
}

/// Verify the support files in `dir` against the bundled templates.
pub fn verify_assets(dir: &Path) -> Result<VerifyReport> {
    if !dir.is_dir() {
        bail!("not a directory: {}", dir.display());
    }

    let mut files = Vec::new();
    for support in &SUPPORT_FILES {
        let path = dir.join(support.path);
        let status = if !path.is_file() {
            FileStatus::Missing
        } else {
            let expected = support.sha256();
            let actual = sha256_file(&path)?;
            if actual == expected {
                FileStatus::Ok
            } else {
                FileStatus::Modified { expected, actual }
            }
        };

        tracing::debug!("{}: {:?}", path.display(), status);
        files.push(FileCheck {
            path,
            template: support.template,
            status,
        });
    }

    Ok(VerifyReport {
        dir: dir.to_path_buf(),
        files,
    })
}

/// Format a report for terminal output.
pub fn format_report(report: &VerifyReport) -> String {
    let mut out = String::new();

    for file in &report.files {
        let _ = match &file.status {
            FileStatus::Ok => writeln!(out, "  ok        {}", file.path.display()),
            FileStatus::Missing => writeln!(out, "  missing   {}", file.path.display()),
            FileStatus::Modified { expected, actual } => writeln!(
                out,
                "  modified  {} (expected {}, found {})",
                file.path.display(),
                &expected[..12],
                &actual[..12]
            ),
        };
    }

    let failed = report.failures().count();
    if failed == 0 {
        let _ = writeln!(out, "\nAll {} support files match.", report.files.len());
    } else {
        let _ = writeln!(
            out,
            "\n{} of {} support files differ from the bundled templates.",
            failed,
            report.files.len()
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_support_files(dir: &Path) {
        for file in &SUPPORT_FILES {
            std::fs::write(dir.join(file.path), file.contents).unwrap();
        }
    }

    #[test]
    fn test_verify_clean_directory() {
        let tmp = TempDir::new().unwrap();
        write_support_files(tmp.path());

        let report = verify_assets(tmp.path()).unwrap();
        assert!(report.passed());
        assert_eq!(report.files.len(), 2);
        assert!(format_report(&report).contains("All 2 support files match."));
    }

    #[test]
    fn test_verify_detects_modification() {
        let tmp = TempDir::new().unwrap();
        write_support_files(tmp.path());
        std::fs::write(tmp.path().join("defaultRoleAssumers.ts"), "// edited\n").unwrap();

        let report = verify_assets(tmp.path()).unwrap();
        assert!(!report.passed());

        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures.len(), 1);
        assert!(matches!(failures[0].status, FileStatus::Modified { .. }));
        assert!(format_report(&report).contains("modified"));
    }

    #[test]
    fn test_verify_detects_missing() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("defaultRoleAssumers.ts"),
            SUPPORT_FILES[0].contents,
        )
        .unwrap();

        let report = verify_assets(tmp.path()).unwrap();
        assert_eq!(report.files[0].status, FileStatus::Ok);
        assert_eq!(report.files[1].status, FileStatus::Missing);
    }

    #[test]
    fn test_verify_requires_directory() {
        let tmp = TempDir::new().unwrap();
        assert!(verify_assets(&tmp.path().join("nope")).is_err());
    }

    #[test]
    fn test_report_json() {
        let tmp = TempDir::new().unwrap();
        let report = verify_assets(tmp.path()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["files"][0]["status"], "missing");
        assert_eq!(json["files"][0]["template"], "sts-client-defaultRoleAssumers.ts");
    }
}
