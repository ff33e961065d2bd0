//! File-level driver: read the target, run the rule set, write it back.
//!
//! The write is a plain truncate-and-overwrite of the original path. There is
//! no temp file or rename, so the file keeps its inode and permissions.

use crate::errors::PatchError;
use crate::rewrite::RuleSet;
use crate::rule::{RewriteRule, RuleOutcome};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Result of patching (or previewing) one file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "PatchReport should be checked for per-rule outcomes"]
pub struct PatchReport {
    pub file: PathBuf,
    pub original: String,
    pub patched: String,
    /// One entry per rule, in application order
    pub outcomes: Vec<RuleOutcome>,
    /// False for previews
    pub written: bool,
}

impl PatchReport {
    pub fn changed(&self) -> bool {
        self.original != self.patched
    }

    pub fn replacements(&self) -> usize {
        self.outcomes.iter().map(RuleOutcome::replacements).sum()
    }

    /// Rules whose pattern was not found and whose replacement is absent.
    pub fn unmatched(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, RuleOutcome::NoMatch { .. }))
            .map(RuleOutcome::id)
    }
}

impl fmt::Display for PatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.written { "patched" } else { "would patch" };
        write!(
            f,
            "{} {} ({} replacements)",
            verb,
            self.file.display(),
            self.replacements()
        )
    }
}

#[derive(Debug, Clone)]
pub struct Patcher {
    rules: RuleSet,
}

impl Patcher {
    /// Patcher with the built-in rules from [`crate::catalog`].
    pub fn new() -> Result<Self, PatchError> {
        Ok(Self {
            rules: RuleSet::builtin()?,
        })
    }

    /// Patcher with an explicit ordered rule list.
    pub fn with_rules(rules: &[RewriteRule]) -> Result<Self, PatchError> {
        Ok(Self {
            rules: RuleSet::compile(rules)?,
        })
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Rewrite `path` in place.
    ///
    /// The file is written even when no rule matched.
    pub fn run(&self, path: impl AsRef<Path>) -> Result<PatchReport, PatchError> {
        let mut report = self.preview(path)?;

        fs::write(&report.file, report.patched.as_bytes()).map_err(|source| {
            PatchError::Write {
                path: report.file.clone(),
                source,
            }
        })?;
        info!(
            file = %report.file.display(),
            bytes = report.patched.len(),
            "wrote patched file"
        );

        report.written = true;
        Ok(report)
    }

    /// Compute the rewrite for `path` without touching the file.
    pub fn preview(&self, path: impl AsRef<Path>) -> Result<PatchReport, PatchError> {
        let file = path.as_ref().to_path_buf();
        let original = read_source(&file)?;

        let rewritten = self.rules.rewrite(&original);

        Ok(PatchReport {
            file,
            original,
            patched: rewritten.text,
            outcomes: rewritten.outcomes,
            written: false,
        })
    }
}

fn read_source(path: &Path) -> Result<String, PatchError> {
    let bytes = fs::read(path).map_err(|source| PatchError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    info!(file = %path.display(), bytes = bytes.len(), "read source");

    String::from_utf8(bytes).map_err(|source| PatchError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    const SAMPLE: &str =
        "<span>{getExerciseById(activeExercise)?.exercise.prompts?.length}</span>\n";

    #[test]
    fn test_run_rewrites_file_in_place() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("CBTExercises.tsx");
        fs::write(&file_path, SAMPLE).unwrap();

        let report = Patcher::new().unwrap().run(&file_path).unwrap();

        assert!(report.written);
        assert!(report.changed());
        assert_eq!(report.replacements(), 1);
        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, report.patched);
        assert!(content.contains("as JournalingExercise).prompts.length : 0)"));
    }

    #[test]
    fn test_preview_leaves_file_untouched() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("CBTExercises.tsx");
        fs::write(&file_path, SAMPLE).unwrap();

        let report = Patcher::new().unwrap().preview(&file_path).unwrap();

        assert!(!report.written);
        assert!(report.changed());
        assert_eq!(fs::read_to_string(&file_path).unwrap(), SAMPLE);
        assert!(report.to_string().starts_with("would patch"));
    }

    #[test]
    fn test_unmatched_rules_listed() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("CBTExercises.tsx");
        fs::write(&file_path, SAMPLE).unwrap();

        let report = Patcher::new().unwrap().preview(&file_path).unwrap();
        let unmatched: Vec<_> = report.unmatched().collect();
        assert_eq!(
            unmatched,
            vec![
                "journal-prompt-step",
                "game-type-color-focus",
                "game-type-memory-sequence",
                "shared-instructions",
            ]
        );
    }

    #[test]
    fn test_run_without_matches_still_succeeds() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("Other.tsx");
        fs::write(&file_path, "export const x = 1;\n").unwrap();

        let report = Patcher::new().unwrap().run(&file_path).unwrap();
        assert!(!report.changed());
        assert_eq!(report.replacements(), 0);
        assert_eq!(
            fs::read_to_string(&file_path).unwrap(),
            "export const x = 1;\n"
        );
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = Patcher::new()
            .unwrap()
            .run(temp_dir.path().join("absent.tsx"))
            .unwrap_err();
        assert!(matches!(err, PatchError::Read { .. }));
        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
    }

    #[test]
    fn test_invalid_utf8_is_decode_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("binary.tsx");
        fs::write(&file_path, [0x66, 0x6f, 0xff, 0x6f]).unwrap();

        let err = Patcher::new().unwrap().run(&file_path).unwrap_err();
        assert!(matches!(err, PatchError::Decode { .. }));
        assert_eq!(fs::read(&file_path).unwrap(), vec![0x66, 0x6f, 0xff, 0x6f]);
    }

    #[test]
    fn test_custom_rules() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("a.txt");
        fs::write(&file_path, "one two").unwrap();

        let patcher = Patcher::with_rules(&[RewriteRule {
            id: "two",
            description: "test rule",
            pattern: r"\btwo\b",
            replacement: "2",
        }])
        .unwrap();
        assert_eq!(patcher.rules().len(), 1);

        let report = patcher.run(&file_path).unwrap();
        assert_eq!(report.patched, "one 2");
        assert!(report.to_string().starts_with("patched"));
    }
}
