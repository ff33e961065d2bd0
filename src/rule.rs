use crate::errors::PatchError;
use regex::{NoExpand, Regex};
use std::borrow::Cow;
use std::fmt;

/// A fixed pattern-and-replacement pair applied globally to text.
///
/// The replacement is inserted literally: `$` has no special meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteRule {
    /// Stable kebab-case identifier used in reports and logs
    pub id: &'static str,
    /// One-line summary of what the rewrite narrows
    pub description: &'static str,
    /// Regular expression (regex crate syntax)
    pub pattern: &'static str,
    /// Text substituted for every non-overlapping match
    pub replacement: &'static str,
}

impl RewriteRule {
    /// Compile the pattern.
    pub fn compile(&self) -> Result<CompiledRule, PatchError> {
        let regex = Regex::new(self.pattern).map_err(|source| PatchError::InvalidPattern {
            id: self.id,
            source,
        })?;
        Ok(CompiledRule { rule: *self, regex })
    }
}

/// Outcome of one rule over one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "RuleOutcome should be checked for applied/no-match"]
pub enum RuleOutcome {
    /// Pattern matched and every occurrence was replaced
    Applied {
        id: &'static str,
        replacements: usize,
    },
    /// Pattern is absent but the replacement text is already present
    AlreadyApplied { id: &'static str },
    /// Neither the pattern nor the replacement text was found
    NoMatch { id: &'static str },
}

impl RuleOutcome {
    pub fn id(&self) -> &'static str {
        match self {
            RuleOutcome::Applied { id, .. }
            | RuleOutcome::AlreadyApplied { id }
            | RuleOutcome::NoMatch { id } => id,
        }
    }

    pub fn replacements(&self) -> usize {
        match self {
            RuleOutcome::Applied { replacements, .. } => *replacements,
            _ => 0,
        }
    }
}

impl fmt::Display for RuleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleOutcome::Applied { id, replacements } => {
                let noun = if *replacements == 1 {
                    "occurrence"
                } else {
                    "occurrences"
                };
                write!(f, "{id}: rewrote {replacements} {noun}")
            }
            RuleOutcome::AlreadyApplied { id } => write!(f, "{id}: already applied"),
            RuleOutcome::NoMatch { id } => write!(f, "{id}: no match"),
        }
    }
}

/// A [`RewriteRule`] with its pattern compiled.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    rule: RewriteRule,
    regex: Regex,
}

impl CompiledRule {
    pub fn rule(&self) -> &RewriteRule {
        &self.rule
    }

    pub fn id(&self) -> &'static str {
        self.rule.id
    }

    /// Replace every non-overlapping match in `text`.
    ///
    /// Returns borrowed text when nothing matched.
    pub fn apply<'t>(&self, text: &'t str) -> (Cow<'t, str>, RuleOutcome) {
        let replacements = self.regex.find_iter(text).count();
        if replacements == 0 {
            let outcome = if text.contains(self.rule.replacement) {
                RuleOutcome::AlreadyApplied { id: self.rule.id }
            } else {
                RuleOutcome::NoMatch { id: self.rule.id }
            };
            return (Cow::Borrowed(text), outcome);
        }

        let rewritten = self.regex.replace_all(text, NoExpand(self.rule.replacement));
        (
            rewritten,
            RuleOutcome::Applied {
                id: self.rule.id,
                replacements,
            },
        )
    }

    /// True when the replacement text cannot be matched again by this rule's
    /// own pattern, so a second pass is a no-op.
    pub fn is_stable(&self) -> bool {
        !self.regex.is_match(self.rule.replacement)
    }
}
