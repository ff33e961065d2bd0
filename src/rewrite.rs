//! Ordered composition of rewrite rules over one in-memory text.

use crate::catalog::BUILTIN_RULES;
use crate::errors::PatchError;
use crate::rule::{CompiledRule, RewriteRule, RuleOutcome};
use std::borrow::Cow;
use tracing::debug;

/// Final text of a rewrite pass together with one outcome per rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    pub text: String,
    /// Outcomes in rule order
    pub outcomes: Vec<RuleOutcome>,
}

impl Rewritten {
    /// Total number of replacements across all rules.
    pub fn replacements(&self) -> usize {
        self.outcomes.iter().map(RuleOutcome::replacements).sum()
    }

    pub fn changed(&self) -> bool {
        self.replacements() > 0
    }
}

/// Compiled rules applied in sequence: rule N sees the output of rules 0..N.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    pub fn compile(rules: &[RewriteRule]) -> Result<Self, PatchError> {
        let rules = rules
            .iter()
            .map(RewriteRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// The rules shipped in [`crate::catalog`].
    pub fn builtin() -> Result<Self, PatchError> {
        Self::compile(&BUILTIN_RULES)
    }

    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rewrite(&self, source: &str) -> Rewritten {
        let mut text = source.to_string();
        let mut outcomes = Vec::with_capacity(self.rules.len());

        for rule in &self.rules {
            let (next, outcome) = rule.apply(&text);
            debug!(rule = rule.id(), replacements = outcome.replacements(), "{outcome}");
            // Borrowed means nothing matched.
            let next = match next {
                Cow::Owned(next) => Some(next),
                Cow::Borrowed(_) => None,
            };
            if let Some(next) = next {
                text = next;
            }
            outcomes.push(outcome);
        }

        Rewritten { text, outcomes }
    }

    /// Ids of rules whose replacement re-matches their own pattern.
    pub fn unstable_rules(&self) -> Vec<&'static str> {
        self.rules
            .iter()
            .filter(|rule| !rule.is_stable())
            .map(CompiledRule::id)
            .collect()
    }
}
