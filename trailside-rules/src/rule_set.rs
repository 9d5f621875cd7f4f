//! Compiled rule collections.

use log::warn;
use trailside_core::Rule;

use crate::{Adaptation, Condition, RuleParseError};

/// A rule with its condition and adaptation parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledRule {
    rule: Rule,
    condition: Condition,
    adaptation: Adaptation,
}

impl CompiledRule {
    /// Parse both halves of `rule`.
    pub fn compile(rule: Rule) -> Result<Self, RuleParseError> {
        let condition = Condition::parse(&rule.condition)?;
        let adaptation = Adaptation::parse(&rule.adaptation)?;
        Ok(Self {
            rule,
            condition,
            adaptation,
        })
    }

    /// Source rule.
    pub const fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Parsed condition.
    pub const fn condition(&self) -> &Condition {
        &self.condition
    }

    /// Parsed adaptation.
    pub const fn adaptation(&self) -> &Adaptation {
        &self.adaptation
    }
}

/// Rules compiled once and shared read-only for the engine's lifetime.
///
/// Rules that fail to parse are dropped with a warning and never fire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
    rejected: Vec<String>,
}

impl RuleSet {
    /// Compile `rules`, keeping their order.
    pub fn compile<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = Rule>,
    {
        let mut set = Self::default();
        for rule in rules {
            let description = rule.description.clone();
            match CompiledRule::compile(rule) {
                Ok(compiled) => set.rules.push(compiled),
                Err(err) => {
                    warn!("skipping rule '{description}': {err}");
                    set.rejected.push(format!("rule '{description}' rejected: {err}"));
                }
            }
        }
        set
    }

    /// Compiled rules in evaluation order.
    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// One message per rule dropped at load time.
    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }

    /// Number of compiled rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rule compiled.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
