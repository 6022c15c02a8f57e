mod error;
mod rule;
mod wire;

pub use error::{Result, RuleError};
pub use rule::Rule;
pub use wire::{RuleProto, RulesProto};

use std::collections::HashSet;

use prost::Message;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::config::RuleSetConfig;

/// An ordered, action-unique table of rules.
///
/// Insertion order is preserved across every mutation and is reproduced
/// exactly by [`RuleSet::to_wire`], since the document embedding the set is
/// hashed and signed over that encoding. No two rules share an action.
///
/// Lookups are a linear scan: a set holds one rule per governed action,
/// which is typically a few dozen at most.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Rule>", into = "Vec<Rule>")]
pub struct RuleSet {
    rules: Vec<Rule>,
    config: RuleSetConfig,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty set that enforces the given limits.
    ///
    /// Fails with [`RuleError::Config`] if `config` does not pass
    /// [`RuleSetConfig::validate`].
    pub fn with_config(config: RuleSetConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            rules: Vec::new(),
            config,
        })
    }

    /// Build a set from rules in the given order, rejecting repeated actions
    pub fn try_from_rules(rules: Vec<Rule>) -> Result<Self> {
        Self::from_rules_with_config(rules, RuleSetConfig::default())
    }

    fn from_rules_with_config(rules: Vec<Rule>, config: RuleSetConfig) -> Result<Self> {
        config.check_count(rules.len())?;
        {
            let mut seen = HashSet::with_capacity(rules.len());
            for rule in &rules {
                config.check_action(rule.action())?;
                config.check_expression(rule.action(), rule.expression())?;
                if !seen.insert(rule.action()) {
                    return Err(RuleError::DuplicateAction(rule.action().to_string()));
                }
            }
        }
        Ok(Self { rules, config })
    }

    pub fn config(&self) -> &RuleSetConfig {
        &self.config
    }

    /// Append a new rule at the end of the order.
    ///
    /// Fails with [`RuleError::AlreadyExists`] if the action is present; use
    /// [`RuleSet::update`] to change an existing rule. The set is unchanged
    /// on any failure.
    pub fn add(
        &mut self,
        action: impl Into<String>,
        expression: impl Into<Vec<u8>>,
    ) -> Result<()> {
        let action = action.into();
        let expression = expression.into();

        self.config.check_action(&action)?;
        if self.position(&action).is_some() {
            return Err(RuleError::AlreadyExists(action));
        }
        self.config.check_expression(&action, &expression)?;
        self.config.check_count(self.rules.len() + 1)?;

        debug!("Adding rule for action {}", action);
        self.rules.push(Rule::new(action, expression));
        Ok(())
    }

    /// Replace the expression of an existing rule, keeping its position.
    ///
    /// Fails with [`RuleError::NotFound`] if the action is absent; use
    /// [`RuleSet::add`] to create it. The set is unchanged on any failure.
    pub fn update(&mut self, action: &str, expression: impl Into<Vec<u8>>) -> Result<()> {
        let expression = expression.into();
        let index = self
            .position(action)
            .ok_or_else(|| RuleError::NotFound(action.to_string()))?;
        self.config.check_expression(action, &expression)?;

        debug!("Updating rule for action {} at position {}", action, index);
        self.rules[index] = Rule::new(action, expression);
        Ok(())
    }

    /// Get the rule for an action
    pub fn get(&self, action: &str) -> Option<&Rule> {
        self.position(action).map(|i| &self.rules[i])
    }

    /// Remove and return the rule for an action. Remaining rules keep their
    /// relative order.
    pub fn remove(&mut self, action: &str) -> Option<Rule> {
        let index = self.position(action)?;
        debug!("Removing rule for action {}", action);
        Some(self.rules.remove(index))
    }

    pub fn contains(&self, action: &str) -> bool {
        self.position(action).is_some()
    }

    /// All rules, in order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// All action names, in the same order as [`RuleSet::rules`]
    pub fn actions(&self) -> Vec<&str> {
        self.rules.iter().map(Rule::action).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn to_proto(&self) -> RulesProto {
        RulesProto {
            r: self.rules.iter().map(Rule::to_proto).collect(),
        }
    }

    /// Canonical protobuf encoding, in rule order
    pub fn to_wire(&self) -> Vec<u8> {
        self.to_proto().encode_to_vec()
    }

    /// Decode a rule set without size limits
    pub fn from_wire(data: &[u8]) -> Result<Self> {
        Self::from_wire_with_config(data, RuleSetConfig::default())
    }

    /// Decode a rule set, keeping the encoded order.
    ///
    /// Besides malformed protobuf, this rejects content that breaks the set
    /// invariants: repeated or empty actions and anything over `config`'s
    /// limits. An invalid `config` fails with [`RuleError::Config`].
    pub fn from_wire_with_config(data: &[u8], config: RuleSetConfig) -> Result<Self> {
        config.validate()?;
        let proto = RulesProto::decode(data).map_err(|e| {
            warn!("Rejecting malformed rule set encoding: {}", e);
            RuleError::from(e)
        })?;
        Self::from_proto_with_config(proto, config)
    }

    fn from_proto_with_config(proto: RulesProto, config: RuleSetConfig) -> Result<Self> {
        let rules = proto.r.into_iter().map(Rule::from).collect();
        Self::from_rules_with_config(rules, config).map_err(|e| {
            warn!("Rejecting decoded rule set: {}", e);
            e
        })
    }

    /// SHA-256 over [`RuleSet::to_wire`]
    pub fn digest(&self) -> [u8; 32] {
        Sha256::digest(self.to_wire()).into()
    }

    fn position(&self, action: &str) -> Option<usize> {
        self.rules.iter().position(|rule| rule.action() == action)
    }
}

/// Two sets are equal when they hold the same rules in the same order.
impl PartialEq for RuleSet {
    fn eq(&self, other: &Self) -> bool {
        self.rules == other.rules
    }
}

impl Eq for RuleSet {}

impl TryFrom<RulesProto> for RuleSet {
    type Error = RuleError;

    fn try_from(proto: RulesProto) -> Result<Self> {
        Self::from_proto_with_config(proto, RuleSetConfig::default())
    }
}

impl TryFrom<Vec<Rule>> for RuleSet {
    type Error = RuleError;

    fn try_from(rules: Vec<Rule>) -> Result<Self> {
        Self::try_from_rules(rules)
    }
}

impl From<RuleSet> for Vec<Rule> {
    fn from(set: RuleSet) -> Self {
        set.rules
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
