use serde::{Deserialize, Serialize};

use super::wire::RuleProto;

/// A single access-control rule: an action name bound to an opaque
/// expression. The expression is interpreted by an external evaluator.
///
/// Rules are immutable once built. Identity for lookup purposes is the
/// action alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rule {
    action: String,
    #[serde(rename = "expr")]
    expression: Vec<u8>,
}

impl Rule {
    /// Create a new rule. Validation of the action happens in `RuleSet`.
    pub fn new(action: impl Into<String>, expression: impl Into<Vec<u8>>) -> Self {
        Self {
            action: action.into(),
            expression: expression.into(),
        }
    }

    /// The action this rule governs
    pub fn action(&self) -> &str {
        &self.action
    }

    /// The opaque expression bytes
    pub fn expression(&self) -> &[u8] {
        &self.expression
    }

    /// Consume the rule, returning its action and expression
    pub fn into_parts(self) -> (String, Vec<u8>) {
        (self.action, self.expression)
    }

    pub fn to_proto(&self) -> RuleProto {
        RuleProto {
            action: self.action.clone(),
            expr: self.expression.clone(),
        }
    }
}

impl From<RuleProto> for Rule {
    fn from(proto: RuleProto) -> Self {
        Self {
            action: proto.action,
            expression: proto.expr,
        }
    }
}

impl From<Rule> for RuleProto {
    fn from(rule: Rule) -> Self {
        RuleProto {
            action: rule.action,
            expr: rule.expression,
        }
    }
}
