pub mod config;
pub mod rules;

// Re-export common types that consumers will need
pub use config::RuleSetConfig;
pub use rules::{Result, Rule, RuleError, RuleProto, RuleSet, RulesProto};
