//! Protobuf records for the rule set wire format.
//!
//! Field names, tags and labels match the DARC schema, which is proto2:
//!
//! ```proto
//! message Rule  { required string action = 1; required bytes expr = 2; }
//! message Rules { repeated Rule r = 1; }
//! ```
//!
//! Both rule fields are `required`, so they are always written, even when
//! empty. A proto3 encoder would drop an empty `expr` and produce different
//! bytes, and so a different document hash.

use prost::Message;

#[derive(Clone, PartialEq, Message)]
pub struct RuleProto {
    #[prost(string, required, tag = "1")]
    pub action: String,
    #[prost(bytes = "vec", required, tag = "2")]
    pub expr: Vec<u8>,
}

/// Repeated rule records, in rule set order.
#[derive(Clone, PartialEq, Message)]
pub struct RulesProto {
    #[prost(message, repeated, tag = "1")]
    pub r: Vec<RuleProto>,
}
