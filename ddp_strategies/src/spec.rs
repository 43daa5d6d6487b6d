use serde::{Deserialize, Serialize};

/// Wire-level selection of a gradient-synchronization strategy.
///
/// `kind` is a member name of `CommHookType` (e.g. "ALLREDUCE"), resolved
/// and validated by `register_from_spec` on the receiving side. Keeping the
/// selector a plain string means orchestration layers can ship it without
/// depending on the hook crates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookSpec {
    pub kind: String,
}

impl HookSpec {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }
}
