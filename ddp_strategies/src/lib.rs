//! Registry and dispatch for gradient-synchronization strategies.
//!
//! Resolves a strategy selector, typed [`CommHookType`] or raw string, to
//! its communication hook and installs the hook (plus caller-supplied
//! opaque state) onto a training model's backward-communication path via a
//! single [`CommHookRegistry`] call. Reduction itself happens inside the
//! hooks; this crate only decides which hook, with what state.

pub mod error;
pub mod spec;

use ddp_core::{CommHookRegistry, HookState, ReduceFn};
use ddp_hooks::{default, quantization};
use log::info;

pub use error::{Result, StrategyError};
pub use spec::HookSpec;

/// The closed set of gradient-synchronization strategies.
///
/// Fixed at compile time; two members may bind the same hook (aliasing is
/// intentional, see [`CommHookType::entry`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommHookType {
    Allreduce,
    Fp16Compress,
    QuantizePerTensor,
    QuantizePerChannel,
}

impl CommHookType {
    /// Every member of the closed enumeration, for caller discovery.
    pub const MEMBERS: [CommHookType; 4] = [
        CommHookType::Allreduce,
        CommHookType::Fp16Compress,
        CommHookType::QuantizePerTensor,
        CommHookType::QuantizePerChannel,
    ];

    /// Returns the stable, case-sensitive member name.
    pub fn name(&self) -> &'static str {
        match self {
            CommHookType::Allreduce => "ALLREDUCE",
            CommHookType::Fp16Compress => "FP16_COMPRESS",
            CommHookType::QuantizePerTensor => "QUANTIZE_PER_TENSOR",
            CommHookType::QuantizePerChannel => "QUANTIZE_PER_CHANNEL",
        }
    }

    /// Resolves a member name, matched case-sensitively.
    ///
    /// # Errors
    /// Returns `StrategyError::UnknownHookName`, listing the supported
    /// names, when `name` is not a member name.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "ALLREDUCE" => Ok(CommHookType::Allreduce),
            "FP16_COMPRESS" => Ok(CommHookType::Fp16Compress),
            "QUANTIZE_PER_TENSOR" => Ok(CommHookType::QuantizePerTensor),
            "QUANTIZE_PER_CHANNEL" => Ok(CommHookType::QuantizePerChannel),
            _ => Err(StrategyError::UnknownHookName { name: name.into() }),
        }
    }

    /// Total lookup into the dispatch table. Never fails.
    pub fn entry(&self) -> HookEntry {
        let reduce_fn: ReduceFn = match self {
            CommHookType::Allreduce => default::allreduce_hook,
            // TODO: bind a real fp16 compression hook once ddp_hooks grows
            // one; until then this member aliases the plain allreduce hook.
            CommHookType::Fp16Compress => default::allreduce_hook,
            CommHookType::QuantizePerTensor => quantization::quantize_per_tensor_hook,
            CommHookType::QuantizePerChannel => quantization::quantize_per_channel_hook,
        };
        HookEntry { reduce_fn }
    }
}

/// One dispatch-table entry: a strategy's bound communication hook.
#[derive(Debug, Clone, Copy)]
pub struct HookEntry {
    reduce_fn: ReduceFn,
}

impl HookEntry {
    pub fn reduce_fn(&self) -> ReduceFn {
        self.reduce_fn
    }

    /// Installs the entry's hook onto `model`'s backward-communication
    /// path. The single integration point with the training engine; one
    /// delegated call, no retries, no deduplication.
    pub fn register<M: CommHookRegistry>(&self, model: &mut M, state: Option<HookState>) {
        model.register_comm_hook(state, self.reduce_fn);
    }
}

/// Registers the hook selected by `kind` onto `model`, forwarding `state`
/// untouched (`None` stays `None`).
///
/// Calling this twice for the same model registers twice; tolerating or
/// rejecting double registration is the engine's contract.
pub fn register_comm_hook<M: CommHookRegistry>(
    kind: CommHookType,
    model: &mut M,
    state: Option<HookState>,
) {
    info!(hook = kind.name(); "registering comm hook");
    kind.entry().register(model, state);
}

/// Registers the hook selected by `name`, matched case-sensitively against
/// the member names of [`CommHookType`].
///
/// # Errors
/// Returns `StrategyError::UnknownHookName` before any registration
/// attempt when `name` is not a member name.
pub fn register_comm_hook_by_name<M: CommHookRegistry>(
    name: &str,
    model: &mut M,
    state: Option<HookState>,
) -> Result<()> {
    let kind = CommHookType::from_name(name)?;
    register_comm_hook(kind, model, state);
    Ok(())
}

/// Registers the hook selected by a wire-level [`HookSpec`].
///
/// # Errors
/// Returns `StrategyError::UnknownHookName` when the spec's `kind` is not
/// a member name.
pub fn register_from_spec<M: CommHookRegistry>(
    spec: &HookSpec,
    model: &mut M,
    state: Option<HookState>,
) -> Result<()> {
    register_comm_hook_by_name(&spec.kind, model, state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_over_every_member() {
        for kind in CommHookType::MEMBERS {
            assert_eq!(CommHookType::from_name(kind.name()).unwrap(), kind);
        }
    }

    #[test]
    fn from_name_is_case_sensitive() {
        assert!(CommHookType::from_name("allreduce").is_err());
        assert!(CommHookType::from_name("Allreduce").is_err());
        assert!(CommHookType::from_name("ALLREDUCE").is_ok());
    }

    #[test]
    fn fp16_compress_aliases_the_allreduce_hook() {
        let fp16 = CommHookType::Fp16Compress.entry().reduce_fn();
        let allreduce = CommHookType::Allreduce.entry().reduce_fn();
        assert!(fp16 == allreduce);
    }

    #[test]
    fn quantize_members_bind_distinct_hooks() {
        let per_tensor = CommHookType::QuantizePerTensor.entry().reduce_fn();
        let per_channel = CommHookType::QuantizePerChannel.entry().reduce_fn();
        let allreduce = CommHookType::Allreduce.entry().reduce_fn();

        assert!(per_tensor != per_channel);
        assert!(per_tensor != allreduce);
        assert!(per_channel != allreduce);
    }
}
