use std::{any::Any, sync::Arc};

use futures::future::BoxFuture;

use crate::{bucket::GradBucket, error::HookError};

/// Caller-owned state forwarded to the communication hook on every
/// invocation. Opaque to the registry: never inspected, defaulted, or
/// cloned beyond the `Arc` handle. Hooks downcast the shapes they
/// understand.
pub type HookState = Arc<dyn Any + Send + Sync>;

/// Future resolving to the reduced bucket.
pub type ReduceFuture = BoxFuture<'static, Result<GradBucket, HookError>>;

/// The fixed communication-function signature.
///
/// A plain `fn` pointer so dispatch-table entries stay `Copy` and two
/// entries can be compared for aliasing.
pub type ReduceFn = fn(Option<HookState>, GradBucket) -> ReduceFuture;

/// Registration boundary of the external training engine.
///
/// This trait is the only interface the registry requires from the engine
/// that owns gradient buckets and drives the backward pass. The engine is
/// expected to:
/// - accept registration before the first backward pass begins,
/// - invoke `reduce_fn` once per gradient bucket during each backward pass,
///   forwarding `state` unchanged every time,
/// - be idempotent or erroring on double registration.
///
/// The registry never guards against double registration itself; calling
/// a registrar twice performs two registrations.
pub trait CommHookRegistry {
    fn register_comm_hook(&mut self, state: Option<HookState>, reduce_fn: ReduceFn);
}
