use std::num::NonZeroUsize;

use ddp_core::{GradBucket, HookError, HookState, ReduceFuture};
use futures::future;

/// State understood by [`allreduce_hook`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllreduceState {
    /// Number of participating processes the bucket is averaged over.
    pub world_size: NonZeroUsize,
}

impl AllreduceState {
    pub fn new(world_size: NonZeroUsize) -> Self {
        Self { world_size }
    }
}

/// Plain gradient averaging.
///
/// Divides every gradient in the bucket by the world size carried in
/// `state`. Absent state means a world size of 1, so the bucket passes
/// through unchanged. State of any other concrete type is rejected rather
/// than silently ignored.
pub fn allreduce_hook(state: Option<HookState>, mut bucket: GradBucket) -> ReduceFuture {
    let world_size = match state {
        None => 1,
        Some(state) => match state.downcast_ref::<AllreduceState>() {
            Some(s) => s.world_size.get(),
            None => {
                return Box::pin(future::ready(Err(HookError::InvalidInput(
                    "allreduce state must be an AllreduceState",
                ))))
            }
        },
    };

    if world_size > 1 {
        let scale = 1.0 / world_size as f32;
        for g in bucket.grads_mut() {
            *g *= scale;
        }
    }

    Box::pin(future::ready(Ok(bucket)))
}
