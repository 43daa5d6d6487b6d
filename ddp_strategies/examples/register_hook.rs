//! Registers a comm hook on a toy engine and runs it over one bucket.
//!
//! ```sh
//! RUST_LOG=info cargo run -p ddp_strategies --example register_hook
//! ```

use std::num::NonZeroUsize;
use std::sync::Arc;

use ddp_core::{CommHookRegistry, GradBucket, HookState, ReduceFn};
use ddp_hooks::default::AllreduceState;
use ddp_strategies::{register_comm_hook_by_name, CommHookType};
use futures::executor::block_on;

/// Minimal stand-in for a training engine: holds the registered hook and
/// invokes it once per bucket.
struct ToyEngine {
    hook: Option<(Option<HookState>, ReduceFn)>,
}

impl CommHookRegistry for ToyEngine {
    fn register_comm_hook(&mut self, state: Option<HookState>, reduce_fn: ReduceFn) {
        self.hook = Some((state, reduce_fn));
    }
}

fn main() {
    env_logger::init();

    let mut engine = ToyEngine { hook: None };
    let state: HookState = Arc::new(AllreduceState::new(NonZeroUsize::new(4).unwrap()));

    register_comm_hook_by_name("ALLREDUCE", &mut engine, Some(state))
        .expect("ALLREDUCE is a member name");

    let (state, reduce_fn) = engine.hook.expect("hook was registered");
    let bucket = GradBucket::new(0, vec![4.0, 8.0, -2.0]);
    let reduced = block_on(reduce_fn(state, bucket)).expect("allreduce stand-in cannot fail");

    println!("supported hooks:");
    for kind in CommHookType::MEMBERS {
        println!("  {}", kind.name());
    }
    println!("reduced bucket: {:?}", reduced.grads());
}
