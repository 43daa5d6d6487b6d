pub mod bucket;
pub mod error;
pub mod hook;

pub use bucket::GradBucket;
pub use error::HookError;
pub use hook::{CommHookRegistry, HookState, ReduceFn, ReduceFuture};
