use std::num::NonZeroUsize;

use ddp_core::{GradBucket, HookError, HookState, ReduceFuture};
use futures::future;

/// State understood by [`quantize_per_channel_hook`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerChannelState {
    /// Length of one channel chunk inside the flat bucket buffer.
    pub channel_len: NonZeroUsize,
}

impl PerChannelState {
    pub fn new(channel_len: NonZeroUsize) -> Self {
        Self { channel_len }
    }
}

/// Symmetric 8-bit quantization over the whole bucket.
///
/// Quantizes to the signed 8-bit grid scaled by the bucket's max absolute
/// gradient, then dequantizes in place. This models the precision loss of a
/// quantized exchange; state is forwarded by the engine but not consulted.
pub fn quantize_per_tensor_hook(_state: Option<HookState>, mut bucket: GradBucket) -> ReduceFuture {
    quantize_chunk(bucket.grads_mut());
    Box::pin(future::ready(Ok(bucket)))
}

/// Symmetric 8-bit quantization with one scale per channel chunk.
///
/// The channel length comes from a [`PerChannelState`]; absent state treats
/// the whole bucket as a single channel. The bucket length must be a
/// multiple of the channel length.
pub fn quantize_per_channel_hook(state: Option<HookState>, mut bucket: GradBucket) -> ReduceFuture {
    let channel_len = match state {
        None => bucket.len().max(1),
        Some(state) => match state.downcast_ref::<PerChannelState>() {
            Some(s) => s.channel_len.get(),
            None => {
                return Box::pin(future::ready(Err(HookError::InvalidInput(
                    "per-channel state must be a PerChannelState",
                ))))
            }
        },
    };

    if bucket.len() % channel_len != 0 {
        return Box::pin(future::ready(Err(HookError::ShapeMismatch {
            what: "channel",
            got: bucket.len() % channel_len,
            expected: channel_len,
        })));
    }

    for chunk in bucket.grads_mut().chunks_mut(channel_len) {
        quantize_chunk(chunk);
    }

    Box::pin(future::ready(Ok(bucket)))
}

/// Quantize/dequantize one chunk against its own max-abs scale.
fn quantize_chunk(grads: &mut [f32]) {
    let max_abs = grads.iter().fold(0.0_f32, |acc, g| acc.max(g.abs()));
    if max_abs == 0.0 {
        return;
    }

    let scale = max_abs / i8::MAX as f32;
    for g in grads.iter_mut() {
        let q = (*g / scale).round().clamp(i8::MIN as f32 + 1.0, i8::MAX as f32);
        *g = q * scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::sync::Arc;

    #[test]
    fn per_tensor_preserves_extremes_and_zero() {
        let bucket = GradBucket::new(0, vec![1.27, 0.0, -1.27]);
        let out = block_on(quantize_per_tensor_hook(None, bucket)).unwrap();

        // The max-abs value sits exactly on the grid; zero stays zero.
        assert!((out.grads()[0] - 1.27).abs() < 1e-6);
        assert_eq!(out.grads()[1], 0.0);
        assert!((out.grads()[2] + 1.27).abs() < 1e-6);
    }

    #[test]
    fn per_tensor_error_is_bounded_by_half_a_step() {
        let input = vec![0.93_f32, -0.2, 0.55, 0.01];
        let bucket = GradBucket::new(0, input.clone());
        let out = block_on(quantize_per_tensor_hook(None, bucket)).unwrap();

        let step = 0.93 / 127.0;
        for (q, g) in out.grads().iter().zip(input.iter()) {
            assert!((q - g).abs() <= step / 2.0 + 1e-6);
        }
    }

    #[test]
    fn all_zero_bucket_is_untouched() {
        let bucket = GradBucket::new(0, vec![0.0; 4]);
        let out = block_on(quantize_per_tensor_hook(None, bucket)).unwrap();
        assert_eq!(out.grads(), &[0.0; 4]);
    }

    #[test]
    fn per_channel_scales_each_chunk_independently() {
        let state: HookState =
            Arc::new(PerChannelState::new(NonZeroUsize::new(2).unwrap()));
        // First channel max 1.27, second channel max 127.0.
        let bucket = GradBucket::new(0, vec![1.27, -1.27, 127.0, -127.0]);

        let out = block_on(quantize_per_channel_hook(Some(state), bucket)).unwrap();
        let expected = [1.27, -1.27, 127.0, -127.0];
        for (q, e) in out.grads().iter().zip(expected.iter()) {
            assert!((q - e).abs() < 1e-4);
        }
    }

    #[test]
    fn per_channel_rejects_ragged_buckets() {
        let state: HookState =
            Arc::new(PerChannelState::new(NonZeroUsize::new(4).unwrap()));
        let bucket = GradBucket::new(0, vec![1.0; 7]);

        let err = block_on(quantize_per_channel_hook(Some(state), bucket)).unwrap_err();
        assert!(matches!(
            err,
            HookError::ShapeMismatch { what: "channel", got: 3, expected: 4 }
        ));
    }

    #[test]
    fn per_channel_without_state_uses_one_channel() {
        let bucket = GradBucket::new(0, vec![2.54, 0.0, -2.54]);
        let out = block_on(quantize_per_channel_hook(None, bucket)).unwrap();
        assert!((out.grads()[0] - 2.54).abs() < 1e-6);
        assert_eq!(out.grads()[1], 0.0);
        assert!((out.grads()[2] + 2.54).abs() < 1e-6);
    }

    #[test]
    fn per_channel_rejects_foreign_state() {
        let state: HookState = Arc::new(42_u32);
        let bucket = GradBucket::new(0, vec![1.0]);

        let err = block_on(quantize_per_channel_hook(Some(state), bucket)).unwrap_err();
        assert!(matches!(err, HookError::InvalidInput(_)));
    }
}
