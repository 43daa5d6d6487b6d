/// One gradient bucket flushed during backward-pass communication.
///
/// A bucket groups the gradients of several parameters into a single flat
/// buffer so they can be reduced together. The engine hands a bucket to the
/// registered communication hook once per bucket per backward pass; the hook
/// returns a future resolving to the reduced bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct GradBucket {
    index: usize,
    grads: Vec<f32>,
}

impl GradBucket {
    pub fn new(index: usize, grads: Vec<f32>) -> Self {
        Self { index, grads }
    }

    /// Position of this bucket in the engine's flush order.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn grads(&self) -> &[f32] {
        &self.grads
    }

    /// Mutable access for hooks that reduce in place.
    pub fn grads_mut(&mut self) -> &mut [f32] {
        &mut self.grads
    }

    pub fn len(&self) -> usize {
        self.grads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grads.is_empty()
    }

    pub fn into_grads(self) -> Vec<f32> {
        self.grads
    }
}
