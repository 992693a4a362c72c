/// At most one pending animation-frame request.
///
/// A new request replaces the pending one, like cancelling and re-requesting a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSlot<T> {
    pending: Option<T>,
}

impl<T> FrameSlot<T> {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Returns the request that was replaced, if any.
    pub fn request(&mut self, payload: T) -> Option<T> {
        self.pending.replace(payload)
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// Hand the pending request to the frame callback.
    pub fn take(&mut self) -> Option<T> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for FrameSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
