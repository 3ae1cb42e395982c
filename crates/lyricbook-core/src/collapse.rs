use std::cell::Cell;

/// Coalesces bursts of events into one update per animation frame.
#[derive(Debug, Default)]
pub struct FrameThrottle {
    pending: Cell<bool>,
}

impl FrameThrottle {
    /// Mark an update as wanted. Returns `true` if the caller must schedule a
    /// frame, `false` if one is already pending.
    pub fn request(&self) -> bool {
        !self.pending.replace(true)
    }

    /// Called from the frame callback; clears the pending flag.
    pub fn take(&self) -> bool {
        self.pending.replace(false)
    }
}

/// Collapsed state of the page header, driven by a scroll offset.
#[derive(Debug)]
pub struct HeaderCollapse {
    threshold: f64,
    throttle: FrameThrottle,
}

impl HeaderCollapse {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            throttle: FrameThrottle::default(),
        }
    }

    /// Collapsed iff the offset is strictly past the threshold.
    pub fn is_collapsed_at(&self, offset: f64) -> bool {
        offset > self.threshold
    }

    pub fn throttle(&self) -> &FrameThrottle {
        &self.throttle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_exclusive() {
        let header = HeaderCollapse::new(8.0);
        assert!(!header.is_collapsed_at(0.0));
        assert!(!header.is_collapsed_at(8.0));
        assert!(header.is_collapsed_at(8.5));
        assert!(header.is_collapsed_at(400.0));
    }

    #[test]
    fn negative_offset_expands() {
        // Elastic overscroll reports negative offsets.
        let header = HeaderCollapse::new(8.0);
        assert!(!header.is_collapsed_at(-20.0));
    }

    #[test]
    fn throttle_coalesces_until_frame() {
        let t = FrameThrottle::default();
        assert!(t.request());
        assert!(!t.request());
        assert!(!t.request());

        assert!(t.take());
        assert!(!t.take());
        assert!(t.request());
    }

    #[test]
    fn take_without_request() {
        let t = FrameThrottle::default();
        assert!(!t.take());
    }
}
