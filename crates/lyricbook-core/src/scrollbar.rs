//! Geometry for the custom scrollbar: a handle sliding in a track that
//! mirrors the scroll ratio of a separate scroll region.

// ── Geometry ──────────────────────────────────────────────────────

/// Scroll metrics of the region being mirrored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    /// Largest reachable `scroll_top`; zero when nothing overflows.
    pub fn max_scroll(&self) -> f64 {
        (self.scroll_height - self.client_height).max(0.0)
    }

    /// Current position in [0, 1]; zero when nothing overflows.
    pub fn ratio(&self) -> f64 {
        let max = self.max_scroll();
        if max <= 0.0 {
            return 0.0;
        }
        clamp_unit(self.scroll_top / max)
    }

    /// `scroll_top` that puts the region at `ratio`.
    pub fn scroll_top_for(&self, ratio: f64) -> f64 {
        clamp_unit(ratio) * self.max_scroll()
    }
}

/// Sizes of the track and its handle, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackMetrics {
    pub track_height: f64,
    pub handle_height: f64,
}

impl TrackMetrics {
    /// How far the handle can move inside the track.
    pub fn max_travel(&self) -> f64 {
        (self.track_height - self.handle_height).max(0.0)
    }

    /// Handle offset for a given scroll state, pinned at 0 in degenerate cases.
    pub fn handle_top(&self, scroll: &ScrollMetrics) -> f64 {
        let travel = self.max_travel();
        if travel <= 0.0 || scroll.max_scroll() <= 0.0 {
            return 0.0;
        }
        (scroll.ratio() * travel).clamp(0.0, travel)
    }

    /// Clamp a proposed handle offset and convert it to a scroll ratio.
    pub fn ratio_for_top(&self, top: f64) -> f64 {
        let travel = self.max_travel();
        if travel <= 0.0 {
            return 0.0;
        }
        top.clamp(0.0, travel) / travel
    }

    /// Ratio for a click at `offset_y` within the track, centering the handle there.
    pub fn ratio_for_click(&self, offset_y: f64) -> f64 {
        self.ratio_for_top(offset_y - self.handle_height / 2.0)
    }
}

// ── Drag ──────────────────────────────────────────────────────────

/// Drag session for the handle. At most one is active.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragState {
    dragging: bool,
    grab_offset: f64,
}

impl DragState {
    /// Start a drag; `grab_offset` is the pointer's distance from the handle top.
    ///
    /// Returns `false` if a drag was already in progress.
    pub fn begin(&mut self, grab_offset: f64) -> bool {
        if self.dragging {
            return false;
        }
        self.dragging = true;
        self.grab_offset = grab_offset;
        true
    }

    /// Scroll ratio for the pointer at `pointer_in_track` (pointer y minus track top).
    ///
    /// `None` when no drag is active.
    pub fn ratio_at(&self, pointer_in_track: f64, track: &TrackMetrics) -> Option<f64> {
        self.dragging
            .then(|| track.ratio_for_top(pointer_in_track - self.grab_offset))
    }

    /// End the drag. Returns whether one was active.
    pub fn end(&mut self) -> bool {
        std::mem::replace(&mut self.dragging, false)
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}
