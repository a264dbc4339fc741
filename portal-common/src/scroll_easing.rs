//! Scroll animation math for in-page anchors and the back-to-top control

/// Exponential ease-in-out, as used by the template's `easeInOutExpo`.
/// `t` should be in [0, 1]
#[inline]
pub fn ease_in_out_expo(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t == 0.0 {
        0.0
    } else if t == 1.0 {
        1.0
    } else if t < 0.5 {
        0.5 * 2.0_f64.powf(20.0 * t - 10.0)
    } else {
        0.5 * (2.0 - 2.0_f64.powf(-20.0 * t + 10.0))
    }
}

/// A vertical scroll from one position to another over a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnimation {
    pub from: f64,
    pub to: f64,
    pub duration_ms: f64,
}

impl ScrollAnimation {
    pub fn new(from: f64, to: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            duration_ms: duration_ms.max(0.0),
        }
    }

    /// Scroll position `elapsed_ms` after the animation started.
    pub fn position_at(&self, elapsed_ms: f64) -> f64 {
        if self.is_finished(elapsed_ms) {
            return self.to;
        }
        let t = elapsed_ms / self.duration_ms;
        self.from + (self.to - self.from) * ease_in_out_expo(t)
    }

    pub fn is_finished(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.duration_ms
    }
}

/// Where to scroll so `target_top` sits just below a fixed header.
pub fn anchor_scroll_top(target_top: f64, header_height: f64) -> f64 {
    (target_top - header_height).max(0.0)
}

/// Whether a link points into the current document.
///
/// Paths are compared with one leading slash removed, hosts exactly.
pub fn is_same_document(page_path: &str, page_host: &str, link_path: &str, link_host: &str) -> bool {
    let strip = |p: &str| p.strip_prefix('/').unwrap_or(p).to_string();
    strip(page_path) == strip(link_path) && page_host == link_host
}

/// The back-to-top control is visible once the page is scrolled past `threshold`.
pub fn back_to_top_visible(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}
