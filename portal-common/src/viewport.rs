/// Viewport width threshold at or below which the mobile layout applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoint {
    pub max_width: u32,
}

impl Breakpoint {
    /// Bootstrap's `md` upper bound used by the dashboard template
    pub const DEFAULT_MAX_WIDTH: u32 = 991;

    pub fn new(max_width: u32) -> Self {
        Self { max_width }
    }

    /// Whether a viewport of `width` CSS pixels uses the mobile layout.
    pub fn is_mobile(&self, width: f64) -> bool {
        width <= f64::from(self.max_width)
    }
}

impl Default for Breakpoint {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_WIDTH)
    }
}
