//! portal-common - DOM-free logic shared by the portal UI controllers
//!
//! Everything here is pure data manipulation so it can be tested natively
//! without a browser or a mock page.

mod char_count;
mod phrase_cycle;
mod row_filter;
mod scroll_easing;
mod tour_state;
mod viewport;

pub use char_count::*;
pub use phrase_cycle::*;
pub use row_filter::*;
pub use scroll_easing::*;
pub use tour_state::*;
pub use viewport::*;
