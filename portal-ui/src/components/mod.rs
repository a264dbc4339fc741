pub mod auto_select;
pub mod char_counter;
pub mod clipboard;
pub mod preloader;
pub mod responsive_nav;
pub mod rotating_text;
pub mod scroll_helper;
pub mod table_filter;
pub mod tabs;
pub mod tour;
pub mod view_toggle;

pub use responsive_nav::{NavOptions, ResponsiveNav};
pub use rotating_text::{RotatingText, RotatingTextOptions, RotatingTextRegistry};
pub use scroll_helper::{ScrollHelper, ScrollOptions};
pub use table_filter::TableFilter;
pub use tour::Tour;
pub use view_toggle::ViewMode;
