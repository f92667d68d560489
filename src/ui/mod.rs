//! Browser front end.
//!
//! The server renders one page holding the widget's DOM contract and the
//! browser controller script.
//!
//! - [`page`]: page template

pub mod page;

pub use page::build_widget_page;
