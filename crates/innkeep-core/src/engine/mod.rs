//! Engines over a single entity's collection.

mod list_view;
mod shared;

pub use list_view::ListViewEngine;
pub use shared::SharedEngine;
