mod nav_bar;
mod page_view;
mod status_bar;

pub use nav_bar::NavBarWidget;
pub use page_view::PageViewWidget;
pub use status_bar::StatusBarWidget;
