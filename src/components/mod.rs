pub mod fab;
pub mod navigation;
pub mod templates;
pub mod views;

pub use fab::FabComponent;
pub use navigation::NavigationComponent;
pub use templates::TemplateComponent;
pub use views::{RenderedView, render_view};
