mod central_panel;
mod controls_panel;
mod status_bar;
mod top_bar;

pub use central_panel::central_panel;
pub use controls_panel::controls_panel;
pub use status_bar::status_bar;
pub use top_bar::top_bar;
