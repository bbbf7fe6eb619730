pub mod overlay;
pub mod window;

pub use overlay::draw_label;
pub use window::MinifbRenderer;
