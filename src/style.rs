pub mod gradient;
pub mod logo;
pub mod pattern;
pub mod shape;
pub mod watermark;

pub use gradient::apply_gradient;
pub use logo::embed_logo;
pub use pattern::apply_module_style;
pub use shape::{clip_to_shape, shape_path};
pub use watermark::apply_watermark;
