mod aabb;
mod color;
mod extent;

pub use aabb::AABB;
pub use color::{hex_to_linear_rgb, srgb_to_linear};
pub use extent::fit_within;
