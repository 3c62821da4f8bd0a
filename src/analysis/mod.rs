pub mod background;
pub mod shadow_factor;
