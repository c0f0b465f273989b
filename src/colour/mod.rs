pub mod compose;
pub mod palette;
pub mod pixel;
