pub mod evaluate;
pub mod play;
