pub mod input;

pub use input::{GameKey, InputState};
