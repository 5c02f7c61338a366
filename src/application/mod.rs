mod game_state;
mod pool;
mod strategy;
pub mod view;

pub use game_state::GameState;
pub use pool::{Pool, PoolSnapshot};
pub use strategy::Strategy;
pub use view::{FieldView, Layout, PoolView};
