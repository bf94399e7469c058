pub mod game_flow;
pub mod room;
pub mod snapshot;
pub mod turn_timer;
