pub mod game;
pub mod pbp;
pub mod today;
