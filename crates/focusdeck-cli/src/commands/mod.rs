pub mod config;
pub mod terminal;
pub mod timer;
pub mod tracks;
