pub mod assignment;
pub mod car;
pub mod geometry;
pub mod handle_race;
pub mod layout;
pub mod location;
pub mod race;
pub mod state_handler;
