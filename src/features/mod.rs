// Core bot features
pub mod config_store;
pub mod delivery;
pub mod greeter;
pub mod renderer;
pub mod router;
pub mod status;
