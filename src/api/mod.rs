// HTTP surface
pub mod keepalive;
