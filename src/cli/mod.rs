pub mod chat;
pub mod server;
