//! Change feed: a broadcast dispatcher plus the WebSocket loop that relays
//! `ChangeEvent`s to connected clients.

pub mod connection;
pub mod dispatcher;

pub use dispatcher::Dispatcher;
