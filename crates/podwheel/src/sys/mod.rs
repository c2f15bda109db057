pub mod open;
pub mod resolver;
pub mod runtime;
pub mod server;
pub mod share;
pub mod store;
pub mod worker;
