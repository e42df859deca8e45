mod errors;
mod protocol;
pub mod routes;
mod server;

pub use errors::*;
pub use protocol::*;
pub use server::*;
