pub mod errors;
pub mod net;

pub use errors::NetError;
pub use net::*;
