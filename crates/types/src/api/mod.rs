pub mod orders;
pub mod realtime;
pub mod seats;

pub use orders::*;
pub use realtime::*;
pub use seats::*;
