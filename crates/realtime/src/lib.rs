pub mod broadcaster;
pub mod protocol;
pub mod rooms;
pub mod ws;

pub use broadcaster::RealtimeBroadcaster;
pub use rooms::RoomRegistry;
