pub mod events;
pub mod holds;
pub mod orders;
pub mod seat_state;
pub mod tickets;
