pub mod event;
pub mod hold;
pub mod order;
pub mod seat_state;
pub mod ticket;

pub use event::{Event, PricingZone};
pub use hold::Hold;
pub use order::Order;
pub use seat_state::SeatState;
pub use ticket::Ticket;
