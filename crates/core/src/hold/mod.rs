pub mod arbiter;

pub use arbiter::HoldArbiter;
