pub mod cache;
pub mod identity;
pub mod notify;
pub mod payment;
