pub mod gateway;
pub mod webhook;

pub use gateway::StubLiveGateway;
pub use webhook::{verify_and_parse, WebhookOutcome};
