mod messages;

pub use messages::{Outcome, Request};
