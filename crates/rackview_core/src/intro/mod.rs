//! Onboarding flow: route table and the guard deciding which step is reachable.

mod guard;
mod routes;

pub use guard::*;
pub use routes::*;
