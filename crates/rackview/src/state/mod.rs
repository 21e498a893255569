mod app_state;
mod session;

pub use app_state::*;
pub use session::*;
