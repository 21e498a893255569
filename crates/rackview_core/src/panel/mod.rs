mod content;
mod controller;
mod store;

pub use content::*;
pub use controller::*;
pub use store::*;
