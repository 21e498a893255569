mod ids;
mod path;
mod section;
mod session;

pub use ids::*;
pub use path::*;
pub use section::*;
pub use session::*;
