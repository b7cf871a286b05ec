pub mod experience_handlers;
pub mod system_handlers;

pub use experience_handlers::*;
pub use system_handlers::*;
