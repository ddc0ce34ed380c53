mod handlers;

pub use handlers::{HandlerRegistry, Scope};
