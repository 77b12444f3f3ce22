mod access_gate;
mod dispatcher;
mod resolver;

pub use access_gate::{Access, DenyReason, authorize};
pub use dispatcher::{CommandDispatcher, CommandRequest, DispatchError};
pub use resolver::{ResolveError, UrlResolver};
