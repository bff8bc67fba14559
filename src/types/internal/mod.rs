pub mod access;
pub mod actor;
pub mod status;

pub use access::{Operation, OperationSet};
pub use actor::{ActorContext, ComplaintScope, Role};
pub use status::Status;
