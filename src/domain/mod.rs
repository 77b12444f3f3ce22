pub mod command;
pub mod device;
#[cfg(test)]
pub mod fixtures;

pub use command::{Action, Command, Direction, Response};
pub use device::{Addressable, AdminState, Device, OperatingState, Protocol, UnknownStateError};
