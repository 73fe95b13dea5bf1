// Per-frame input state tracking and action bindings

pub mod input;

pub use input::{ActionBinding, ActionResolver, DeviceEvent, DeviceState, InputConfig, InputError};
