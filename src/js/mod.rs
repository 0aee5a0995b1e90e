pub(crate) mod bindings;
pub mod environment;
pub mod marshal;
pub mod runtime;
