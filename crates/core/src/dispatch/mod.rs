/// Bindings, the binding table, and resolution/validation errors.
pub mod binding;
/// The built-in address-book command set.
pub mod builtin;
/// The decoder: imperative matching and constructor dispatch.
pub mod decoder;

pub use binding::{Binding, BindingTable, Constructor, ResolutionError, ValidationError};
pub use builtin::{BuiltinCommand, builtin_table};
pub use decoder::Decoder;
