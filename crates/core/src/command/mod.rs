/// The bare command value and its builder.
pub mod bare;
/// AST-to-bare-command extraction.
pub mod extract;

pub use bare::{BareCommand, BareCommandBuilder, Parameter, ParameterKind};
pub use extract::extract;
