// actions-core: Wire format for GitHub Actions workflow commands.
// This crate has ZERO external dependencies and provides the pure value
// types and escaping rules shared by everything that emits commands.

pub mod command;
pub mod escape;
pub mod properties;
pub mod value;

// Re-export commonly used items at crate root
pub use command::Command;
pub use escape::{escape_data, escape_property};
pub use properties::CommandProperties;
pub use value::CommandValue;
