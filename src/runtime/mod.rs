//! Interactive session: menu commands, table rendering, and the prompt loop.

/// Menu command model.
pub mod command;
/// Fixed-width inventory table.
pub mod render;
/// Prompt loop over injected input/output.
pub mod session;
