pub mod compiled;
pub mod compiler;
pub mod dialect;
pub mod functions;
pub mod operators;
pub mod options;
pub mod template;
