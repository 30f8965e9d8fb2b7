pub mod error;
pub mod query;

pub use query::{
    compiled::CompiledQuery,
    compiler::{Compiler, compile},
    options::{CompilerOptions, EmptyListPolicy},
};
