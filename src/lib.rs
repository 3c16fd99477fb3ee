//! Backend assembler for an A2xx-family (early Adreno-class) GPU shader
//! ISA.
//!
//! Accepts an in-memory [`ir::Shader`] — a linear sequence of
//! control-flow clauses containing ALU/FETCH instructions — and emits a
//! bit-exact stream of 32-bit machine words via [`ir::Shader::assemble`],
//! along with the register-usage statistics the driver needs to program
//! thread-dispatch state. A parser/front-end, command-line driver, and
//! disassembler are expected to sit around this crate; none of them are
//! provided here.

mod assembler;
pub mod arena;
pub mod emit;
pub mod error;
pub mod ir;
pub mod opcodes;
mod resolver;
pub mod swizzle;

pub use error::AssembleError;
pub use ir::{Shader, ShaderInfo};
