//! Instruction and CF emitters: pure bit-packing functions the shader
//! assembler's emit pass calls once the resolver has run.

pub mod alu;
pub mod cf;
pub mod fetch;
