//! The IR data model: shaders, their declarative children, control-flow
//! clauses, instructions, and register operands.

pub mod cf;
pub mod instr;
pub mod register;
pub mod shader;

pub use cf::{AllocType, Cf, ExecClause, MAX_CLAUSE_INSTRS};
pub use instr::{AluPayload, FetchPayload, InstrPayload, Instruction, MAX_INSTR_REGS};
pub use register::{RegFlags, Register};
pub use shader::{reg_update_stats, Attribute, Constant, Sampler, Shader, ShaderInfo, Uniform, Varying, MAX_CLAUSES, MAX_DECLS};
