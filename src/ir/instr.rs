//! FETCH and ALU instructions: the payloads EXEC/EXEC_END clauses carry.

use crate::error::AssembleError;
use crate::ir::register::Register;
use crate::opcodes::{FetchOpc, ScalarOpc, VectorOpc};

/// Registers an instruction may reference. Sized to the worst case: an
/// ALU instruction with both a scalar half and a third vector source.
pub const MAX_INSTR_REGS: usize = 5;

/// FETCH payload: a vertex-buffer or texture load.
#[derive(Clone, Copy, Debug)]
pub struct FetchPayload {
    pub opc: FetchOpc,
    pub const_index: u8,
    pub signedness: bool,
    /// Surface format. Meaningful for VERTEX only.
    pub format: u8,
    /// Fetch stride in bytes. Meaningful for VERTEX only.
    pub stride: u16,
}

impl FetchPayload {
    /// A VERTEX (vertex-buffer) fetch.
    pub fn vertex(const_index: u8, signedness: bool, format: u8, stride: u16) -> Result<Self, AssembleError> {
        if const_index > 0xF {
            return Err(AssembleError::ConstIndexOutOfRange(const_index));
        }
        if format > 0x3F {
            return Err(AssembleError::FormatOutOfRange(format));
        }
        if stride > 0xFF {
            return Err(AssembleError::StrideOutOfRange(stride));
        }
        Ok(Self { opc: FetchOpc::Vertex, const_index, signedness, format, stride })
    }

    /// A SAMPLE (texture) fetch. `format`/`stride`/`signedness` do not
    /// apply and are stored as zero.
    pub fn sample(const_index: u8) -> Result<Self, AssembleError> {
        if const_index > 0xF {
            return Err(AssembleError::ConstIndexOutOfRange(const_index));
        }
        Ok(Self { opc: FetchOpc::Sample, const_index, signedness: false, format: 0, stride: 0 })
    }
}

/// ALU payload: a vector opcode with an optional scalar opcode.
#[derive(Clone, Copy, Debug)]
pub struct AluPayload {
    pub vector_opc: VectorOpc,
    pub scalar_opc: Option<ScalarOpc>,
}

impl AluPayload {
    pub fn new(vector_opc: VectorOpc, scalar_opc: Option<ScalarOpc>) -> Self {
        Self { vector_opc, scalar_opc }
    }

    pub fn is_muladdv(&self) -> bool {
        matches!(self.vector_opc, VectorOpc::MULADDv)
    }
}

/// The kind-specific payload of an instruction.
#[derive(Clone, Debug)]
pub enum InstrPayload {
    Fetch(FetchPayload),
    Alu(AluPayload),
}

/// An ALU or FETCH instruction inside an EXEC/EXEC_END clause.
#[derive(Clone, Debug)]
pub struct Instruction {
    /// Maps to the sync bit of this instruction's slot in the clause's
    /// sequence field.
    pub sync: bool,
    regs: heapless::Vec<Register, MAX_INSTR_REGS>,
    pub payload: InstrPayload,
}

impl Instruction {
    pub fn new_fetch(sync: bool, payload: FetchPayload) -> Self {
        Self { sync, regs: heapless::Vec::new(), payload: InstrPayload::Fetch(payload) }
    }

    pub fn new_alu(sync: bool, payload: AluPayload) -> Self {
        Self { sync, regs: heapless::Vec::new(), payload: InstrPayload::Alu(payload) }
    }

    /// Append a register operand. Operand order is significant: FETCH
    /// expects (destination, source); ALU's order depends on whether a
    /// scalar half and/or MULADDv is present (the ALU emitter interprets
    /// the positions — this container just holds them in append order).
    pub fn add_register(&mut self, reg: Register) -> Result<(), AssembleError> {
        self.regs.push(reg).map_err(|_| AssembleError::CapacityExceeded {
            container: "instruction registers",
            capacity: MAX_INSTR_REGS,
        })
    }

    pub fn regs(&self) -> &[Register] {
        &self.regs
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self.payload, InstrPayload::Fetch(_))
    }
}
