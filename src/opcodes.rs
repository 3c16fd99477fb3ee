//! Opcode constants shared with the disassembler.
//!
//! Numeric values are fixed by the hardware ISA, not by this crate: the
//! vector and scalar tables below enumerate in the same order the
//! reference assembler's opcode-name macro expansion does, which is also
//! the order the hardware assigns dense sequential encodings in. FETCH
//! opcodes are given explicitly in the format documentation.

/// FETCH instruction opcode (word0 bits 0..4).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum FetchOpc {
    Vertex = 0x00,
    Sample = 0x01,
}

/// ALU vector-unit opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum VectorOpc {
    ADDv = 0,
    MULv = 1,
    MAXv = 2,
    MINv = 3,
    SETEv = 4,
    SETGTv = 5,
    SETGTEv = 6,
    SETNEv = 7,
    FRACv = 8,
    TRUNCv = 9,
    FLOORv = 10,
    MULADDv = 11,
    CNDEv = 12,
    CNDGTEv = 13,
    CNDGTv = 14,
    DOT4v = 15,
    DOT3v = 16,
    DOT2ADDv = 17,
    CUBEv = 18,
    MAX4v = 19,
    PRED_SETE_PUSHv = 20,
    PRED_SETNE_PUSHv = 21,
    PRED_SETGT_PUSHv = 22,
    PRED_SETGTE_PUSHv = 23,
    KILLEv = 24,
    KILLGTv = 25,
    KILLGTEv = 26,
    KILLNEv = 27,
    DSTv = 28,
    MOVAv = 29,
}

/// ALU scalar-unit opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum ScalarOpc {
    ADDs = 0,
    ADD_PREVs = 1,
    MULs = 2,
    MUL_PREVs = 3,
    MUL_PREV2s = 4,
    MAXs = 5,
    MINs = 6,
    SETEs = 7,
    SETGTs = 8,
    SETGTEs = 9,
    SETNEs = 10,
    FRACs = 11,
    TRUNCs = 12,
    FLOORs = 13,
    EXP_IEEE = 14,
    LOG_CLAMP = 15,
    LOG_IEEE = 16,
    RECIP_CLAMP = 17,
    RECIP_FF = 18,
    RECIP_IEEE = 19,
    RECIPSQ_CLAMP = 20,
    RECIPSQ_FF = 21,
    RECIPSQ_IEEE = 22,
    MOVAs = 23,
    MOVA_FLOORs = 24,
    SUBs = 25,
    SUB_PREVs = 26,
    PRED_SETEs = 27,
    PRED_SETNEs = 28,
    PRED_SETGTs = 29,
    PRED_SETGTEs = 30,
    PRED_SET_INVs = 31,
    PRED_SET_POPs = 32,
    PRED_SET_CLRs = 33,
    PRED_SET_RESTOREs = 34,
    KILLEs = 35,
    KILLGTs = 36,
    KILLGTEs = 37,
    KILLNEs = 38,
    KILLONEs = 39,
    SQRT_IEEE = 40,
    MUL_CONST_0 = 41,
    MUL_CONST_1 = 42,
    ADD_CONST_0 = 43,
    ADD_CONST_1 = 44,
    SUB_CONST_0 = 45,
    SUB_CONST_1 = 46,
    SIN = 47,
    COS = 48,
    RETAIN_PREV = 49,
}

impl VectorOpc {
    pub fn encode(self) -> u32 {
        self as u32
    }
}

impl ScalarOpc {
    pub fn encode(self) -> u32 {
        self as u32
    }
}

impl FetchOpc {
    pub fn encode(self) -> u32 {
        self as u32
    }
}
