//! Error type shared by IR construction and assembly.
//!
//! Every bounds check and well-formedness constraint the IR model and
//! emitters enforce surfaces here instead of aborting the process: a
//! `Result` at the API boundary rather than an `assert!`-and-abort.

use core::fmt;

/// Fatal precondition violation or invalid-opcode condition.
///
/// The one non-fatal condition in the assembler (a resolver disagreement
/// between a clause's pre-existing address/count and the freshly computed
/// ones) is not represented here: it is logged via [`log::warn!`] and the
/// computed values win, matching the original warn-and-proceed behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssembleError {
    /// A fixed-capacity container (attributes, constants, samplers,
    /// uniforms, varyings, clauses, instructions, or register operands)
    /// has no room for one more entry.
    CapacityExceeded {
        container: &'static str,
        capacity: usize,
    },
    /// A swizzle string's length did not match what the site requires.
    SwizzleLength { expected: usize, got: usize },
    /// A swizzle string contained a character outside the site's alphabet.
    InvalidSwizzleChar(char),
    /// A register's flag combination is not legal at the site it appears.
    InvalidFlagsForSite { site: &'static str },
    /// A register number exceeded the 6-bit field that encodes it.
    RegisterOutOfRange(u8),
    /// A FETCH constant index exceeded the 4-bit field that encodes it.
    ConstIndexOutOfRange(u8),
    /// A VERTEX FETCH format exceeded the 6-bit field that encodes it.
    FormatOutOfRange(u8),
    /// A VERTEX FETCH stride exceeded the 8-bit field that encodes it.
    StrideOutOfRange(u16),
    /// A clause address or ALLOC size exceeded the 12-bit field that
    /// encodes it.
    AddressOrSizeOutOfRange(u32),
    /// An EXEC/EXEC_END clause held more instructions than the 4-bit
    /// count field can carry.
    InstructionCountOutOfRange(usize),
    /// The destination register of an ALU instruction carried a flag
    /// other than EXPORT.
    DestFlagsNotExportOnly,
    /// A non-destination ALU source register carried the EXPORT flag.
    SourceCarriesExportFlag,
    /// An ALU instruction's scalar destination flags disagreed with its
    /// vector destination flags.
    ScalarDestFlagsMismatch,
    /// The caller-supplied output word buffer was too small for the
    /// assembled shader.
    OutputBufferTooSmall { needed: usize, got: usize },
    /// An instruction was appended to a clause that is not EXEC/EXEC_END.
    NotAnExecClause,
    /// An instruction did not carry the register operands its opcode
    /// requires (e.g. a FETCH missing its source register).
    MissingOperand { site: &'static str },
}

impl fmt::Display for AssembleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded { container, capacity } => {
                write!(f, "{container} has no room left (capacity {capacity})")
            }
            Self::SwizzleLength { expected, got } => {
                write!(f, "swizzle must be {expected} characters, got {got}")
            }
            Self::InvalidSwizzleChar(c) => write!(f, "invalid swizzle character '{c}'"),
            Self::InvalidFlagsForSite { site } => {
                write!(f, "register flags not legal at {site}")
            }
            Self::RegisterOutOfRange(n) => write!(f, "register number {n:#x} exceeds 0x3F"),
            Self::ConstIndexOutOfRange(n) => write!(f, "constant index {n:#x} exceeds 0xF"),
            Self::FormatOutOfRange(n) => write!(f, "fetch format {n:#x} exceeds 0x3F"),
            Self::StrideOutOfRange(n) => write!(f, "fetch stride {n:#x} exceeds 0xFF"),
            Self::AddressOrSizeOutOfRange(n) => {
                write!(f, "clause address/size {n:#x} exceeds 12 bits")
            }
            Self::InstructionCountOutOfRange(n) => {
                write!(f, "clause holds {n} instructions, exceeds 4-bit count field")
            }
            Self::DestFlagsNotExportOnly => {
                write!(f, "ALU destination register may only carry the EXPORT flag")
            }
            Self::SourceCarriesExportFlag => {
                write!(f, "ALU source register may not carry the EXPORT flag")
            }
            Self::ScalarDestFlagsMismatch => {
                write!(f, "ALU scalar destination flags must equal vector destination flags")
            }
            Self::OutputBufferTooSmall { needed, got } => {
                write!(f, "output buffer holds {got} words, {needed} needed")
            }
            Self::NotAnExecClause => write!(f, "instruction appended to a non-EXEC clause"),
            Self::MissingOperand { site } => write!(f, "missing required register operand at {site}"),
        }
    }
}

impl std::error::Error for AssembleError {}
