//! CF (control-flow) emitter: packs a pair of consecutive clauses into 3
//! machine words. The layout is asymmetric by design — clause 1 occupies
//! word 0 and the low half of word 1; clause 2 occupies the high half of
//! word 1 and all of word 2.

use crate::error::AssembleError;
use crate::ir::cf::{AllocType, Cf};

const OP_NOP: u32 = 0x0;
const OP_EXEC: u32 = 0x1;
const OP_EXEC_END: u32 = 0x2;
const OP_ALLOC: u32 = 0xC;

struct Fields {
    addr_or_size: u32,
    count: u32,
    sequence: u16,
    op: u32,
    alloc_nibble: u32,
}

fn check_bits(v: u32, bits: u32, err: impl Fn(u32) -> AssembleError) -> Result<(), AssembleError> {
    if v >= (1 << bits) {
        return Err(err(v));
    }
    Ok(())
}

fn fields_of(cf: &Cf) -> Result<Fields, AssembleError> {
    match cf {
        Cf::Nop => Ok(Fields { addr_or_size: 0, count: 0, sequence: 0, op: OP_NOP, alloc_nibble: 0 }),
        Cf::Exec(e) | Cf::ExecEnd(e) => {
            check_bits(e.addr, 12, AssembleError::AddressOrSizeOutOfRange)?;
            check_bits(e.count, 4, |v| AssembleError::InstructionCountOutOfRange(v as usize))?;
            let op = if matches!(cf, Cf::ExecEnd(_)) { OP_EXEC_END } else { OP_EXEC };
            Ok(Fields { addr_or_size: e.addr, count: e.count, sequence: e.sequence, op, alloc_nibble: 0 })
        }
        Cf::Alloc(a) => {
            check_bits(a.size, 12, AssembleError::AddressOrSizeOutOfRange)?;
            let alloc_nibble = if a.alloc_type == AllocType::Coord { 0x2 } else { 0x4 };
            Ok(Fields { addr_or_size: a.size, count: 0, sequence: 0, op: OP_ALLOC, alloc_nibble })
        }
    }
}

/// Emit the 3-word packing of `cf1` followed by `cf2`.
pub fn emit_pair(cf1: &Cf, cf2: &Cf, out: &mut [u32; 3]) -> Result<(), AssembleError> {
    let f1 = fields_of(cf1)?;
    let f2 = fields_of(cf2)?;

    let mut w0 = 0u32;
    w0 |= f1.addr_or_size & 0xFFF;
    w0 |= (f1.count & 0xF) << 12;
    w0 |= (f1.sequence as u32) << 16;

    let mut w1 = 0u32;
    w1 |= f1.alloc_nibble << 8;
    w1 |= f1.op << 12;
    w1 |= (f2.addr_or_size & 0xFFF) << 16;
    w1 |= (f2.count & 0xF) << 28;

    let mut w2 = 0u32;
    w2 |= f2.sequence as u32;
    w2 |= f2.alloc_nibble << 24;
    w2 |= f2.op << 28;

    out[0] = w0;
    out[1] = w1;
    out[2] = w2;
    Ok(())
}
