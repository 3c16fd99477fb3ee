//! FETCH instruction emitter: packs a VERTEX or SAMPLE load into 3 words.
//!
//! Several bits below are set without a known hardware meaning ("observed
//! constants"); they are reproduced verbatim to stay bit-compatible with
//! existing captures rather than simplified away.

use crate::error::AssembleError;
use crate::ir::instr::{FetchPayload, Instruction};
use crate::opcodes::FetchOpc;
use crate::swizzle;

/// Emit one FETCH instruction's 3 words. `idx` is the instruction's
/// position within the overall instruction stream (monotonically
/// increasing across the whole shader), used only to pick the VERTEX
/// idx==0 bit.
pub fn emit_fetch(instr: &Instruction, payload: &FetchPayload, idx: u32, out: &mut [u32; 3]) -> Result<(), AssembleError> {
    let regs = instr.regs();
    let dst = regs.get(0).ok_or(AssembleError::MissingOperand { site: "FETCH destination" })?;
    let src = regs.get(1).ok_or(AssembleError::MissingOperand { site: "FETCH source" })?;

    if !dst.flags.is_empty() {
        return Err(AssembleError::InvalidFlagsForSite { site: "FETCH destination" });
    }
    if !src.flags.is_empty() {
        return Err(AssembleError::InvalidFlagsForSite { site: "FETCH source" });
    }

    let mut w0 = payload.opc.encode();
    w0 |= (src.num as u32) << 5;
    w0 |= (dst.num as u32) << 12;
    w0 |= (payload.const_index as u32) << 20;

    let mut w1 = swizzle::fetch_dst_swizzle(dst.swizzle())?;
    let mut w2 = 0u32;

    match payload.opc {
        FetchOpc::Vertex => {
            let src_swiz = src.swizzle().ok_or(AssembleError::MissingOperand { site: "VERTEX fetch source swizzle" })?;
            w0 |= swizzle::fetch_src_swizzle(src_swiz, 1)? << 25;
            // Observed constants: these bits are set on every VERTEX
            // fetch regardless of operands.
            w0 |= 1 << 19;
            w0 |= 1 << 24;
            w0 |= 1 << 28;
            if idx == 0 {
                w0 |= 1 << 27;
            }

            if payload.signedness {
                w1 |= 1 << 12;
            }
            w1 |= (payload.format as u32) << 16;
            w1 |= 1 << 13;
            if idx > 0 {
                w1 |= 1 << 30;
            }

            w2 |= payload.stride as u32;
        }
        FetchOpc::Sample => {
            let src_swiz = src.swizzle().ok_or(AssembleError::MissingOperand { site: "SAMPLE fetch source swizzle" })?;
            w0 |= swizzle::fetch_src_swizzle(src_swiz, 3)? << 26;
            w1 |= 0x1ffff << 12;
            w2 |= 1 << 1;
        }
    }

    out[0] = w0;
    out[1] = w1;
    out[2] = w2;
    Ok(())
}
