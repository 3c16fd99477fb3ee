//! ALU instruction emitter.
//!
//! The 3-word bitfield layout below is this crate's own design — unlike
//! the CF and FETCH layouts, no bit-exact reference for the ALU word
//! format was available, so this commits to one internally-consistent
//! layout carrying every field the ALU instruction model names:
//!
//! ```text
//! dword0: [0:5]=vector_dest [6]=export_data [7:10]=vector_write_mask
//!         [11:15]=vector_opc [16:21]=src1_reg [22:29]=src1_swiz
//!         [30]=src1_reg_negate [31]=src1_reg_abs
//! dword1: [0:5]=src2_reg [6:13]=src2_swiz [14]=src2_reg_negate
//!         [15]=src2_reg_abs [16]=src1_sel [17]=src2_sel
//!         [18:23]=src3_reg [24:31]=src3_swiz
//! dword2: [0]=src3_reg_negate [1]=src3_reg_abs [2]=src3_sel
//!         [3:8]=scalar_dest [9:12]=scalar_write_mask [13:18]=scalar_opc
//!         [19:31]=reserved, zero
//! ```

use crate::error::AssembleError;
use crate::ir::instr::{AluPayload, Instruction};
use crate::ir::register::Register;
use crate::opcodes::ScalarOpc;
use crate::swizzle;

/// The registers of one ALU instruction, resolved out of its flat
/// operand list. Also used by the shader assembler to feed the same
/// operands through `reg_update_stats` without re-deriving the
/// MULADDv/scalar operand-order logic.
pub(crate) struct Operands<'a> {
    pub dst: &'a Register,
    pub src1: &'a Register,
    pub src2: &'a Register,
    pub src3: Option<&'a Register>,
    pub sdst: Option<&'a Register>,
}

/// Select dst/src1/src2/src3/sdst out of the instruction's flat register
/// list. Order depends on whether the vector opcode is MULADDv and
/// whether a scalar half is present; see the operand ordering table
/// this mirrors.
pub(crate) fn select_operands<'a>(regs: &'a [Register], is_muladdv: bool, has_scalar: bool) -> Result<Operands<'a>, AssembleError> {
    let missing = || AssembleError::MissingOperand { site: "ALU operand" };
    match (is_muladdv, has_scalar) {
        (false, false) => Ok(Operands {
            dst: regs.get(0).ok_or_else(missing)?,
            src1: regs.get(1).ok_or_else(missing)?,
            src2: regs.get(2).ok_or_else(missing)?,
            src3: None,
            sdst: None,
        }),
        (true, false) => Ok(Operands {
            dst: regs.get(0).ok_or_else(missing)?,
            src3: Some(regs.get(1).ok_or_else(missing)?),
            src1: regs.get(2).ok_or_else(missing)?,
            src2: regs.get(3).ok_or_else(missing)?,
            sdst: None,
        }),
        (false, true) => Ok(Operands {
            dst: regs.get(0).ok_or_else(missing)?,
            src1: regs.get(1).ok_or_else(missing)?,
            src2: regs.get(2).ok_or_else(missing)?,
            sdst: Some(regs.get(3).ok_or_else(missing)?),
            src3: Some(regs.get(4).ok_or_else(missing)?),
        }),
        // vector + scalar, MULADDv: the operand-ordering table names six
        // slots (dst, src3, src1, src2, sdst, src3), the last being the
        // scalar half's required 3rd-source operand. It is always the
        // same register as the vector half's src3 (see §4.7's "sdst's
        // src3 must equal the MULADDv's src3"), so rather than reading a
        // distinct 6th slot this reuses regs[1] for both halves,
        // matching the 5-register cap in §3 ("maximum 5 to accommodate
        // ALU with scalar-and-3-src"). See DESIGN.md's Open Question
        // decisions for the full resolution.
        (true, true) => Ok(Operands {
            dst: regs.get(0).ok_or_else(missing)?,
            src3: Some(regs.get(1).ok_or_else(missing)?),
            src1: regs.get(2).ok_or_else(missing)?,
            src2: regs.get(3).ok_or_else(missing)?,
            sdst: Some(regs.get(4).ok_or_else(missing)?),
        }),
    }
}

fn check_constraints(ops: &Operands<'_>) -> Result<(), AssembleError> {
    if !ops.dst.flags.difference(crate::ir::register::RegFlags::EXPORT).is_empty() {
        return Err(AssembleError::DestFlagsNotExportOnly);
    }
    if ops.src1.is_export() || ops.src2.is_export() {
        return Err(AssembleError::SourceCarriesExportFlag);
    }
    if let Some(src3) = ops.src3 {
        if src3.is_export() {
            return Err(AssembleError::SourceCarriesExportFlag);
        }
    }
    if let Some(sdst) = ops.sdst {
        if sdst.flags != ops.dst.flags {
            return Err(AssembleError::ScalarDestFlagsMismatch);
        }
    }
    Ok(())
}

/// Emit one ALU instruction's 3 words.
pub fn emit_alu(instr: &Instruction, payload: &AluPayload, out: &mut [u32; 3]) -> Result<(), AssembleError> {
    let ops = select_operands(instr.regs(), payload.is_muladdv(), payload.scalar_opc.is_some())?;
    check_constraints(&ops)?;

    let mut w0 = 0u32;
    w0 |= ops.dst.num as u32;
    if ops.dst.is_export() {
        w0 |= 1 << 6;
    }
    w0 |= swizzle::alu_dst_write_mask(ops.dst.swizzle())? << 7;
    w0 |= payload.vector_opc.encode() << 11;
    w0 |= (ops.src1.num as u32) << 16;
    w0 |= swizzle::alu_src_swizzle(ops.src1.swizzle())? << 22;
    if ops.src1.is_negate() {
        w0 |= 1 << 30;
    }
    if ops.src1.is_abs() {
        w0 |= 1 << 31;
    }

    let mut w1 = 0u32;
    w1 |= ops.src2.num as u32;
    w1 |= swizzle::alu_src_swizzle(ops.src2.swizzle())? << 6;
    if ops.src2.is_negate() {
        w1 |= 1 << 14;
    }
    if ops.src2.is_abs() {
        w1 |= 1 << 15;
    }
    // `sel` is 1 for register-file operands, 0 for constants — the
    // opposite of how CONST reads in the IR's own flag. Keep the
    // inversion explicit here rather than folding it into `Register`.
    if !ops.src1.is_const() {
        w1 |= 1 << 16;
    }
    if !ops.src2.is_const() {
        w1 |= 1 << 17;
    }
    if let Some(src3) = ops.src3 {
        w1 |= (src3.num as u32) << 18;
        w1 |= swizzle::alu_src_swizzle(src3.swizzle())? << 24;
    }

    let mut w2 = 0u32;
    match ops.src3 {
        Some(src3) => {
            if src3.is_negate() {
                w2 |= 1;
            }
            if src3.is_abs() {
                w2 |= 1 << 1;
            }
            if !src3.is_const() {
                w2 |= 1 << 2;
            }
        }
        // Absent src3's `sel` bit is set, matching the observed default
        // for unused third-source slots.
        None => w2 |= 1 << 2,
    }

    match (ops.sdst, payload.scalar_opc) {
        (Some(sdst), Some(scalar_opc)) => {
            w2 |= (sdst.num as u32) << 3;
            w2 |= swizzle::alu_dst_write_mask(sdst.swizzle())? << 9;
            w2 |= scalar_opc.encode() << 13;
        }
        _ => {
            // No scalar half: scalar opcode defaults to MAXs, matching
            // the reference assembler's observed behavior.
            w2 |= ScalarOpc::MAXs.encode() << 13;
        }
    }

    out[0] = w0;
    out[1] = w1;
    out[2] = w2;
    Ok(())
}
