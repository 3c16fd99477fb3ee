//! Shader assembler: orchestrates resolve-then-emit and produces the
//! final word stream plus register-usage statistics.

use crate::emit::{alu as emit_alu, cf as emit_cf, fetch as emit_fetch};
use crate::error::AssembleError;
use crate::ir::instr::InstrPayload;
use crate::ir::register::Register;
use crate::ir::shader::{reg_update_stats, Shader, ShaderInfo};
use crate::resolver;

impl Shader {
    /// Assemble this shader into `out`.
    ///
    /// Runs the resolver, then emits every CF-clause pair (3 words each),
    /// then every EXEC/EXEC_END clause's instructions in order (3 words
    /// each). Returns the accumulated register-usage statistics and the
    /// total number of words written.
    ///
    /// An odd clause count is padded with one NOP clause before
    /// emission, per the resolver's precondition.
    pub fn assemble(&mut self, out: &mut [u32]) -> Result<(ShaderInfo, usize), AssembleError> {
        resolver::resolve(self)?;

        let total_instrs: usize = self
            .cfs()
            .iter()
            .filter_map(|cf| cf.as_exec())
            .map(|e| e.instrs_count())
            .sum();
        let needed = 3 * (self.cfs().len() / 2 + total_instrs);
        if out.len() < needed {
            return Err(AssembleError::OutputBufferTooSmall { needed, got: out.len() });
        }

        let mut word_idx = 0usize;
        let cfs = self.cfs();
        let mut i = 0;
        while i < cfs.len() {
            let mut pair = [0u32; 3];
            emit_cf::emit_pair(&cfs[i], &cfs[i + 1], &mut pair)?;
            out[word_idx..word_idx + 3].copy_from_slice(&pair);
            word_idx += 3;
            i += 2;
        }

        let mut info = ShaderInfo::default();
        let mut instr_idx = 0u32;
        for cf in self.cfs() {
            let Some(exec) = cf.as_exec() else { continue };
            for instr in exec.instrs() {
                let mut words = [0u32; 3];
                match &instr.payload {
                    InstrPayload::Fetch(payload) => {
                        emit_fetch::emit_fetch(instr, payload, instr_idx, &mut words)?;
                        update_fetch_stats(&mut info, instr.regs());
                    }
                    InstrPayload::Alu(payload) => {
                        emit_alu::emit_alu(instr, payload, &mut words)?;
                        let ops = emit_alu::select_operands(
                            instr.regs(),
                            payload.is_muladdv(),
                            payload.scalar_opc.is_some(),
                        )?;
                        update_alu_stats(&mut info, &ops);
                    }
                }
                out[word_idx..word_idx + 3].copy_from_slice(&words);
                word_idx += 3;
                instr_idx += 1;
            }
        }

        Ok((info, word_idx))
    }
}

fn update_fetch_stats(info: &mut ShaderInfo, regs: &[Register]) {
    if let Some(dst) = regs.first() {
        reg_update_stats(info, dst, true);
    }
    if let Some(src) = regs.get(1) {
        reg_update_stats(info, src, false);
    }
}

fn update_alu_stats(info: &mut ShaderInfo, ops: &emit_alu::Operands<'_>) {
    reg_update_stats(info, ops.dst, true);
    reg_update_stats(info, ops.src1, false);
    reg_update_stats(info, ops.src2, false);
    if let Some(src3) = ops.src3 {
        reg_update_stats(info, src3, false);
    }
    if let Some(sdst) = ops.sdst {
        reg_update_stats(info, sdst, true);
    }
}
