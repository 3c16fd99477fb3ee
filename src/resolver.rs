//! Resolver: the assembler's first pass.
//!
//! Aligns the clause count to even (appending a NOP if needed), assigns
//! each EXEC/EXEC_END clause its starting instruction-stream address, and
//! computes its 16-bit sequence bitmap. Runs once per [`Shader::assemble`](
//! crate::ir::Shader::assemble) call, before either emit pass.

use crate::error::AssembleError;
use crate::ir::cf::Cf;
use crate::ir::shader::Shader;

/// Run the resolve pass over `shader`, mutating every EXEC/EXEC_END
/// clause's `addr`, `count`, and `sequence` in place.
pub fn resolve(shader: &mut Shader) -> Result<(), AssembleError> {
    if shader.cfs().len() % 2 != 0 {
        shader.push_nop()?;
    }

    let mut addr = (shader.cfs().len() / 2) as u32;
    for (i, cf) in shader.cfs_mut().iter_mut().enumerate() {
        let Cf::Exec(exec) | Cf::ExecEnd(exec) = cf else { continue };

        let count = exec.instrs_count() as u32;
        let mut sequence: u16 = 0;
        for instr in exec.instrs().iter().rev() {
            sequence <<= 2;
            if instr.is_fetch() {
                sequence |= 0b01;
            }
            if instr.sync {
                sequence |= 0b10;
            }
        }

        let had_prior = exec.addr != 0 || exec.count != 0;
        if had_prior && (exec.addr != addr || exec.count != count) {
            log::warn!(
                "resolver: clause {i} preset (addr={}, count={}) disagrees with computed (addr={addr}, count={count}); overwriting",
                exec.addr,
                exec.count,
            );
        }

        exec.addr = addr;
        exec.count = count;
        exec.sequence = sequence;
        addr += count;
    }

    Ok(())
}
