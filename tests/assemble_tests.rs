//! End-to-end shader assembly scenarios, exercised through the public
//! `Shader::assemble` entry point only.

use a2xx_shader_asm::ir::{AllocType, AluPayload, Cf, FetchPayload, Instruction, RegFlags, Register, Shader};
use a2xx_shader_asm::opcodes::{ScalarOpc, VectorOpc};

fn reg(num: u8, flags: RegFlags, swizzle: Option<&str>) -> Register {
    Register::new(num, flags, swizzle).unwrap()
}

#[test]
fn single_exec_end_vertex_fetch() {
    let mut shader = Shader::new();
    let mut cf = Cf::exec_end();
    let mut fetch = Instruction::new_fetch(false, FetchPayload::vertex(0, true, 0x2, 12).unwrap());
    fetch.add_register(reg(0, RegFlags::empty(), Some("xyzw"))).unwrap();
    fetch.add_register(reg(1, RegFlags::empty(), Some("x"))).unwrap();
    cf.add_instruction(fetch).unwrap();
    shader.add_cf(cf).unwrap();

    let mut out = [0u32; 6];
    let (info, n) = shader.assemble(&mut out).unwrap();
    assert_eq!(n, 6);

    // CF word 0: addr=1 (total clause count 2 / 2), count=1, EXEC_END op.
    let cf_w0 = out[0];
    assert_eq!(cf_w0 & 0xFFF, 1, "address field");
    assert_eq!((cf_w0 >> 12) & 0xF, 1, "count field");
    let cf_w1 = out[1];
    assert_eq!((cf_w1 >> 12) & 0xF, 0x2, "EXEC_END opcode nibble");

    // FETCH words.
    let f_w0 = out[3];
    let f_w1 = out[4];
    let f_w2 = out[5];
    assert_eq!(f_w0 & 0x1F, 0x00, "VERTEX fetch opcode");
    assert_eq!((f_w0 >> 5) & 0x3F, 1, "source register");
    assert_eq!((f_w0 >> 12) & 0x3F, 0, "destination register");
    assert_ne!(f_w0 & (1 << 27), 0, "idx==0 sets word0 bit 27");
    assert_ne!(f_w1 & (1 << 12), 0, "signed flag");
    assert_eq!((f_w1 >> 16) & 0x3F, 0x2, "format field");
    assert_eq!(f_w1 & (1 << 30), 0, "idx==0 does not set word1 bit 30");
    assert_eq!(f_w2, 12, "stride");

    assert_eq!(info.max_reg, 1);
    assert_eq!(info.regs_written, 0b1);
}

#[test]
fn vertex_fetch_idx_greater_than_zero_flips_observed_bits() {
    let mut shader = Shader::new();
    let mut cf = Cf::exec_end();
    for n in 0..2u8 {
        let mut fetch = Instruction::new_fetch(false, FetchPayload::vertex(0, false, 0, 0).unwrap());
        fetch.add_register(reg(n, RegFlags::empty(), Some("xyzw"))).unwrap();
        fetch.add_register(reg(0, RegFlags::empty(), Some("x"))).unwrap();
        cf.add_instruction(fetch).unwrap();
    }
    shader.add_cf(cf).unwrap();

    let mut out = [0u32; 9];
    shader.assemble(&mut out).unwrap();

    // Instruction 0 (idx==0): word0 bit 27 set, word1 bit 30 clear.
    assert_ne!(out[3] & (1 << 27), 0);
    assert_eq!(out[4] & (1 << 30), 0);
    // Instruction 1 (idx==1): word0 bit 27 clear, word1 bit 30 set.
    assert_eq!(out[6] & (1 << 27), 0);
    assert_ne!(out[7] & (1 << 30), 0);
}

#[test]
fn two_clauses_pack_as_one_pair_with_sequential_addresses() {
    let mut shader = Shader::new();

    let mut cf0 = Cf::exec();
    let mut addv = Instruction::new_alu(false, AluPayload::new(VectorOpc::ADDv, None));
    addv.add_register(reg(0, RegFlags::empty(), Some("xyzw"))).unwrap();
    addv.add_register(reg(1, RegFlags::empty(), Some("xyzw"))).unwrap();
    addv.add_register(reg(2, RegFlags::empty(), Some("xyzw"))).unwrap();
    cf0.add_instruction(addv).unwrap();
    shader.add_cf(cf0).unwrap();

    let mut cf1 = Cf::exec_end();
    let mut muladdv = Instruction::new_alu(false, AluPayload::new(VectorOpc::MULADDv, None));
    muladdv.add_register(reg(3, RegFlags::empty(), Some("xyzw"))).unwrap();
    muladdv.add_register(reg(4, RegFlags::empty(), Some("xyzw"))).unwrap();
    muladdv.add_register(reg(0, RegFlags::empty(), Some("xyzw"))).unwrap();
    muladdv.add_register(reg(1, RegFlags::empty(), Some("xyzw"))).unwrap();
    cf1.add_instruction(muladdv).unwrap();
    shader.add_cf(cf1).unwrap();

    let mut out = [0u32; 9];
    shader.assemble(&mut out).unwrap();

    assert_eq!(shader.cfs()[0].as_exec().unwrap().addr, 1);
    assert_eq!(shader.cfs()[0].as_exec().unwrap().sequence, 0);
    assert_eq!(shader.cfs()[1].as_exec().unwrap().addr, 2);
    assert_eq!(shader.cfs()[1].as_exec().unwrap().sequence, 0);
}

#[test]
fn alloc_coord_paired_with_exec_clause() {
    let mut shader = Shader::new();
    shader.add_cf(Cf::alloc(4, AllocType::Coord).unwrap()).unwrap();

    let mut cf = Cf::exec_end();
    for _ in 0..2 {
        let mut addv = Instruction::new_alu(false, AluPayload::new(VectorOpc::ADDv, None));
        addv.add_register(reg(0, RegFlags::empty(), Some("xyzw"))).unwrap();
        addv.add_register(reg(1, RegFlags::empty(), Some("xyzw"))).unwrap();
        addv.add_register(reg(2, RegFlags::empty(), Some("xyzw"))).unwrap();
        cf.add_instruction(addv).unwrap();
    }
    shader.add_cf(cf).unwrap();

    let mut out = [0u32; 9];
    shader.assemble(&mut out).unwrap();

    let w1 = out[1];
    assert_eq!((w1 >> 8) & 0xF, 0x2, "ALLOC coord nibble");
    assert_eq!((w1 >> 12) & 0xF, 0xC, "ALLOC opcode");
    assert_eq!((w1 >> 16) & 0xFFF, 1, "cf2 addr in word1 high half (ALLOC does not advance it)");
    assert_eq!((w1 >> 28) & 0xF, 2, "cf2 count in word1 high half");
    let w2 = out[2];
    assert_eq!(w2 & 0xFFFF, 0, "cf2 sequence");
}

#[test]
fn alu_vector_and_scalar_write_masks() {
    let mut shader = Shader::new();
    let mut cf = Cf::exec_end();
    let mut instr = Instruction::new_alu(false, AluPayload::new(VectorOpc::ADDv, Some(ScalarOpc::ADDs)));
    instr.add_register(reg(0, RegFlags::EXPORT, Some("xyzw"))).unwrap(); // dst
    instr.add_register(reg(1, RegFlags::empty(), Some("xyzw"))).unwrap(); // src1
    instr.add_register(reg(2, RegFlags::empty(), Some("xyzw"))).unwrap(); // src2
    instr.add_register(reg(0, RegFlags::EXPORT, Some("___w"))).unwrap(); // sdst
    instr.add_register(reg(3, RegFlags::empty(), Some("xyzw"))).unwrap(); // src3
    shader.add_cf({
        cf.add_instruction(instr).unwrap();
        cf
    }).unwrap();

    let mut out = [0u32; 6];
    shader.assemble(&mut out).unwrap();

    let alu_w0 = out[3];
    let alu_w2 = out[5];
    assert_eq!((alu_w0 >> 7) & 0xF, 0xF, "vector write-mask for xyzw");
    assert_ne!(alu_w0 & (1 << 6), 0, "export_data set");
    assert_eq!((alu_w2 >> 9) & 0xF, 0x8, "scalar write-mask for ___w");
}

#[test]
fn muladdv_with_scalar_half_sharing_src3() {
    // MULADDv Rdst = Rsrc3 + (Rsrc1 * Rsrc2), plus a scalar half whose
    // required 3rd-source operand is the same Rsrc3 the vector half
    // already reads (spec.md §4.7's "sdst's src3 must equal the
    // MULADDv's src3"). Operand order: dst, src3, src1, src2, sdst.
    let mut shader = Shader::new();
    let mut cf = Cf::exec_end();
    let mut instr = Instruction::new_alu(false, AluPayload::new(VectorOpc::MULADDv, Some(ScalarOpc::ADDs)));
    instr.add_register(reg(0, RegFlags::EXPORT, Some("xyzw"))).unwrap(); // dst
    instr.add_register(reg(4, RegFlags::empty(), Some("xyzw"))).unwrap(); // src3
    instr.add_register(reg(1, RegFlags::empty(), Some("xyzw"))).unwrap(); // src1
    instr.add_register(reg(2, RegFlags::empty(), Some("xyzw"))).unwrap(); // src2
    instr.add_register(reg(0, RegFlags::EXPORT, Some("xyzw"))).unwrap(); // sdst
    cf.add_instruction(instr).unwrap();
    shader.add_cf(cf).unwrap();

    let mut out = [0u32; 6];
    let (info, _) = shader.assemble(&mut out).unwrap();

    let w0 = out[3];
    let w1 = out[4];
    let w2 = out[5];

    assert_eq!(w0 & 0x3F, 0, "vector dest register");
    assert_ne!(w0 & (1 << 6), 0, "export_data set");
    assert_eq!((w0 >> 7) & 0xF, 0xF, "vector write-mask for xyzw");
    assert_eq!((w0 >> 11) & 0x1F, VectorOpc::MULADDv.encode(), "vector opcode");
    assert_eq!((w0 >> 16) & 0x3F, 1, "src1 register");

    assert_eq!(w1 & 0x3F, 2, "src2 register");
    assert_ne!(w1 & (1 << 16), 0, "src1 sel (register file)");
    assert_ne!(w1 & (1 << 17), 0, "src2 sel (register file)");
    assert_eq!((w1 >> 18) & 0x3F, 4, "src3 register shared with vector half");

    assert_ne!(w2 & (1 << 2), 0, "src3 sel (register file)");
    assert_eq!((w2 >> 3) & 0x3F, 0, "scalar dest register");
    assert_eq!((w2 >> 9) & 0xF, 0xF, "scalar write-mask for xyzw");
    assert_eq!((w2 >> 13) & 0x3F, ScalarOpc::ADDs.encode(), "scalar opcode");

    // dst and sdst both carry EXPORT and are excluded from stats; only
    // src3/src1/src2 (R4, R1, R2) touch the register file, all as reads.
    assert_eq!(info.max_reg, 4);
    assert_eq!(info.max_input_reg, 4);
    assert_eq!(info.regs_written, 0);
}

#[test]
fn sample_fetch_with_absent_destination_swizzle() {
    let mut shader = Shader::new();
    let mut cf = Cf::exec_end();
    let mut fetch = Instruction::new_fetch(false, FetchPayload::sample(1).unwrap());
    fetch.add_register(reg(0, RegFlags::empty(), None)).unwrap();
    fetch.add_register(reg(1, RegFlags::empty(), Some("xyz"))).unwrap();
    cf.add_instruction(fetch).unwrap();
    shader.add_cf(cf).unwrap();

    let mut out = [0u32; 6];
    shader.assemble(&mut out).unwrap();

    let w1 = out[4];
    let w2 = out[5];
    assert_eq!(w1 & 0xFFF, 0x688, "absent dst swizzle is the driver default");
    assert_eq!((w1 >> 12) & 0x1FFFF, 0x1ffff, "observed constant block");
    assert_ne!(w2 & (1 << 1), 0, "observed constant bit");
}

#[test]
fn fetch_destination_with_flags_is_rejected() {
    let mut shader = Shader::new();
    let mut cf = Cf::exec_end();
    let mut fetch = Instruction::new_fetch(false, FetchPayload::vertex(0, false, 0, 0).unwrap());
    fetch.add_register(reg(0, RegFlags::EXPORT, Some("xyzw"))).unwrap();
    fetch.add_register(reg(1, RegFlags::empty(), Some("x"))).unwrap();
    cf.add_instruction(fetch).unwrap();
    shader.add_cf(cf).unwrap();

    let mut out = [0u32; 6];
    assert!(shader.assemble(&mut out).is_err());
}

#[test]
fn fetch_source_with_flags_is_rejected() {
    let mut shader = Shader::new();
    let mut cf = Cf::exec_end();
    let mut fetch = Instruction::new_fetch(false, FetchPayload::sample(0).unwrap());
    fetch.add_register(reg(0, RegFlags::empty(), Some("xyzw"))).unwrap();
    fetch.add_register(reg(1, RegFlags::CONST, Some("xyz"))).unwrap();
    cf.add_instruction(fetch).unwrap();
    shader.add_cf(cf).unwrap();

    let mut out = [0u32; 6];
    assert!(shader.assemble(&mut out).is_err());
}

#[test]
fn register_usage_statistics_end_to_end() {
    let mut shader = Shader::new();
    let mut cf = Cf::exec_end();

    // R0 read, R2 written then read, R5 written, const C3 read.
    let mut first = Instruction::new_alu(false, AluPayload::new(VectorOpc::ADDv, None));
    first.add_register(reg(2, RegFlags::empty(), Some("xyzw"))).unwrap(); // dst: R2 written
    first.add_register(reg(0, RegFlags::empty(), Some("xyzw"))).unwrap(); // src1: R0 read
    first.add_register(reg(3, RegFlags::CONST, Some("xyzw"))).unwrap(); // src2: C3 read
    cf.add_instruction(first).unwrap();

    let mut second = Instruction::new_alu(false, AluPayload::new(VectorOpc::ADDv, None));
    second.add_register(reg(5, RegFlags::empty(), Some("xyzw"))).unwrap(); // dst: R5 written
    second.add_register(reg(2, RegFlags::empty(), Some("xyzw"))).unwrap(); // src1: R2 read (written already)
    second.add_register(reg(0, RegFlags::empty(), Some("xyzw"))).unwrap(); // src2: R0 read again
    cf.add_instruction(second).unwrap();
    shader.add_cf(cf).unwrap();

    let mut out = [0u32; 9];
    let (info, _) = shader.assemble(&mut out).unwrap();

    assert_eq!(info.max_reg, 5);
    assert_eq!(info.max_input_reg, 0);
    assert_eq!(info.regs_written, (1 << 2) | (1 << 5));
}
