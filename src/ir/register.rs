//! Register operand: number, flags, and an optional inline swizzle.

use bitflags::bitflags;

use crate::error::AssembleError;

bitflags! {
    /// Flags a register operand may carry. Legal combinations are
    /// site-specific and enforced by the emitters, not by `Register`
    /// itself.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct RegFlags: u8 {
        /// Operand reads a shader constant rather than the register file.
        const CONST = 0b0001;
        /// Operand writes to an export slot (position/color/varying)
        /// rather than the internal register file.
        const EXPORT = 0b0010;
        const NEGATE = 0b0100;
        const ABS = 0b1000;
    }
}

/// A register operand: a number, a flag set, and an optional swizzle
/// string over `{x, y, z, w, 0, 1, _}`. The swizzle's required length
/// (1, 3, or 4 characters) depends on where the register appears in an
/// instruction; `Register` itself only bounds it to 4 characters inline.
#[derive(Clone, Debug)]
pub struct Register {
    pub num: u8,
    pub flags: RegFlags,
    swizzle: Option<heapless::String<4>>,
}

impl Register {
    /// Create a register operand. `num` must fit the 6-bit register
    /// number field; `swizzle`, if present, must be at most 4 characters
    /// (exact length requirements are checked by the encoder at the site
    /// that consumes it).
    pub fn new(num: u8, flags: RegFlags, swizzle: Option<&str>) -> Result<Self, AssembleError> {
        if num > 0x3F {
            return Err(AssembleError::RegisterOutOfRange(num));
        }
        let swizzle = match swizzle {
            Some(s) => {
                let mut buf = heapless::String::new();
                buf.push_str(s).map_err(|_| AssembleError::SwizzleLength {
                    expected: 4,
                    got: s.chars().count(),
                })?;
                Some(buf)
            }
            None => None,
        };
        Ok(Self { num, flags, swizzle })
    }

    pub fn swizzle(&self) -> Option<&str> {
        self.swizzle.as_deref()
    }

    pub fn is_const(&self) -> bool {
        self.flags.contains(RegFlags::CONST)
    }

    pub fn is_export(&self) -> bool {
        self.flags.contains(RegFlags::EXPORT)
    }

    pub fn is_negate(&self) -> bool {
        self.flags.contains(RegFlags::NEGATE)
    }

    pub fn is_abs(&self) -> bool {
        self.flags.contains(RegFlags::ABS)
    }
}
