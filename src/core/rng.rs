use crate::core::pbrt::*;

const PCG32_DEFAULT_STATE: u64 = 0x853c49e6748fea9b;
const PCG32_DEFAULT_STREAM: u64 = 0xda3e39cb94b95bdb;
const PCG32_MULT: u64 = 0x5851f42d4c957f2d;

/// Uniform variate source consumed by the mutation engine.
///
/// Replaying the same state replays the same proposal, so implementations must be
/// deterministic given their state.
pub trait Random {
    /// Uniform draw in `[0, 1)`.
    fn next(&mut self) -> Float;

    fn next_2d(&mut self) -> Point2f {
        let u0 = self.next();
        let u1 = self.next();
        return Point2f::new(u0, u1);
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct RNG {
    pub state: u64,
    pub inc: u64,
}

impl RNG {
    pub fn new() -> Self {
        RNG {
            state: PCG32_DEFAULT_STATE,
            inc: PCG32_DEFAULT_STREAM,
        }
    }

    pub fn new_sequence(initseq: u64) -> Self {
        let mut r = Self::new();
        r.set_sequence(initseq);
        return r;
    }

    pub fn set_sequence(&mut self, initseq: u64) {
        self.state = 0;
        self.inc = (initseq << 1) | 1;
        self.uniform_uint32();
        self.state = self.state.wrapping_add(PCG32_DEFAULT_STATE);
        self.uniform_uint32();
    }

    #[inline]
    pub fn uniform_uint32(&mut self) -> u32 {
        let oldstate: u64 = self.state;
        self.state = oldstate.wrapping_mul(PCG32_MULT).wrapping_add(self.inc);
        let xorshifted: u32 = ((oldstate.wrapping_shr(18) ^ oldstate).wrapping_shr(27)) as u32;
        let rot: u32 = (oldstate.wrapping_shr(59)) as u32;
        return (xorshifted.wrapping_shr(rot))
            | (xorshifted.wrapping_shl(((!rot).wrapping_add(1)) & 31));
    }

    #[inline]
    pub fn uniform_float(&mut self) -> Float {
        let f = self.uniform_uint32() as Float * 2.3283064365386963e-10;
        return ONE_MINUS_EPSILON.min(f);
    }
}

impl Default for RNG {
    fn default() -> Self {
        Self::new()
    }
}

impl Random for RNG {
    #[inline]
    fn next(&mut self) -> Float {
        return self.uniform_float();
    }
}
