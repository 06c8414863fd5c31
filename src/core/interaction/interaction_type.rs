pub type InteractionType = u32;

pub const INTERACTION_NONE: InteractionType = 0;
pub const INTERACTION_D: InteractionType = 1 << 0;
pub const INTERACTION_G: InteractionType = 1 << 1;
pub const INTERACTION_S: InteractionType = 1 << 2;
pub const INTERACTION_L: InteractionType = 1 << 3;
pub const INTERACTION_E: InteractionType = 1 << 4;
pub const INTERACTION_BSDF: InteractionType = INTERACTION_D | INTERACTION_G | INTERACTION_S;
pub const INTERACTION_EMITTER: InteractionType = INTERACTION_L | INTERACTION_E;

#[inline]
pub fn is_specular(t: InteractionType) -> bool {
    return (t & INTERACTION_S) != 0;
}

#[inline]
pub fn is_emitter(t: InteractionType) -> bool {
    return (t & INTERACTION_EMITTER) != 0;
}

/// Letter used in path-type strings such as `LDSE`. Emitter bits win over scattering bits.
pub fn interaction_type_char(t: InteractionType) -> char {
    if (t & INTERACTION_L) != 0 {
        'L'
    } else if (t & INTERACTION_E) != 0 {
        'E'
    } else if (t & INTERACTION_S) != 0 {
        'S'
    } else if (t & INTERACTION_G) != 0 {
        'G'
    } else if (t & INTERACTION_D) != 0 {
        'D'
    } else {
        '?'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_001() {
        assert_eq!(INTERACTION_BSDF & INTERACTION_EMITTER, 0);
        assert!(is_specular(INTERACTION_BSDF));
        assert!(!is_specular(INTERACTION_D | INTERACTION_L));
        assert_eq!(interaction_type_char(INTERACTION_D | INTERACTION_L), 'L');
        assert_eq!(interaction_type_char(INTERACTION_G), 'G');
    }
}
