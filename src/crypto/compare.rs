use subtle::ConstantTimeEq;

/// Compare two byte strings without an early exit on the first differing byte.
///
/// Lengths are treated as public: inputs of different length compare unequal.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
