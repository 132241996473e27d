//! Constant-time operations to prevent timing attacks
//!
//! Every helper here routes its secret-dependent decision through
//! [`subtle::Choice`], which acts as an optimization barrier: the compiler
//! cannot see through it to reintroduce a branch on the secret bit. Callers
//! that mix these helpers with other secret work should additionally fence
//! with `cryptolib_common::security::barrier::compiler_fence_seq_cst`.
//!
//! Lengths are treated as public. Only contents are protected.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Constant-time comparison of two byte slices
///
/// Returns `true` only if both slices have the same length and the same
/// contents. For equal-length inputs the running time does not depend on the
/// position of the first differing byte. Unequal lengths fail closed.
pub fn ct_eq<A, B>(a: A, b: B) -> bool
where
    A: AsRef<[u8]>,
    B: AsRef<[u8]>,
{
    ct_eq_choice(a, b).into()
}

/// Constant-time equality check that returns a [`Choice`]
pub fn ct_eq_choice<A, B>(a: A, b: B) -> Choice
where
    A: AsRef<[u8]>,
    B: AsRef<[u8]>,
{
    let a = a.as_ref();
    let b = b.as_ref();

    if a.len() != b.len() {
        return Choice::from(0);
    }

    a.ct_eq(b)
}

/// Constant-time selection
///
/// Returns `a` if `flag` is true, `b` otherwise, without branching on `flag`.
pub fn ct_select<T>(flag: bool, a: T, b: T) -> T
where
    T: ConditionallySelectable,
{
    // conditional_select picks its second operand when the choice is set
    T::conditional_select(&b, &a, Choice::from(flag as u8))
}

/// Byte-array selection: `a` if `flag` is true, `b` otherwise
pub fn ct_select_bytes<const N: usize>(flag: bool, a: &[u8; N], b: &[u8; N]) -> [u8; N] {
    let choice = Choice::from(flag as u8);
    let mut out = [0u8; N];
    for (o, (x, y)) in out.iter_mut().zip(a.iter().zip(b.iter())) {
        *o = u8::conditional_select(y, x, choice);
    }
    out
}

/// All-ones mask if `flag` is true, all-zeros otherwise
#[inline(always)]
pub fn ct_mask(flag: bool) -> u8 {
    0u8.wrapping_sub(flag as u8)
}
