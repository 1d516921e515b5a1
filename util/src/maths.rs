//! Utility maths functions

/// Calculates the least nonnegative remainder of `lhs (mod rhs)` for signed
/// indices.
///
/// Returns `None` if `rhs` is zero, as there is no range to wrap into.
pub fn wrap_index(lhs: i64, rhs: usize) -> Option<usize> {
    if rhs == 0 {
        return None;
    }

    // Widen so that neither the length nor the offset can overflow
    let rhs = rhs as i128;
    let r = ((lhs as i128 % rhs) + rhs) % rhs;

    Some(r as usize)
}

/// Offset an index by `delta` and wrap it back into `[0, len)`.
pub fn offset_index(index: usize, delta: i64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }

    let wrapped_delta = wrap_index(delta, len)?;

    Some((index % len + wrapped_delta) % len)
}
