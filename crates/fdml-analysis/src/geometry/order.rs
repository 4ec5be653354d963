//! Pure transforms over slot sequences: rotation by a progression delta and
//! pairwise exchange. Both preserve the multiset of dancer ids.

/// Rotate `seq` so that `result[i] == seq[(i + shift) % n]`, where the shift
/// is `delta` reduced into `0..n`. Empty sequences are returned unchanged.
pub fn rotate_forward<T: Clone>(seq: &[T], delta: i64) -> Vec<T> {
    let n = seq.len();
    if n == 0 {
        return Vec::new();
    }
    let shift = delta.rem_euclid(n as i64) as usize;
    let mut out = Vec::with_capacity(n);
    out.extend_from_slice(&seq[shift..]);
    out.extend_from_slice(&seq[..shift]);
    out
}

/// Exchange the first occurrences of `a` and `b` in place. A no-op when
/// either is absent or both resolve to the same index.
pub fn apply_swap<T: PartialEq>(seq: &mut [T], a: &T, b: &T) {
    let ia = seq.iter().position(|x| x == a);
    let ib = seq.iter().position(|x| x == b);
    if let (Some(ia), Some(ib)) = (ia, ib) {
        if ia != ib {
            seq.swap(ia, ib);
        }
    }
}

/// Index of `who` in `seq`.
pub fn position_of(seq: &[String], who: &str) -> Option<usize> {
    seq.iter().position(|x| x == who)
}

/// Whether `a` and `b` sit at adjacent indices of `seq`.
pub fn are_adjacent(seq: &[String], a: &str, b: &str) -> bool {
    match (position_of(seq, a), position_of(seq, b)) {
        (Some(ia), Some(ib)) => ia.abs_diff(ib) == 1,
        _ => false,
    }
}
