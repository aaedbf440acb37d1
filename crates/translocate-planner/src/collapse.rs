//! Route clean-up.
//!
//! A shortest path through a free translocator network often hops onto a
//! translocator end only because it sits on the way, then walks off again
//! without using the link. Those pass-through vertices are removed so the
//! route only names the translocators that are actually taken.

/// Whether `a` and `b` are the two ends of one translocator.
///
/// The route's own `start` and `stop` vertices are never linked.
pub fn are_linked(a: usize, b: usize, start: usize, stop: usize) -> bool {
    if a == start || a == stop || b == start || b == stop {
        return false;
    }
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    hi - lo == 1 && lo % 2 == 0
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Hop {
    Normal,
    PassThrough,
}

/// Remove pass-through vertices from `path` in place.
///
/// A vertex is kept when it is one of the first two, the last one, or
/// linked to its predecessor (both ends of a used translocator are then
/// kept). Applying the collapse twice gives the same result as once.
pub fn collapse_pass_through(path: &mut Vec<usize>, start: usize, stop: usize) {
    let len = path.len();
    if len < 3 {
        return;
    }
    let last = len - 1;
    let mut hops = vec![Hop::Normal; len];
    for i in 2..last {
        if are_linked(path[i], path[i - 1], start, stop) {
            hops[i] = Hop::Normal;
            hops[i - 1] = Hop::Normal;
        } else {
            hops[i] = Hop::PassThrough;
        }
    }

    let mut i = 0;
    path.retain(|_| {
        let keep = hops[i] == Hop::Normal;
        i += 1;
        keep
    });
}
