// core/src/similarity.rs
//
// Ratcliff/Obershelp similarity over bit strings, sharpened by a power.
//
// The ratio is 2·M / (|a| + |b|) where M is the total size of the matching
// blocks found by repeatedly taking the longest common substring and recursing
// on both sides of it. Ties between equally long substrings go to the one that
// ends earliest in `a`, then starts earliest in `b`, so the ratio is stable for
// a given argument order (it is not symmetric in general).

/// Longest common substring of `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Returns `(i, j, size)`; `size == 0` when nothing matches.
fn longest_match(
    a: &[u8],
    b: &[u8],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0usize);
    // run[j + 1] = length of the match ending at a[i - 1], b[j]
    let mut run = vec![0usize; b.len() + 1];
    let mut next = vec![0usize; b.len() + 1];

    for i in alo..ahi {
        for j in blo..bhi {
            if a[i] == b[j] {
                let k = run[j] + 1;
                next[j + 1] = k;
                if k > best_size {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_size = k;
                }
            } else {
                next[j + 1] = 0;
            }
        }
        std::mem::swap(&mut run, &mut next);
    }

    (best_i, best_j, best_size)
}

/// Total number of matched elements across all matching blocks.
fn matched_len(a: &[u8], b: &[u8]) -> usize {
    let mut total = 0;
    let mut stack = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = stack.pop() {
        let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        total += k;
        if alo < i && blo < j {
            stack.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            stack.push((i + k, ahi, j + k, bhi));
        }
    }

    total
}

/// Raw Ratcliff/Obershelp ratio in `[0, 1]`.
pub fn ratio(reference: &str, input: &str) -> f64 {
    let a = reference.as_bytes();
    let b = input.as_bytes();
    let length = a.len() + b.len();
    if length == 0 {
        return 1.0;
    }
    2.0 * matched_len(a, b) as f64 / length as f64
}

/// `ratio` raised to `exponent`; near-misses fall off steeply.
pub fn score(reference: &str, input: &str, exponent: i32) -> f64 {
    ratio(reference, input).powi(exponent)
}

/// Round to `digits` decimals, halves to even (the way Python's `round`
/// treats them), so reported scores agree with the reference tooling.
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round_ties_even() / factor
}
