//! Ratcliff/Obershelp sequence similarity.
//!
//! The matcher indexes one sequence (`b`, the user's query) once and is
//! then compared against many candidates (`a`). The ratio is
//! `2 * M / (len(a) + len(b))`, where `M` counts the characters in the
//! matching blocks found by repeatedly taking the longest common block and
//! recursing on the pieces to its left and right.

use std::collections::HashMap;

/// Queries at least this long get popular-character pruning.
const POPULAR_MIN_LEN: usize = 200;

/// An indexed sequence ready to be compared against candidates.
#[derive(Debug, Clone)]
pub struct SequenceMatcher {
    b: Vec<char>,
    /// Positions of each non-popular character of `b`, ascending.
    b2j: HashMap<char, Vec<usize>>,
    /// Occurrence counts over all of `b`, popular characters included.
    counts: HashMap<char, usize>,
}

impl SequenceMatcher {
    #[must_use]
    pub fn new(b: &str) -> Self {
        let b: Vec<char> = b.chars().collect();

        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }
        let counts = b2j.iter().map(|(&c, js)| (c, js.len())).collect();

        // Characters that make up more than ~1% of a long query cannot
        // start a match; they only extend one.
        if b.len() >= POPULAR_MIN_LEN {
            let limit = b.len() / 100 + 1;
            b2j.retain(|_, js| js.len() <= limit);
        }

        Self { b, b2j, counts }
    }

    /// Similarity of `a` against the indexed sequence, in `[0, 1]`.
    ///
    /// Two empty sequences are identical and score `1.0`.
    #[must_use]
    pub fn ratio(&self, a: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        ratio_of(self.matching_characters(&a), a.len() + self.b.len())
    }

    /// Upper bound on [`ratio`](Self::ratio) from character multisets.
    #[must_use]
    pub fn quick_ratio(&self, a: &str) -> f64 {
        let mut avail: HashMap<char, isize> = HashMap::new();
        let mut matches = 0;
        let mut len = 0;
        for c in a.chars() {
            len += 1;
            let left = avail
                .entry(c)
                .or_insert_with(|| self.counts.get(&c).map_or(0, |&n| n as isize));
            if *left > 0 {
                matches += 1;
            }
            *left -= 1;
        }
        ratio_of(matches, len + self.b.len())
    }

    /// Upper bound on [`quick_ratio`](Self::quick_ratio) from lengths only.
    #[must_use]
    pub fn real_quick_ratio(&self, a: &str) -> f64 {
        let la = a.chars().count();
        let lb = self.b.len();
        ratio_of(la.min(lb), la + lb)
    }

    /// Total size of all matching blocks between `a` and `b`.
    fn matching_characters(&self, a: &[char]) -> usize {
        let mut total = 0;
        let mut queue = vec![(0, a.len(), 0, self.b.len())];
        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let (i, j, k) = self.find_longest_match(a, alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            total += k;
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                queue.push((i + k, ahi, j + k, bhi));
            }
        }
        total
    }

    /// Longest block `a[i..i+k] == b[j..j+k]` inside the given windows.
    ///
    /// Among equally long blocks the one starting earliest in `a` wins,
    /// then the one starting earliest in `b`.
    fn find_longest_match(
        &self,
        a: &[char],
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let b = &self.b;
        let (mut besti, mut bestj, mut bestsize) = (alo, blo, 0);

        // j2len[j] = length of the longest match ending at a[i-1], b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
            let mut next: HashMap<usize, usize> = HashMap::new();
            if let Some(js) = self.b2j.get(c) {
                for &j in js {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next.insert(j, k);
                    if k > bestsize {
                        besti = i + 1 - k;
                        bestj = j + 1 - k;
                        bestsize = k;
                    }
                }
            }
            j2len = next;
        }

        // Popular characters never seed a block, so grow it over any
        // equal neighbours.
        while besti > alo && bestj > blo && a[besti - 1] == b[bestj - 1] {
            besti -= 1;
            bestj -= 1;
            bestsize += 1;
        }
        while besti + bestsize < ahi
            && bestj + bestsize < bhi
            && a[besti + bestsize] == b[bestj + bestsize]
        {
            bestsize += 1;
        }

        (besti, bestj, bestsize)
    }
}

fn ratio_of(matches: usize, length: usize) -> f64 {
    if length == 0 {
        1.0
    } else {
        2.0 * matches as f64 / length as f64
    }
}

/// One-shot ratio of `a` against `b`.
#[must_use]
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    SequenceMatcher::new(b).ratio(a)
}
