//! Relators of a rank-4 Coxeter presentation

use crate::words::Word;

/// Expand the upper triangle of a Coxeter matrix into relator words.
///
/// `cartan` holds the six entries `(c12, c13, c14, c23, c24, c34)`; for
/// each unordered pair `(i, j)` the relator is `(i j)^c_ij`, which must
/// equal the identity. The diagonal (each reflection squaring to the
/// identity) is implicit in how the enumeration creates generator edges
/// as mutual pairs.
///
/// Relators come back sorted by ascending length: tracing short relators
/// first collapses vertices sooner and keeps the enumeration small. This
/// is purely a performance heuristic.
///
/// No validation happens here; entries below 2 do not describe a proper
/// Coxeter system and show up downstream as runaway enumeration growth.
pub fn coxeter_relators(cartan: &[usize; 6]) -> Vec<Word> {
    let mut words = Vec::with_capacity(6);
    let mut w = 0;
    for i in 0..3 {
        for j in i + 1..4 {
            let mut word = Word::with_capacity(2 * cartan[w]);
            for _ in 0..cartan[w] {
                word.push(i);
                word.push(j);
            }
            words.push(word);
            w += 1;
        }
    }
    words.sort_by_key(|word| word.len());
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relator_shapes() {
        let words = coxeter_relators(&[3, 2, 2, 4, 2, 3]);
        assert_eq!(words.len(), 6);
        let lengths: Vec<usize> = words.iter().map(|w| w.len()).collect();
        assert_eq!(lengths, vec![4, 4, 4, 6, 6, 8]);
    }

    #[test]
    fn test_relator_alternates() {
        let words = coxeter_relators(&[2, 2, 2, 2, 2, 2]);
        for word in &words {
            assert_eq!(word.len(), 4);
            let (i, j) = (word[0], word[1]);
            assert_ne!(i, j);
            assert_eq!(word, &vec![i, j, i, j]);
        }
    }

    #[test]
    fn test_all_pairs_present() {
        let words = coxeter_relators(&[5, 2, 2, 3, 2, 3]);
        let mut pairs: Vec<(usize, usize)> =
            words.iter().map(|w| (w[0].min(w[1]), w[0].max(w[1]))).collect();
        pairs.sort_unstable();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    }
}
