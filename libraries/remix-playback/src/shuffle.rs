//! Shuffle order generation
//!
//! Shuffle never reorders the queue itself. It produces a permutation of
//! queue indices that the queue walks instead of the identity order.

use rand::seq::SliceRandom;
use rand::Rng;

/// Identity playback order for a queue of `len` tracks
pub fn identity_order(len: usize) -> Vec<usize> {
    (0..len).collect()
}

/// Random playback order with `pinned` fixed at position 0
///
/// Fisher-Yates over every index except `pinned`, so turning shuffle on
/// does not jump away from the track that is playing. An out-of-range
/// `pinned` shuffles all indices.
pub fn pinned_permutation<R: Rng + ?Sized>(len: usize, pinned: usize, rng: &mut R) -> Vec<usize> {
    if pinned >= len {
        let mut order = identity_order(len);
        order.shuffle(rng);
        return order;
    }

    let mut rest: Vec<usize> = (0..len).filter(|&i| i != pinned).collect();
    rest.shuffle(rng);

    let mut order = Vec::with_capacity(len);
    order.push(pinned);
    order.extend(rest);
    order
}
