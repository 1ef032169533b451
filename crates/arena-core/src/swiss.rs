//! Swiss-system pairing: players of equal or nearly equal record meet.

use arena_types::{Pairing, Round, Standing};

/// Pair rank `2k` with rank `2k + 1` in a standings list that is already
/// sorted. With `2n + 1` players the last one is returned as `unpaired`.
pub fn pair_adjacent(standings: &[Standing]) -> Round {
    let mut chunks = standings.chunks_exact(2);
    let pairs = chunks
        .by_ref()
        .map(|pair| Pairing {
            id1: pair[0].id,
            name1: pair[0].name.clone(),
            id2: pair[1].id,
            name2: pair[1].name.clone(),
        })
        .collect();

    Round {
        pairs,
        unpaired: chunks.remainder().first().cloned(),
    }
}
