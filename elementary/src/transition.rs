//! Row transition: one row of states to the next.

use crate::error::{Error, Result};
use crate::grid::State;
use crate::neighborhood::encode;
use crate::rules::Rule;

/// Derives the row after `prev` under `rule`.
///
/// Both edge cells of the result are always quiescent. Interior cell `i`
/// takes `rule[encode(prev[i-1], prev[i], prev[i+1])]`.
pub fn next_row(prev: &[State], rule: &Rule) -> Result<Vec<State>> {
    if prev.len() < 2 {
        return Err(Error::RowTooShort(prev.len()));
    }
    Ok(derive(prev, rule))
}

/// Infallible form for rows already known to be at least 2 cells long.
pub(crate) fn derive(prev: &[State], rule: &Rule) -> Vec<State> {
    let mut next = vec![false; prev.len()];
    for (i, window) in prev.windows(3).enumerate() {
        next[i + 1] = rule.output(encode(window[0], window[1], window[2]));
    }
    next
}
