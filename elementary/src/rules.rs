//! Rule catalog: the 256 elementary rules and their numeric identities.

use std::fmt;

use crate::error::{Error, Result};
use crate::grid::State;
use crate::neighborhood::Neighborhood;

/// Number of distinct elementary rules.
pub const RULE_COUNT: u32 = 256;

/// An 8-entry output table, indexed by [`Neighborhood::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rule([State; 8]);

impl Rule {
    /// Builds the table for a rule number. Index 0 holds the most significant bit.
    pub fn from_number(number: u8) -> Self {
        let mut table = [false; 8];
        for (i, out) in table.iter_mut().enumerate() {
            *out = (number >> (7 - i)) & 1 == 1;
        }
        Self(table)
    }

    /// The rule number this table encodes.
    pub fn number(&self) -> u8 {
        self.0.iter().fold(0u8, |acc, &bit| (acc << 1) | bit as u8)
    }

    /// Next state for a neighborhood.
    #[inline]
    pub fn output(&self, neighborhood: Neighborhood) -> State {
        self.0[neighborhood.index()]
    }

    /// Outputs in canonical neighborhood order.
    pub fn table(&self) -> [State; 8] {
        self.0
    }
}

impl TryFrom<&[u8]> for Rule {
    type Error = Error;

    fn try_from(values: &[u8]) -> Result<Self> {
        if values.len() != 8 {
            return Err(Error::malformed(format!("expected 8 entries, got {}", values.len())));
        }
        let mut table = [false; 8];
        for (i, (&v, out)) in values.iter().zip(table.iter_mut()).enumerate() {
            *out = match v {
                0 => false,
                1 => true,
                other => return Err(Error::malformed(format!("entry {i} is {other}, not 0 or 1"))),
            };
        }
        Ok(Self(table))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Looks up the table for `number`, rejecting anything outside `0..=255`.
pub fn rule_table_for(number: u32) -> Result<Rule> {
    u8::try_from(number)
        .map(Rule::from_number)
        .map_err(|_| Error::InvalidRuleNumber(number))
}

/// Derives the rule number of a raw 8-entry table of 0/1 values.
pub fn rule_number_for(table: &[u8]) -> Result<u8> {
    Rule::try_from(table).map(|rule| rule.number())
}

/// Every rule, in numeric order.
pub fn all_rules() -> impl Iterator<Item = Rule> {
    (0..=u8::MAX).map(Rule::from_number)
}

/// Labels used to group rules in a picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curation {
    MostInteresting,
    Interesting,
    Other,
}

impl Curation {
    pub const ALL: [Curation; 3] = [Curation::MostInteresting, Curation::Interesting, Curation::Other];

    pub fn name(self) -> &'static str {
        match self {
            Curation::MostInteresting => "Most interesting",
            Curation::Interesting     => "Interesting",
            Curation::Other           => "Other",
        }
    }
}

/// Rules listed first in a picker: chaotic, fractal or universal behaviour.
pub const MOST_INTERESTING: &[u8] = &[30, 45, 73, 90, 105, 110, 150, 182];

/// Rules with visible structure that are worth a look.
pub const INTERESTING: &[u8] = &[
    18, 22, 26, 54, 57, 60, 62, 94, 102, 122, 126, 129, 137, 146, 161, 169, 193, 195, 225,
];

/// Which group a rule number belongs to.
pub fn curation(number: u8) -> Curation {
    if MOST_INTERESTING.contains(&number) {
        Curation::MostInteresting
    } else if INTERESTING.contains(&number) {
        Curation::Interesting
    } else {
        Curation::Other
    }
}

/// Rule numbers in a group, ascending.
pub fn rules_in(group: Curation) -> Vec<u8> {
    match group {
        Curation::MostInteresting => MOST_INTERESTING.to_vec(),
        Curation::Interesting => INTERESTING.to_vec(),
        Curation::Other => all_rules()
            .map(|rule| rule.number())
            .filter(|&n| curation(n) == Curation::Other)
            .collect(),
    }
}
