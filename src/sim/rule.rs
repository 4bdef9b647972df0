//! Birth/survival rules for outer-totalistic automata
//!
//! A rule is two sets of Moore neighbor counts (0..=8): the counts at which a
//! dead cell is born and the counts at which a live cell survives. Rules are
//! written in the usual `B3/S23` notation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::GridError;

/// Highest possible Moore neighbor count
pub const MAX_NEIGHBORS: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rule {
    birth: [bool; 9],
    survive: [bool; 9],
}

impl Default for Rule {
    fn default() -> Self {
        Self::conway()
    }
}

impl Rule {
    /// Build a rule from explicit neighbor counts
    pub fn new(birth: &[u8], survive: &[u8]) -> Result<Self, GridError> {
        Ok(Self {
            birth: count_set(birth)?,
            survive: count_set(survive)?,
        })
    }

    /// Conway's Game of Life (B3/S23)
    pub fn conway() -> Self {
        Self::from_masks(&[3], &[2, 3])
    }

    /// HighLife (B36/S23)
    pub fn high_life() -> Self {
        Self::from_masks(&[3, 6], &[2, 3])
    }

    /// Seeds (B2/S) - every live cell dies each generation
    pub fn seeds() -> Self {
        Self::from_masks(&[2], &[])
    }

    /// Day & Night (B3678/S34678)
    pub fn day_and_night() -> Self {
        Self::from_masks(&[3, 6, 7, 8], &[3, 4, 6, 7, 8])
    }

    // Presets use counts known to be in range.
    fn from_masks(birth: &[usize], survive: &[usize]) -> Self {
        let mut rule = Self {
            birth: [false; 9],
            survive: [false; 9],
        };
        for &n in birth {
            rule.birth[n] = true;
        }
        for &n in survive {
            rule.survive[n] = true;
        }
        rule
    }

    /// State of a cell in the next generation
    #[inline]
    pub fn next_state(&self, alive: bool, neighbors: u8) -> bool {
        let n = neighbors as usize;
        if n > MAX_NEIGHBORS as usize {
            return false;
        }
        if alive { self.survive[n] } else { self.birth[n] }
    }
}

fn count_set(counts: &[u8]) -> Result<[bool; 9], GridError> {
    let mut set = [false; 9];
    for &n in counts {
        if n > MAX_NEIGHBORS {
            return Err(GridError::InvalidRule(format!(
                "neighbor count {n} exceeds {MAX_NEIGHBORS}"
            )));
        }
        set[n as usize] = true;
    }
    Ok(set)
}

fn parse_counts(digits: &str, notation: &str) -> Result<Vec<u8>, GridError> {
    digits
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) if d <= MAX_NEIGHBORS as u32 => Ok(d as u8),
            _ => Err(GridError::InvalidRule(format!(
                "unexpected '{c}' in \"{notation}\""
            ))),
        })
        .collect()
}

impl FromStr for Rule {
    type Err = GridError;

    /// Parse `B<digits>/S<digits>`, in either order, case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let notation = s.trim();
        let mut birth = None;
        let mut survive = None;

        for part in notation.split('/') {
            let part = part.trim();
            let mut chars = part.chars();
            let slot = match chars.next().map(|c| c.to_ascii_uppercase()) {
                Some('B') => &mut birth,
                Some('S') => &mut survive,
                _ => {
                    return Err(GridError::InvalidRule(format!(
                        "expected B.../S... notation, got \"{notation}\""
                    )));
                }
            };
            if slot.is_some() {
                return Err(GridError::InvalidRule(format!(
                    "duplicate section in \"{notation}\""
                )));
            }
            *slot = Some(parse_counts(chars.as_str(), notation)?);
        }

        match (birth, survive) {
            (Some(birth), Some(survive)) => Self::new(&birth, &survive),
            _ => Err(GridError::InvalidRule(format!(
                "\"{notation}\" needs both a B and an S section"
            ))),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B")?;
        for (n, _) in self.birth.iter().enumerate().filter(|(_, on)| **on) {
            write!(f, "{n}")?;
        }
        write!(f, "/S")?;
        for (n, _) in self.survive.iter().enumerate().filter(|(_, on)| **on) {
            write!(f, "{n}")?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Rule {
    type Error = GridError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rule> for String {
    fn from(rule: Rule) -> Self {
        rule.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conway_table() {
        let rule = Rule::conway();
        for n in 0..=MAX_NEIGHBORS {
            assert_eq!(rule.next_state(true, n), n == 2 || n == 3, "survive on {n}");
            assert_eq!(rule.next_state(false, n), n == 3, "birth on {n}");
        }
    }

    #[test]
    fn test_parse_and_display() {
        let rule: Rule = "B36/S23".parse().unwrap();
        assert_eq!(rule, Rule::high_life());
        assert_eq!(rule.to_string(), "B36/S23");

        // Order and case do not matter
        let rule: Rule = "s23/b3".parse().unwrap();
        assert_eq!(rule, Rule::conway());

        assert_eq!(Rule::seeds().to_string(), "B2/S");
        assert_eq!("B2/S".parse::<Rule>().unwrap(), Rule::seeds());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("B9/S23".parse::<Rule>().is_err());
        assert!("B3".parse::<Rule>().is_err());
        assert!("B3/B3".parse::<Rule>().is_err());
        assert!("X3/S23".parse::<Rule>().is_err());
        assert!("".parse::<Rule>().is_err());
    }

    #[test]
    fn test_new_rejects_large_counts() {
        assert!(matches!(Rule::new(&[3], &[9]), Err(GridError::InvalidRule(_))));
        assert_eq!(Rule::new(&[3], &[2, 3]).unwrap(), Rule::conway());
    }

    #[test]
    fn test_serde_uses_notation() {
        let json = serde_json::to_string(&Rule::day_and_night()).unwrap();
        assert_eq!(json, "\"B3678/S34678\"");
        let back: Rule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rule::day_and_night());
        assert!(serde_json::from_str::<Rule>("\"nonsense\"").is_err());
    }
}
