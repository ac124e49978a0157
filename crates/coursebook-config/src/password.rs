use crate::{env_lookup, parse_or};

/// bcrypt's own default cost.
const DEFAULT_BCRYPT_COST: u32 = 12;

/// bcrypt rejects costs outside this range.
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PasswordConfig {
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }
}

impl PasswordConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let cost = parse_or(&lookup, "BCRYPT_COST", DEFAULT_BCRYPT_COST);
        Self {
            bcrypt_cost: if BCRYPT_COST_RANGE.contains(&cost) {
                cost
            } else {
                DEFAULT_BCRYPT_COST
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::lookup_from;

    #[test]
    fn test_default_cost() {
        assert_eq!(PasswordConfig::from_lookup(lookup_from(&[])).bcrypt_cost, 12);
    }

    #[test]
    fn test_out_of_range_cost_falls_back() {
        let config = PasswordConfig::from_lookup(lookup_from(&[("BCRYPT_COST", "2")]));
        assert_eq!(config.bcrypt_cost, 12);
    }

    #[test]
    fn test_low_cost_for_tests() {
        let config = PasswordConfig::from_lookup(lookup_from(&[("BCRYPT_COST", "4")]));
        assert_eq!(config.bcrypt_cost, 4);
    }
}
