//! Skill tiering: classifies a 1-10 rating into one of five draft tiers.

/// Highest tier; drafted first.
pub const TOP_TIER: u8 = 5;

/// Tier for a skill rating. 5 is the strongest bucket, 1 the weakest.
pub fn tier(skill: i64) -> u8 {
    if skill >= 8 {
        5
    } else if skill >= 6 {
        4
    } else if skill >= 4 {
        3
    } else if skill >= 2 {
        2
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(tier(10), 5);
        assert_eq!(tier(8), 5);
        assert_eq!(tier(7), 4);
        assert_eq!(tier(6), 4);
        assert_eq!(tier(5), 3);
        assert_eq!(tier(4), 3);
        assert_eq!(tier(3), 2);
        assert_eq!(tier(2), 2);
        assert_eq!(tier(1), 1);
        assert_eq!(tier(0), 1);
    }
}
