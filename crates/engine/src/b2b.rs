use stadium_core::SpinType;

/// Flat back-to-back bonus when chaining is off.
pub const BACK_TO_BACK_BONUS: u32 = 1;
pub const BACK_TO_BACK_BONUS_LOG: f64 = 0.8;

/// Logarithmic bonus for a back-to-back streak of `b2b` clears. Only streaks
/// longer than one earn anything.
pub fn chaining_bonus(b2b: u32) -> u32 {
    if b2b <= 1 {
        return 0;
    }
    let chain = f64::from(b2b - 1);
    let log = (chain * BACK_TO_BACK_BONUS_LOG).ln_1p();
    let extra = if chain <= 1.0 {
        0.0
    } else {
        (1.0 + log - log.trunc()) / 3.0
    };
    (f64::from(BACK_TO_BACK_BONUS) * (1.0 + log + extra)) as u32
}

/// Whether a clear keeps the streak alive: quads and any spin do.
pub fn maintains_b2b(lines: u8, spin: SpinType) -> bool {
    lines == 4 || spin != SpinType::None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_bonus_before_second_clear() {
        assert_eq!(chaining_bonus(0), 0);
        assert_eq!(chaining_bonus(1), 0);
    }

    #[test]
    fn test_bonus_grows_slowly() {
        // 1 + ln(1.8) = 1.59
        assert_eq!(chaining_bonus(2), 1);
        // 1 + ln(2.6) + (1 + 0.955) / 3 = 2.61
        assert_eq!(chaining_bonus(3), 2);
        // 1 + ln(9) + (1 + 2.197 - 2) / 3 = 3.59
        assert_eq!(chaining_bonus(11), 3);
    }

    #[test]
    fn test_maintains() {
        assert!(maintains_b2b(4, SpinType::None));
        assert!(maintains_b2b(1, SpinType::Mini));
        assert!(!maintains_b2b(3, SpinType::None));
    }
}
