pub const COMBO_BONUS: f64 = 0.25;
pub const COMBO_MINIFIER_LOG: f64 = 1.25;

/// Scale garbage by the running combo, truncating the product.
pub fn apply_combo_multiplier(garbage: u32, combo: u32) -> u32 {
    if combo > 1 {
        (f64::from(garbage) * (1.0 + COMBO_BONUS * f64::from(combo - 1))) as u32
    } else {
        garbage
    }
}

/// Long combos send at least a logarithmic floor even from zero-garbage clears.
pub fn apply_combo_floor(garbage: u32, combo: u32) -> u32 {
    if combo > 2 {
        let floor = (f64::from(combo - 1) * COMBO_MINIFIER_LOG).ln_1p() as u32;
        floor.max(garbage)
    } else {
        garbage
    }
}
