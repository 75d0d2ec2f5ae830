//! Damage calculation and application.

use crate::state::Monster;

/// Calculate damage from an attack.
///
/// # Formula
///
/// ```text
/// d < a / 2   =>  ceil(a - d)
/// d < a       =>  ceil(5a / 8 - d / 4)
/// otherwise   =>  ceil(a / 4)
/// ```
///
/// Every comparison and quotient is evaluated on exact rationals, so the
/// result never depends on float rounding. Negative results clamp to zero.
///
/// ```
/// use tower_core::combat::calculate_damage;
///
/// assert_eq!(calculate_damage(10, 4), 6);
/// assert_eq!(calculate_damage(10, 7), 5);
/// assert_eq!(calculate_damage(10, 10), 3);
/// ```
pub fn calculate_damage(attack: i64, defense: i64) -> i64 {
    let a = i128::from(attack);
    let d = i128::from(defense);

    let damage = if 2 * d < a {
        a - d
    } else if d < a {
        ceil_div(5 * a - 2 * d, 8)
    } else {
        ceil_div(a, 4)
    };

    damage.clamp(0, i128::from(i64::MAX)) as i64
}

/// Apply damage to a monster. HP may go negative; the sign is what matters.
pub fn apply_damage(target: &mut Monster, damage: i64) {
    target.take_damage(damage);
}

/// Ceiling of `numerator / denominator` for a positive denominator.
fn ceil_div(numerator: i128, denominator: i128) -> i128 {
    -((-numerator).div_euclid(denominator))
}
