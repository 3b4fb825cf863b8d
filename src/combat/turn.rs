//! Turn damage resolution.

use crate::core::GameRng;
use crate::creatures::{Ability, Creature};
use crate::elements::TypeChart;

/// Damage variance band: every hit rolls a multiplier in `[0.85, 1.0)`.
pub const DAMAGE_VARIANCE: (f64, f64) = (0.85, 1.0);

/// Resolve one attack, returning the damage dealt.
///
/// The formula:
///
/// ```text
/// damage = floor(eff_atk * power / max(1, eff_def) * U(0.85, 1.0) * type_mult)
/// ```
///
/// - effective attack/defense are the battle overrides when a boost is
///   active, else the base stats;
/// - `power` is the ability's damage value, or `struggle_power` when
///   attacking bare-handed;
/// - the type multiplier applies only when an ability (and hence its
///   element) is known; 0.0 (immunity) is a valid outcome and simply deals
///   no damage.
///
/// The defender's current health is reduced by the damage, clamped at 0.
/// Nothing else changes here: win/loss and combatant switching are the
/// caller's concern, driven by observing health reaching zero.
pub fn resolve_attack(
    attacker: &Creature,
    defender: &mut Creature,
    ability: Option<&Ability>,
    chart: &TypeChart,
    struggle_power: i32,
    rng: &mut GameRng,
) -> i32 {
    let eff_atk = attacker.effective_attack() as f64;
    let eff_def = defender.effective_defense().max(1) as f64;
    let power = ability.map_or(struggle_power, |a| a.damage) as f64;

    let variance = rng.gen_uniform(DAMAGE_VARIANCE.0, DAMAGE_VARIANCE.1);
    let mut damage = eff_atk * power / eff_def * variance;

    if let Some(ability) = ability {
        damage *= chart.effectiveness(
            ability.element,
            defender.element_primary,
            defender.element_secondary,
        );
    }

    let damage = (damage.floor() as i32).max(0);
    defender.battle.current_hp = (defender.battle.current_hp - damage).max(0);
    damage
}
