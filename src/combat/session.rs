//! Combat session state.
//!
//! The session is an explicit value passed through the facade: the player's
//! battle copies of their team, the enemy, and a running log. Nothing about
//! the fight lives in ambient globals, and dropping the session discards
//! every transient boost and wound with it.

use crate::core::{GameConfig, GameError, GameRng};
use crate::creatures::{Ability, AbilityPool, Creature};
use crate::elements::TypeChart;

use super::encounter::Encounter;
use super::turn::resolve_attack;

/// Multiplier applied by a consumable stat boost.
pub const BOOST_FACTOR: f64 = 1.5;

/// Which stat a boost item raises.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoostKind {
    Attack,
    Speed,
}

/// One resolved attack, for logging/UI.
#[derive(Clone, Debug)]
pub struct AttackReport {
    pub attacker: String,
    pub move_name: String,
    pub damage: i32,
}

/// State of one combat against one encounter.
#[derive(Clone, Debug)]
pub struct CombatSession {
    /// Battle copies of the fielded team; wounds here never touch storage.
    pub team: Vec<Creature>,
    /// Index of the active team member.
    pub active: usize,
    pub enemy: Creature,
    pub is_boss: bool,
    pub log: Vec<String>,
    struggle_power: i32,
}

impl CombatSession {
    /// Open a session against an encounter.
    ///
    /// `team` must contain at least one conscious creature; the first one
    /// becomes active.
    pub fn new(
        team: Vec<Creature>,
        encounter: Encounter,
        config: &GameConfig,
    ) -> Result<Self, GameError> {
        let active = team
            .iter()
            .position(|c| !c.is_fainted())
            .ok_or(GameError::TeamUnavailable)?;

        let mut session = Self {
            team,
            active,
            enemy: encounter.creature,
            is_boss: encounter.is_boss,
            log: Vec::new(),
            struggle_power: config.struggle_power,
        };
        session.log.push(format!(
            "A wild {} appears (level {})!",
            session.enemy.name, session.enemy.level
        ));
        Ok(session)
    }

    /// The active team member.
    #[must_use]
    pub fn active_creature(&self) -> &Creature {
        &self.team[self.active]
    }

    /// The active team member, mutable.
    pub fn active_creature_mut(&mut self) -> &mut Creature {
        &mut self.team[self.active]
    }

    /// True once the enemy has fainted.
    #[must_use]
    pub fn enemy_defeated(&self) -> bool {
        self.enemy.is_fainted()
    }

    /// True once every team member has fainted.
    #[must_use]
    pub fn team_defeated(&self) -> bool {
        self.team.iter().all(Creature::is_fainted)
    }

    /// Resolve the active creature's attack on the enemy.
    pub fn player_attack(
        &mut self,
        ability: Option<&Ability>,
        chart: &TypeChart,
        rng: &mut GameRng,
    ) -> AttackReport {
        let damage = resolve_attack(
            &self.team[self.active],
            &mut self.enemy,
            ability,
            chart,
            self.struggle_power,
            rng,
        );
        let report = AttackReport {
            attacker: self.team[self.active].name.clone(),
            move_name: ability.map_or_else(|| "Struggle".to_string(), |a| a.name.clone()),
            damage,
        };
        self.log.push(format!(
            "{} uses {} for {} damage!",
            report.attacker, report.move_name, report.damage
        ));
        report
    }

    /// Resolve the enemy's counter-attack on the active creature.
    ///
    /// The enemy picks uniformly among its known abilities, falling back to
    /// a bare-handed strike when it has none (or its names are not in the
    /// pool).
    pub fn enemy_attack(
        &mut self,
        pool: &AbilityPool,
        chart: &TypeChart,
        rng: &mut GameRng,
    ) -> AttackReport {
        let known: Vec<Ability> = pool
            .resolve(self.enemy.abilities.iter().map(String::as_str))
            .cloned()
            .collect();
        let chosen = rng.choose(&known).cloned();

        let damage = resolve_attack(
            &self.enemy,
            &mut self.team[self.active],
            chosen.as_ref(),
            chart,
            self.struggle_power,
            rng,
        );
        let report = AttackReport {
            attacker: self.enemy.name.clone(),
            move_name: chosen.map_or_else(|| "Struggle".to_string(), |a| a.name),
            damage,
        };
        self.log.push(format!(
            "Enemy {} uses {} for {} damage!",
            report.attacker, report.move_name, report.damage
        ));
        report
    }

    /// Switch to the next conscious team member, if any.
    ///
    /// Returns the new active index, or `None` when the team is wiped.
    pub fn switch_to_next_conscious(&mut self) -> Option<usize> {
        let next = self.team.iter().position(|c| !c.is_fainted())?;
        self.active = next;
        self.log.push(format!("Go, {}!", self.team[next].name));
        Some(next)
    }

    /// Apply a consumable boost to the active creature.
    ///
    /// Boosts stack multiplicatively on the current effective stat and live
    /// only in the session's battle state.
    pub fn apply_boost(&mut self, kind: BoostKind) {
        let active = &mut self.team[self.active];
        match kind {
            BoostKind::Attack => {
                let boosted = (active.effective_attack() as f64 * BOOST_FACTOR) as i32;
                active.battle.attack_override = Some(boosted);
            }
            BoostKind::Speed => {
                let boosted = (active.effective_speed() as f64 * BOOST_FACTOR) as i32;
                active.battle.speed_override = Some(boosted);
            }
        }
        self.log.push(format!(
            "{} is boosted (+50% {})!",
            active.name,
            match kind {
                BoostKind::Attack => "attack",
                BoostKind::Speed => "speed",
            }
        ));
    }

    /// Restore the active creature's health to full (potion effect).
    ///
    /// Returns `false` without mutating if the active creature has fainted;
    /// potions do not revive.
    pub fn heal_active(&mut self) -> bool {
        let active = &mut self.team[self.active];
        if active.is_fainted() {
            return false;
        }
        active.battle.current_hp = active.stats.hp_max;
        self.log.push(format!("{} is fully healed!", active.name));
        true
    }

    /// Revive the first fainted team member at full health.
    ///
    /// Returns the revived index, or `None` when no one has fainted.
    pub fn revive_first_fainted(&mut self) -> Option<usize> {
        let index = self.team.iter().position(|c| c.is_fainted())?;
        let creature = &mut self.team[index];
        creature.battle.current_hp = creature.stats.hp_max;
        self.log.push(format!("{} is revived!", creature.name));
        Some(index)
    }
}
