//! Game facade.
//!
//! [`Game`] is the single entry point hosts (GUI, CLI, server) talk to. It
//! owns the store, the content generator, the shared ability pool, the trade
//! codec, and the RNG, and sequences every multi-step operation so the
//! gating invariants hold: currency and item checks happen before any
//! mutation, capture requires a defeated target, and evolution validates
//! before the generator is consulted.
//!
//! Combat is the one piece of state handed out: [`Game::start_encounter`]
//! returns a [`CombatSession`] value that the host threads back through the
//! turn methods. Fleeing a fight is simply dropping the session. Persistent
//! state only changes at the explicit sync points (victory experience,
//! capture, purchases).

use uuid::Uuid;

use crate::combat::{generate_encounter, BoostKind, CombatSession};
use crate::content::{ContentGenerator, EvolvedStats, GeneratedStats, StatContext};
use crate::core::{GameConfig, GameError, GameRng};
use crate::creatures::{Ability, AbilityPool, Creature};
use crate::economy::{self, catalog_entry, ItemStack};
use crate::elements::TypeChart;
use crate::progression::{
    apply_evolution, evolution_gate, gain_experience, STAGE_1_GROWTH_BAND, STAGE_2_GROWTH_BAND,
};
use crate::storage::Store;
use crate::trade::{TradeCodec, TradeKey};

/// Result of one full combat turn (player attack plus any counter-attack).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Both sides still stand.
    Continue,
    /// The enemy fainted; experience has been awarded and persisted.
    Victory { xp_awarded: u64, leveled_up: bool },
    /// The counter-attack dropped the active creature. `switched_to` is the
    /// replacement's team index, or `None` when the whole team is down.
    ActiveFainted { switched_to: Option<usize> },
}

/// The game engine facade.
///
/// Generic over the content backend and the storage backend so tests can
/// substitute deterministic doubles for both.
pub struct Game<G: ContentGenerator, S: Store> {
    config: GameConfig,
    generator: G,
    store: S,
    pool: AbilityPool,
    codec: TradeCodec,
    /// Stream for encounter rolls (level, boss, new-vs-clone, variance).
    encounter_rng: GameRng,
    /// Stream for in-combat draws (damage variance, move choice, capture).
    combat_rng: GameRng,
}

impl<G: ContentGenerator, S: Store> Game<G, S> {
    /// Create a game over the given backends.
    ///
    /// The trade key comes from the environment and the RNG from OS
    /// entropy; tests override both with [`Game::with_trade_key`] and
    /// [`Game::with_rng`]. The ability pool is hydrated from storage so
    /// creatures loaded from a previous run can resolve their moves.
    pub fn new(config: GameConfig, generator: G, store: S) -> Self {
        let mut pool = AbilityPool::new();
        for ability in store.abilities() {
            pool.intern(ability);
        }
        let rng = GameRng::from_entropy();
        Self {
            config,
            generator,
            store,
            pool,
            codec: TradeCodec::new(TradeKey::from_env()),
            encounter_rng: rng.for_context("encounter"),
            combat_rng: rng.for_context("combat"),
        }
    }

    /// Replace the RNG (fixed seeds for reproducible play/tests).
    ///
    /// Encounter and combat draws run on independent context streams
    /// derived from the given RNG's seed, so the number of turns a fight
    /// takes never perturbs the next encounter roll.
    #[must_use]
    pub fn with_rng(mut self, rng: GameRng) -> Self {
        self.encounter_rng = rng.for_context("encounter");
        self.combat_rng = rng.for_context("combat");
        self
    }

    /// Replace the trade signing key.
    #[must_use]
    pub fn with_trade_key(mut self, key: TradeKey) -> Self {
        self.codec = TradeCodec::new(key);
        self
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The shared ability pool.
    #[must_use]
    pub fn ability_pool(&self) -> &AbilityPool {
        &self.pool
    }

    /// Current currency balance.
    #[must_use]
    pub fn balance(&self) -> i64 {
        self.store.balance()
    }

    /// All owned creatures in acquisition order.
    #[must_use]
    pub fn roster(&self) -> Vec<Creature> {
        self.store.creatures()
    }

    /// The fielded team: the first `max_team_size` owned creatures.
    #[must_use]
    pub fn team(&self) -> Vec<Creature> {
        let mut team = self.store.creatures();
        team.truncate(self.config.max_team_size);
        team
    }

    /// Inventory lines with stock remaining.
    #[must_use]
    pub fn inventory(&self) -> Vec<ItemStack> {
        self.store.items()
    }

    /// Buy one unit of a shop item.
    pub fn buy_item(&mut self, id: &str) -> Result<(), GameError> {
        let entry = catalog_entry(id).ok_or_else(|| GameError::UnknownItem(id.to_string()))?;
        if !economy::buy_item(&mut self.store, entry.id, entry.cost, entry.category) {
            return Err(GameError::InsufficientFunds {
                needed: entry.cost,
                available: self.store.balance(),
            });
        }
        Ok(())
    }

    /// Draft a fresh level-1 starter from the recruitment shop.
    ///
    /// Deducts the draft cost, generates starter stats, artwork, and a
    /// themed ability set, persists everything, and returns the new
    /// creature. Generation failures degrade to fallbacks after the
    /// currency is committed, same as encounters.
    pub fn draft_creature(&mut self) -> Result<Creature, GameError> {
        if !economy::afford_and_deduct(&mut self.store, self.config.draft_cost) {
            return Err(GameError::InsufficientFunds {
                needed: self.config.draft_cost,
                available: self.store.balance(),
            });
        }

        let stats = self
            .generator
            .generate_stats(1, StatContext::Starter)
            .unwrap_or_else(|e| {
                log::warn!("starter generation failed, using fallback: {e}");
                GeneratedStats::fallback()
            });
        let description = stats.description.clone();
        let mut creature = stats.into_creature(1);

        let key = format!("draft_{}", creature.trade_id);
        match self.generator.generate_artwork(&description, &key) {
            Ok(path) => creature.image_path = Some(path),
            Err(e) => log::warn!("starter artwork failed: {e}"),
        }

        let abilities = self
            .generator
            .generate_abilities(creature.element_primary, self.config.abilities_per_creature)
            .unwrap_or_else(|e| {
                log::warn!("starter abilities failed: {e}");
                Vec::new()
            });
        for generated in abilities {
            let ability = Ability::from(generated);
            self.store.upsert_ability(&ability);
            let name = self.pool.intern(ability);
            creature.abilities.push(name);
        }

        self.store.upsert_creature(&creature);
        log::info!("drafted {} ({})", creature.name, creature.trade_id);
        Ok(creature)
    }

    /// Roll an encounter and open a combat session against it.
    pub fn start_encounter(&mut self) -> Result<CombatSession, GameError> {
        let encounter = generate_encounter(
            &self.store,
            &mut self.generator,
            &mut self.pool,
            &self.config,
            &mut self.encounter_rng,
        );
        CombatSession::new(self.team(), encounter, &self.config)
    }

    /// Play one combat turn: the active creature attacks, then the enemy
    /// counter-attacks if it survived.
    ///
    /// `ability_name` must be a move the active creature knows (and the
    /// pool defines); `None` attacks bare-handed. On victory the enemy
    /// yields `level * xp_per_enemy_level` experience, applied and
    /// persisted immediately.
    pub fn player_turn(
        &mut self,
        session: &mut CombatSession,
        ability_name: Option<&str>,
    ) -> Result<TurnOutcome, GameError> {
        let ability = match ability_name {
            Some(name) => {
                if !session.active_creature().knows_ability(name) {
                    return Err(GameError::UnknownAbility(name.to_string()));
                }
                let ability = self
                    .pool
                    .get(name)
                    .ok_or_else(|| GameError::UnknownAbility(name.to_string()))?;
                Some(ability.clone())
            }
            None => None,
        };

        let chart = TypeChart::global();
        session.player_attack(ability.as_ref(), chart, &mut self.combat_rng);

        if session.enemy_defeated() {
            let xp = u64::from(session.enemy.level) * self.config.xp_per_enemy_level;
            let active = session.active_creature_mut();
            let leveled_up = gain_experience(active, xp);
            self.store.upsert_creature(active);
            return Ok(TurnOutcome::Victory {
                xp_awarded: xp,
                leveled_up,
            });
        }

        session.enemy_attack(&self.pool, chart, &mut self.combat_rng);

        if session.active_creature().is_fainted() {
            let switched_to = session.switch_to_next_conscious();
            return Ok(TurnOutcome::ActiveFainted { switched_to });
        }
        Ok(TurnOutcome::Continue)
    }

    /// Throw a capture ball at the defeated enemy.
    ///
    /// The target must be defeated first; a ball is consumed whether or not
    /// the flat-chance roll succeeds. On success the enemy is restored to
    /// full health and persisted along with its ability definitions.
    pub fn attempt_capture(&mut self, session: &mut CombatSession) -> Result<bool, GameError> {
        if !session.enemy_defeated() {
            return Err(GameError::TargetNotDefeated);
        }
        if !economy::consume_item(&mut self.store, "ball") {
            return Err(GameError::OutOfItem("ball".into()));
        }

        if !self.combat_rng.gen_bool(self.config.capture_success) {
            session.log.push(format!("{} broke free!", session.enemy.name));
            return Ok(false);
        }

        session.enemy.restore();
        for name in session.enemy.abilities.clone() {
            if let Some(ability) = self.pool.get(&name) {
                self.store.upsert_ability(ability);
            }
        }
        self.store.upsert_creature(&session.enemy);
        session
            .log
            .push(format!("{} was captured!", session.enemy.name));
        log::info!("captured {} ({})", session.enemy.name, session.enemy.trade_id);
        Ok(true)
    }

    /// Consume a boost item and apply it to the active creature.
    pub fn use_boost(
        &mut self,
        session: &mut CombatSession,
        kind: BoostKind,
    ) -> Result<(), GameError> {
        let id = match kind {
            BoostKind::Attack => "boost_atk",
            BoostKind::Speed => "boost_spd",
        };
        if !economy::consume_item(&mut self.store, id) {
            return Err(GameError::OutOfItem(id.into()));
        }
        session.apply_boost(kind);
        Ok(())
    }

    /// Consume a potion and fully heal the active creature.
    ///
    /// Returns `Ok(false)` without consuming when the active creature has
    /// fainted (potions do not revive).
    pub fn use_potion(&mut self, session: &mut CombatSession) -> Result<bool, GameError> {
        if session.active_creature().is_fainted() {
            return Ok(false);
        }
        if !economy::consume_item(&mut self.store, "potion") {
            return Err(GameError::OutOfItem("potion".into()));
        }
        session.heal_active();
        Ok(true)
    }

    /// Consume a revive and bring back the first fainted team member.
    ///
    /// Returns `Ok(None)` without consuming when no one has fainted.
    pub fn use_revive(&mut self, session: &mut CombatSession) -> Result<Option<usize>, GameError> {
        if !session.team.iter().any(Creature::is_fainted) {
            return Ok(None);
        }
        if !economy::consume_item(&mut self.store, "revive") {
            return Err(GameError::OutOfItem("revive".into()));
        }
        Ok(session.revive_first_fainted())
    }

    /// Evolve an owned creature to its next stage.
    ///
    /// Validates the level/stage gate, asks the generator for the evolved
    /// form, applies it (stats floored at current values), regenerates
    /// artwork, persists, and returns the updated creature. A generator
    /// failure degrades to minimum band growth rather than blocking the
    /// stage advance.
    pub fn evolve(&mut self, trade_id: Uuid) -> Result<Creature, GameError> {
        let mut creature = self
            .store
            .creature_by_trade_id(trade_id)
            .ok_or(GameError::UnknownCreature)?;

        let target_stage = evolution_gate(&creature)?;

        let evolved = self
            .generator
            .evolve_stats(&creature, creature.evolution_stage)
            .unwrap_or_else(|e| {
                log::warn!("evolution generation failed, using minimum growth: {e}");
                let band = if creature.evolution_stage == 0 {
                    STAGE_1_GROWTH_BAND
                } else {
                    STAGE_2_GROWTH_BAND
                };
                let grown = creature.stats.scaled(band.0);
                EvolvedStats {
                    name: creature.name.clone(),
                    hp_max: grown.hp_max,
                    mp_max: grown.mp_max,
                    attack: grown.attack,
                    defense: grown.defense,
                    speed: grown.speed,
                    description: format!("An evolved form of {}.", creature.name),
                }
            });

        let new_stats = crate::creatures::StatBlock {
            hp_max: evolved.hp_max,
            mp_max: evolved.mp_max,
            attack: evolved.attack,
            defense: evolved.defense,
            speed: evolved.speed,
        };
        apply_evolution(&mut creature, Some(evolved.name), new_stats);

        let key = format!("evo_{}", creature.trade_id);
        match self.generator.generate_artwork(&evolved.description, &key) {
            Ok(path) => creature.image_path = Some(path),
            Err(e) => log::warn!("evolution artwork failed, keeping previous: {e}"),
        }

        self.store.upsert_creature(&creature);
        log::info!(
            "{} evolved to stage {}",
            creature.name,
            target_stage
        );
        Ok(creature)
    }

    /// Export an owned creature as an authenticated trade code.
    pub fn export_creature(&self, trade_id: Uuid) -> Result<String, GameError> {
        let creature = self
            .store
            .creature_by_trade_id(trade_id)
            .ok_or(GameError::UnknownCreature)?;
        Ok(self.codec.encode(&creature)?)
    }

    /// Import a creature from a trade code.
    ///
    /// The code must verify against this game's key. The imported creature
    /// is persisted under a fresh trade identifier so re-importing the same
    /// code yields distinct roster entries rather than silently overwriting.
    pub fn import_creature(&mut self, code: &str) -> Result<Creature, GameError> {
        let mut creature = self.codec.decode(code)?;
        creature.trade_id = Uuid::new_v4();
        self.store.upsert_creature(&creature);
        log::info!("imported {} ({})", creature.name, creature.trade_id);
        Ok(creature)
    }

    /// Copy an ability between two owned, element-compatible creatures.
    ///
    /// Consumes one ability copier. All preconditions are checked before
    /// anything is consumed or written: copier stock, shared element,
    /// source knowledge, and target novelty.
    pub fn copy_ability(
        &mut self,
        source_id: Uuid,
        target_id: Uuid,
        ability_name: &str,
    ) -> Result<(), GameError> {
        let source = self
            .store
            .creature_by_trade_id(source_id)
            .ok_or(GameError::UnknownCreature)?;
        let mut target = self
            .store
            .creature_by_trade_id(target_id)
            .ok_or(GameError::UnknownCreature)?;

        if self.store.item_quantity("ability_copier") == 0 {
            return Err(GameError::OutOfItem("ability_copier".into()));
        }
        if !source.shares_element_with(&target) {
            return Err(GameError::IncompatibleElements);
        }
        if !source.knows_ability(ability_name) {
            return Err(GameError::UnknownAbility(ability_name.to_string()));
        }
        if target.knows_ability(ability_name) {
            return Err(GameError::AbilityAlreadyKnown(ability_name.to_string()));
        }

        // All gates passed; consume and apply.
        economy::consume_item(&mut self.store, "ability_copier");
        target.abilities.push(ability_name.to_string());
        self.store.upsert_creature(&target);
        Ok(())
    }

    /// Wipe the profile back to a fresh start.
    pub fn reset(&mut self) {
        self.store.wipe(self.config.starting_balance);
        self.pool = AbilityPool::new();
        log::info!("profile wiped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FallbackGenerator;
    use crate::storage::MemoryStore;

    fn game() -> Game<FallbackGenerator, MemoryStore> {
        Game::new(
            GameConfig::default(),
            FallbackGenerator,
            MemoryStore::with_balance(1000),
        )
        .with_trade_key(TradeKey::new(*b"test-key"))
        .with_rng(GameRng::new(42))
    }

    #[test]
    fn test_draft_deducts_and_persists() {
        let mut g = game();
        let drafted = g.draft_creature().unwrap();

        assert_eq!(g.balance(), 500);
        assert_eq!(drafted.level, 1);
        assert_eq!(g.roster().len(), 1);
        assert_eq!(g.roster()[0].trade_id, drafted.trade_id);
    }

    #[test]
    fn test_draft_refused_when_broke() {
        let mut g = Game::new(
            GameConfig::default(),
            FallbackGenerator,
            MemoryStore::with_balance(499),
        );
        assert!(matches!(
            g.draft_creature(),
            Err(GameError::InsufficientFunds {
                needed: 500,
                available: 499,
            })
        ));
        assert_eq!(g.balance(), 499);
        assert!(g.roster().is_empty());
    }

    #[test]
    fn test_buy_item_unknown_id() {
        let mut g = game();
        assert!(matches!(
            g.buy_item("elixir"),
            Err(GameError::UnknownItem(_))
        ));
        assert_eq!(g.balance(), 1000);
    }

    #[test]
    fn test_team_caps_at_max_size() {
        let mut g = Game::new(
            GameConfig::default().with_draft_cost(0),
            FallbackGenerator,
            MemoryStore::with_balance(0),
        );
        for _ in 0..5 {
            g.draft_creature().unwrap();
        }
        assert_eq!(g.roster().len(), 5);
        assert_eq!(g.team().len(), 3);
    }

    #[test]
    fn test_capture_gate_requires_defeat() {
        let mut g = game();
        g.draft_creature().unwrap();
        g.buy_item("ball").unwrap();

        let mut session = g.start_encounter().unwrap();
        assert!(!session.enemy_defeated());
        assert!(matches!(
            g.attempt_capture(&mut session),
            Err(GameError::TargetNotDefeated)
        ));
        // The ball survives a refused attempt.
        assert_eq!(g.inventory()[0].quantity, 1);
    }

    #[test]
    fn test_capture_consumes_ball_and_persists() {
        let config = GameConfig::default().with_capture_success(1.0);
        let mut g = Game::new(config, FallbackGenerator, MemoryStore::with_balance(1000))
            .with_rng(GameRng::new(7));
        g.draft_creature().unwrap();
        g.buy_item("ball").unwrap();

        let mut session = g.start_encounter().unwrap();
        session.enemy.battle.current_hp = 0;

        let captured = g.attempt_capture(&mut session).unwrap();
        assert!(captured);
        assert_eq!(g.roster().len(), 2);
        assert!(g.inventory().is_empty());

        // Stored at full health despite being defeated when caught.
        let caught = g
            .roster()
            .into_iter()
            .find(|c| c.trade_id == session.enemy.trade_id)
            .unwrap();
        assert_eq!(caught.battle.current_hp, caught.stats.hp_max);
    }

    #[test]
    fn test_capture_without_ball() {
        let mut g = game();
        g.draft_creature().unwrap();
        let mut session = g.start_encounter().unwrap();
        session.enemy.battle.current_hp = 0;

        assert!(matches!(
            g.attempt_capture(&mut session),
            Err(GameError::OutOfItem(_))
        ));
    }

    #[test]
    fn test_victory_awards_xp_and_persists() {
        let mut g = game();
        let drafted = g.draft_creature().unwrap();

        let mut session = g.start_encounter().unwrap();
        session.enemy.battle.current_hp = 1;
        let enemy_level = session.enemy.level;

        let outcome = g.player_turn(&mut session, None).unwrap();
        match outcome {
            TurnOutcome::Victory { xp_awarded, .. } => {
                assert_eq!(xp_awarded, u64::from(enemy_level) * 10);
            }
            other => panic!("expected victory, got {other:?}"),
        }

        let stored = g
            .roster()
            .into_iter()
            .find(|c| c.trade_id == drafted.trade_id)
            .unwrap();
        assert!(stored.level > 1 || stored.xp > 0);
    }

    #[test]
    fn test_unknown_ability_refused() {
        let mut g = game();
        g.draft_creature().unwrap();
        let mut session = g.start_encounter().unwrap();

        assert!(matches!(
            g.player_turn(&mut session, Some("Nonexistent")),
            Err(GameError::UnknownAbility(_))
        ));
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut g = game();
        let drafted = g.draft_creature().unwrap();

        let code = g.export_creature(drafted.trade_id).unwrap();
        let imported = g.import_creature(&code).unwrap();

        assert_eq!(imported.name, drafted.name);
        assert_ne!(imported.trade_id, drafted.trade_id);
        assert_eq!(g.roster().len(), 2);
    }

    #[test]
    fn test_export_unknown_creature() {
        let g = game();
        assert!(matches!(
            g.export_creature(Uuid::new_v4()),
            Err(GameError::UnknownCreature)
        ));
    }

    #[test]
    fn test_reset_wipes_profile() {
        let mut g = game();
        g.draft_creature().unwrap();
        g.buy_item("potion").unwrap();

        g.reset();
        assert!(g.roster().is_empty());
        assert!(g.inventory().is_empty());
        assert_eq!(g.balance(), 1000);
        assert!(g.ability_pool().is_empty());
    }
}
