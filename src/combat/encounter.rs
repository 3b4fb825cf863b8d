//! Encounter generation.
//!
//! One invocation produces one opposing creature, either freshly generated
//! by the content backend or cloned from the player's persistent pool and
//! rescaled to the rolled level. Generation failures degrade to the
//! fallback creature; an encounter roll never crashes.

use uuid::Uuid;

use crate::content::{ContentGenerator, GeneratedStats, StatContext, PLACEHOLDER_ARTWORK};
use crate::core::{GameConfig, GameRng};
use crate::creatures::{Ability, AbilityPool, Creature};
use crate::storage::Store;

/// Per-level exponential scaling applied when cloning a template at a
/// different level than it was stored at.
pub const CLONE_LEVEL_SCALING: f64 = 1.05;

/// Stat variance band for cloned encounters: each of hp/attack/defense/
/// speed draws independently in `[0.9, 1.1)`.
pub const CLONE_VARIANCE: (f64, f64) = (0.9, 1.1);

/// One generated opposing creature.
#[derive(Clone, Debug)]
pub struct Encounter {
    pub creature: Creature,
    /// Boss encounters are only ever freshly generated; clones of stored
    /// creatures never carry the boss flag.
    pub is_boss: bool,
}

/// Roll one encounter.
///
/// 1. Encounter level uniform in the configured range.
/// 2. Boss roll at the configured probability.
/// 3. With probability `1/(N+1)` (N = stored creature count; always when
///    N = 0) generate a brand-new creature, otherwise clone a uniformly
///    random stored one as a template.
///
/// New creatures get generator stats (bosses: forced mythical and stats
/// multiplied), artwork, and a themed ability set interned into the shared
/// pool. Clones are rescaled by `1.05^(level - template level)` on
/// hp/attack, re-leveled, and perturbed independently per stat for build
/// diversity. Either way the result is an ephemeral value with a fresh
/// trade id and full health.
pub fn generate_encounter<S, G>(
    store: &S,
    generator: &mut G,
    pool: &mut AbilityPool,
    config: &GameConfig,
    rng: &mut GameRng,
) -> Encounter
where
    S: Store + ?Sized,
    G: ContentGenerator + ?Sized,
{
    let level = rng.gen_level(config.encounter_level_min..=config.encounter_level_max);
    let is_boss = rng.gen_bool(config.boss_probability);

    let count = store.creature_count();
    let new_chance = 1.0 / (count as f64 + 1.0);

    if count == 0 || rng.gen_bool(new_chance) {
        generate_new(level, is_boss, generator, pool, config)
    } else {
        clone_existing(level, store, rng)
    }
}

fn generate_new<G>(
    level: u32,
    is_boss: bool,
    generator: &mut G,
    pool: &mut AbilityPool,
    config: &GameConfig,
) -> Encounter
where
    G: ContentGenerator + ?Sized,
{
    let context = if is_boss {
        StatContext::Boss
    } else {
        StatContext::Wild
    };

    let mut stats = generator.generate_stats(level, context).unwrap_or_else(|e| {
        log::warn!("stat generation failed, using fallback: {e}");
        GeneratedStats::fallback()
    });

    if is_boss {
        stats.is_mythical = true;
        let m = config.boss_stat_multiplier;
        stats.hp_max *= m;
        stats.attack *= m;
        stats.defense *= m;
        stats.speed *= m;
    }

    let description = stats.description.clone();
    let mut creature = stats.into_creature(level);

    let key = format!("wild_{}", creature.trade_id);
    creature.image_path = Some(
        generator
            .generate_artwork(&description, &key)
            .unwrap_or_else(|e| {
                log::warn!("artwork generation failed, using placeholder: {e}");
                PLACEHOLDER_ARTWORK.to_string()
            }),
    );

    let generated = generator
        .generate_abilities(creature.element_primary, config.abilities_per_creature)
        .unwrap_or_else(|e| {
            log::warn!("ability generation failed, encounter fights bare-handed: {e}");
            Vec::new()
        });
    for ability in generated {
        let name = pool.intern(Ability::from(ability));
        creature.abilities.push(name);
    }

    creature.restore();
    Encounter { creature, is_boss }
}

fn clone_existing<S>(level: u32, store: &S, rng: &mut GameRng) -> Encounter
where
    S: Store + ?Sized,
{
    let owned = store.creatures();
    let template = match rng.choose(&owned) {
        Some(t) => t,
        None => {
            // Pool emptied between count and fetch; fall back to a fresh
            // minimal creature rather than crash.
            log::warn!("creature pool empty during clone, using fallback");
            let creature = GeneratedStats::fallback().into_creature(level);
            return Encounter {
                creature,
                is_boss: false,
            };
        }
    };

    let mut clone = template.clone();
    // Ephemeral identity: never persistable under the template's trade id.
    clone.trade_id = Uuid::new_v4();
    clone.storage_id = None;

    let level_diff = level as i32 - template.level as i32;
    let growth = CLONE_LEVEL_SCALING.powi(level_diff);
    clone.stats.hp_max = ((clone.stats.hp_max as f64 * growth) as i32).max(1);
    clone.stats.attack = ((clone.stats.attack as f64 * growth) as i32).max(1);
    clone.level = level;

    // Independent variance per stat creates build diversity among clones.
    let vary = |v: i32, rng: &mut GameRng| {
        ((v as f64 * rng.gen_uniform(CLONE_VARIANCE.0, CLONE_VARIANCE.1)) as i32).max(1)
    };
    clone.stats.hp_max = vary(clone.stats.hp_max, rng);
    clone.stats.attack = vary(clone.stats.attack, rng);
    clone.stats.defense = vary(clone.stats.defense, rng);
    clone.stats.speed = vary(clone.stats.speed, rng);

    clone.restore();
    Encounter {
        creature: clone,
        is_boss: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentError, FallbackGenerator};
    use crate::creatures::StatBlock;
    use crate::elements::Element;
    use crate::storage::MemoryStore;

    /// Generator that always fails, for exercising fallback paths.
    struct BrokenGenerator;

    impl ContentGenerator for BrokenGenerator {
        fn generate_stats(
            &mut self,
            _level: u32,
            _context: StatContext,
        ) -> Result<GeneratedStats, ContentError> {
            Err(ContentError::Unavailable("offline".into()))
        }

        fn generate_abilities(
            &mut self,
            _element: Element,
            _count: usize,
        ) -> Result<Vec<crate::content::GeneratedAbility>, ContentError> {
            Err(ContentError::Unavailable("offline".into()))
        }

        fn generate_artwork(
            &mut self,
            _description: &str,
            _key: &str,
        ) -> Result<String, ContentError> {
            Err(ContentError::Unavailable("offline".into()))
        }

        fn evolve_stats(
            &mut self,
            _creature: &Creature,
            _stage: u8,
        ) -> Result<crate::content::EvolvedStats, ContentError> {
            Err(ContentError::Unavailable("offline".into()))
        }
    }

    fn stored_creature(name: &str, level: u32) -> Creature {
        Creature::new(
            name,
            Element::Plant,
            level,
            StatBlock {
                hp_max: 80,
                mp_max: 20,
                attack: 16,
                defense: 14,
                speed: 12,
            },
        )
    }

    #[test]
    fn test_empty_pool_always_generates_new() {
        let store = MemoryStore::new();
        let mut generator = FallbackGenerator;
        let mut pool = AbilityPool::new();
        let config = GameConfig::default();

        for seed in 0..20 {
            let mut rng = GameRng::new(seed);
            let enc = generate_encounter(&store, &mut generator, &mut pool, &config, &mut rng);
            assert_eq!(enc.creature.name, "Glitch");
        }
    }

    #[test]
    fn test_encounter_level_in_range() {
        let store = MemoryStore::new();
        let mut generator = FallbackGenerator;
        let mut pool = AbilityPool::new();
        let config = GameConfig::default();

        for seed in 0..50 {
            let mut rng = GameRng::new(seed);
            let enc = generate_encounter(&store, &mut generator, &mut pool, &config, &mut rng);
            assert!((2..=80).contains(&enc.creature.level));
        }
    }

    #[test]
    fn test_encounter_is_battle_ready() {
        let store = MemoryStore::new();
        let mut generator = FallbackGenerator;
        let mut pool = AbilityPool::new();
        let config = GameConfig::default();
        let mut rng = GameRng::new(5);

        let enc = generate_encounter(&store, &mut generator, &mut pool, &config, &mut rng);
        assert_eq!(enc.creature.battle.current_hp, enc.creature.stats.hp_max);
        assert!(enc.creature.stats.hp_max > 0);
    }

    #[test]
    fn test_broken_generator_falls_back() {
        let store = MemoryStore::new();
        let mut generator = BrokenGenerator;
        let mut pool = AbilityPool::new();
        let config = GameConfig::default();
        let mut rng = GameRng::new(9);

        let enc = generate_encounter(&store, &mut generator, &mut pool, &config, &mut rng);
        assert_eq!(enc.creature.name, "Glitch");
        assert_eq!(
            enc.creature.image_path.as_deref(),
            Some(PLACEHOLDER_ARTWORK)
        );
        assert!(enc.creature.abilities.is_empty());
    }

    #[test]
    fn test_boss_multiplies_stats_and_forces_mythical() {
        let store = MemoryStore::new();
        let mut generator = FallbackGenerator;
        let mut pool = AbilityPool::new();
        // Force every roll to be a boss.
        let config = GameConfig::default().with_boss_probability(1.0);
        let mut rng = GameRng::new(3);

        let enc = generate_encounter(&store, &mut generator, &mut pool, &config, &mut rng);
        assert!(enc.is_boss);
        assert!(enc.creature.is_mythical);
        // Fallback stats are 20/5/5/5, so x10 is exact.
        assert_eq!(enc.creature.stats.hp_max, 200);
        assert_eq!(enc.creature.stats.attack, 50);
        assert_eq!(enc.creature.stats.defense, 50);
        assert_eq!(enc.creature.stats.speed, 50);
        // mp is not boss-boosted.
        assert_eq!(enc.creature.stats.mp_max, 10);
    }

    #[test]
    fn test_clone_is_ephemeral_and_rescaled() {
        let mut store = MemoryStore::new();
        let template = stored_creature("Template", 10);
        store.upsert_creature(&template);

        let mut generator = FallbackGenerator;
        let mut pool = AbilityPool::new();
        let config = GameConfig::default();

        // Find a seed whose roll clones rather than generates.
        for seed in 0..200 {
            let mut rng = GameRng::new(seed);
            let enc = generate_encounter(&store, &mut generator, &mut pool, &config, &mut rng);
            if enc.creature.name == "Template" {
                assert_ne!(enc.creature.trade_id, template.trade_id);
                assert_eq!(enc.creature.storage_id, None);
                assert!(!enc.is_boss);
                assert!((2..=80).contains(&enc.creature.level));
                assert!(enc.creature.stats.hp_max >= 1);
                assert_eq!(enc.creature.battle.current_hp, enc.creature.stats.hp_max);
                return;
            }
        }
        panic!("no seed produced a cloned encounter");
    }

    #[test]
    fn test_generated_abilities_are_interned() {
        use crate::content::GeneratedAbility;

        /// Generator producing a fixed ability list.
        struct AbilityGenerator;

        impl ContentGenerator for AbilityGenerator {
            fn generate_stats(
                &mut self,
                _level: u32,
                _context: StatContext,
            ) -> Result<GeneratedStats, ContentError> {
                Ok(GeneratedStats::fallback())
            }

            fn generate_abilities(
                &mut self,
                element: Element,
                count: usize,
            ) -> Result<Vec<GeneratedAbility>, ContentError> {
                Ok((0..count)
                    .map(|i| GeneratedAbility {
                        name: format!("Move {i}"),
                        description: String::new(),
                        element,
                        damage: 10,
                        heal: 0,
                        cost_mp: 0,
                        cost_hp: 0,
                        cooldown_local: 0,
                        cooldown_global: 0,
                        stun_duration: 0,
                        drain_percent: 0,
                        is_legendary: false,
                        visual_description: String::new(),
                    })
                    .collect())
            }

            fn generate_artwork(
                &mut self,
                _description: &str,
                _key: &str,
            ) -> Result<String, ContentError> {
                Ok("art.png".into())
            }

            fn evolve_stats(
                &mut self,
                _creature: &Creature,
                _stage: u8,
            ) -> Result<crate::content::EvolvedStats, ContentError> {
                Err(ContentError::Unavailable("n/a".into()))
            }
        }

        let store = MemoryStore::new();
        let mut generator = AbilityGenerator;
        let mut pool = AbilityPool::new();
        let config = GameConfig::default();
        let mut rng = GameRng::new(1);

        let enc = generate_encounter(&store, &mut generator, &mut pool, &config, &mut rng);
        assert_eq!(enc.creature.abilities.len(), 4);
        assert_eq!(pool.len(), 4);
        assert!(pool.contains("Move 0"));
    }
}
