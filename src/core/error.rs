//! Error taxonomy.
//!
//! Four failure families, none of which terminate the process:
//!
//! - **Content generation**: absorbed at call sites via safe fallbacks,
//!   surfaced here only when a caller asks for the raw result.
//! - **Authentication**: a trade code failed verification or parsing.
//! - **Insufficient resources**: a gated action was refused before any
//!   mutation (currency or item shortage).
//! - **Invariant violation**: a precondition (evolution gate, capture gate,
//!   team state) was not met; the action is refused, nothing changes.

use thiserror::Error;

use crate::trade::TradeError;

/// Errors surfaced by the game facade and engine operations.
#[derive(Debug, Error)]
pub enum GameError {
    /// Currency gate failed. Nothing was deducted.
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: i64, available: i64 },

    /// Item gate failed. Nothing was consumed.
    #[error("out of item '{0}'")]
    OutOfItem(String),

    /// The shop does not sell the requested item.
    #[error("no shop entry for item '{0}'")]
    UnknownItem(String),

    /// Evolution refused: level gate not met.
    #[error("evolution to stage {target_stage} requires level {required}, creature is level {level}")]
    EvolutionLevelTooLow {
        target_stage: u8,
        required: u32,
        level: u32,
    },

    /// Evolution refused: stage 2 is final for non-mythical creatures.
    #[error("creature has reached its final evolution stage")]
    FinalStageReached,

    /// Capture refused: the target still has health remaining.
    #[error("capture requires the target to be defeated first")]
    TargetNotDefeated,

    /// No creature is able to fight.
    #[error("no conscious creature available")]
    TeamUnavailable,

    /// A referenced creature does not exist in storage.
    #[error("unknown creature")]
    UnknownCreature,

    /// A referenced ability is not in the shared pool or not known.
    #[error("unknown ability '{0}'")]
    UnknownAbility(String),

    /// Ability copy refused: source and target share no element.
    #[error("source and target creatures share no element type")]
    IncompatibleElements,

    /// Ability copy refused: the target already knows the ability.
    #[error("target already knows '{0}'")]
    AbilityAlreadyKnown(String),

    /// Trade code rejected.
    #[error(transparent)]
    Trade(#[from] TradeError),
}
