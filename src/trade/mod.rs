//! Authenticated trade codec.
//!
//! A trade code is a transportable text string carrying one creature's
//! persisted state plus an HMAC-SHA256 tag, so codes can be exchanged
//! out-of-band (chat, forums) without letting anyone forge stats.
//!
//! ## Wire format
//!
//! ```text
//! base64( bincode(TradePayload) || HMAC-SHA256(key, bincode(TradePayload)) )
//! ```
//!
//! The payload struct has a fixed field layout, and bincode writes fields
//! in declaration order, so the same logical creature always serializes to
//! identical bytes - the canonicalization the signature depends on. The tag
//! is verified in constant time *before* the payload is parsed; any
//! structural or signature failure yields a typed error and never a
//! partially-populated creature.
//!
//! The codec deliberately has no identity policy: importers assign a fresh
//! trade id before persisting (see `Game::import_creature`).

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;
use uuid::Uuid;

use crate::creatures::{BattleState, Creature, StatBlock};
use crate::elements::Element;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 tag length in bytes.
const TAG_LEN: usize = 32;

/// Default environment variable holding the trade signing key.
pub const TRADE_KEY_ENV: &str = "MENAGERIE_TRADE_KEY";

/// Development-only fallback key, used when the environment provides none.
const DEV_KEY: &[u8] = b"menagerie-dev-trade-key-not-for-production";

/// Errors from trade code verification or parsing.
#[derive(Debug, Error)]
pub enum TradeError {
    /// The code is not valid base64.
    #[error("trade code is not valid base64")]
    Encoding(#[from] base64::DecodeError),

    /// The code decoded but its structure is unusable.
    #[error("trade code is malformed")]
    Malformed,

    /// The authentication tag did not verify.
    #[error("trade code signature mismatch")]
    Signature,

    /// The creature could not be serialized for signing.
    #[error("trade payload could not be serialized")]
    Serialize,
}

/// Secret key for trade code signing.
///
/// Sourced from configuration, not hardcoded at use sites. Production
/// deployments set [`TRADE_KEY_ENV`]; without it a development key is used
/// and a warning is logged.
#[derive(Clone)]
pub struct TradeKey(Vec<u8>);

impl TradeKey {
    /// Create a key from raw bytes.
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Load the key from [`TRADE_KEY_ENV`], falling back to the bundled
    /// development key.
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var(TRADE_KEY_ENV) {
            Ok(key) if !key.is_empty() => Self(key.into_bytes()),
            _ => {
                log::warn!(
                    "{TRADE_KEY_ENV} not set; using development trade key - \
                     codes are forgeable by anyone with this build"
                );
                Self(DEV_KEY.to_vec())
            }
        }
    }
}

impl std::fmt::Debug for TradeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never leak key material through logs.
        write!(f, "TradeKey(..)")
    }
}

/// Canonical persisted fields of a creature.
///
/// Field order is the wire order. Local storage id and battle-transient
/// state are deliberately absent.
#[derive(Serialize, Deserialize)]
struct TradePayload {
    trade_id: Uuid,
    name: String,
    is_mythical: bool,
    element_primary: Element,
    element_secondary: Option<Element>,
    level: u32,
    xp: u64,
    evolution_stage: u8,
    stats: StatBlock,
    image_path: Option<String>,
    abilities: Vec<String>,
}

impl From<&Creature> for TradePayload {
    fn from(c: &Creature) -> Self {
        Self {
            trade_id: c.trade_id,
            name: c.name.clone(),
            is_mythical: c.is_mythical,
            element_primary: c.element_primary,
            element_secondary: c.element_secondary,
            level: c.level,
            xp: c.xp,
            evolution_stage: c.evolution_stage,
            stats: c.stats,
            image_path: c.image_path.clone(),
            abilities: c.abilities.iter().cloned().collect(),
        }
    }
}

impl TradePayload {
    fn into_creature(self) -> Creature {
        let battle = BattleState::full(&self.stats);
        Creature {
            trade_id: self.trade_id,
            storage_id: None,
            name: self.name,
            is_mythical: self.is_mythical,
            element_primary: self.element_primary,
            element_secondary: self.element_secondary,
            level: self.level,
            xp: self.xp,
            evolution_stage: self.evolution_stage,
            stats: self.stats,
            image_path: self.image_path,
            abilities: self.abilities.into_iter().collect(),
            battle,
        }
    }
}

/// Encoder/decoder for authenticated trade codes.
pub struct TradeCodec {
    key: TradeKey,
}

impl TradeCodec {
    /// Create a codec signing with `key`.
    #[must_use]
    pub fn new(key: TradeKey) -> Self {
        Self { key }
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.key.0).expect("HMAC accepts any key length")
    }

    /// Serialize and sign a creature into a transportable text code.
    pub fn encode(&self, creature: &Creature) -> Result<String, TradeError> {
        let payload =
            bincode::serialize(&TradePayload::from(creature)).map_err(|_| TradeError::Serialize)?;

        let mut mac = self.mac();
        mac.update(&payload);
        let tag = mac.finalize().into_bytes();

        let mut bundle = payload;
        bundle.extend_from_slice(&tag);
        Ok(BASE64.encode(bundle))
    }

    /// Verify and parse a trade code back into a creature.
    ///
    /// The embedded tag is recomputed over the extracted payload bytes and
    /// compared in constant time. On any mismatch or parse failure the
    /// result is an error; no partial creature escapes.
    pub fn decode(&self, code: &str) -> Result<Creature, TradeError> {
        let bundle = BASE64.decode(code.trim())?;
        if bundle.len() <= TAG_LEN {
            return Err(TradeError::Malformed);
        }
        let (payload, tag) = bundle.split_at(bundle.len() - TAG_LEN);

        let mut mac = self.mac();
        mac.update(payload);
        // verify_slice is a constant-time comparison.
        mac.verify_slice(tag).map_err(|_| TradeError::Signature)?;

        let payload: TradePayload =
            bincode::deserialize(payload).map_err(|_| TradeError::Malformed)?;
        Ok(payload.into_creature())
    }
}
