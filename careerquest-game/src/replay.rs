//! Short replay codes that recreate a run's seed.
//! Code format: `<TRACK>-<WORD><NN>`, e.g. `AN-OFFER42`, `AI-TENSOR07`.
//!
//! Only the low 16 bits of a seed survive encoding, so parsing yields the
//! canonical seed for the code rather than the original one. Encoding that
//! canonical seed gives back the same code.

use crate::profile::ProfessionalTrack;

const DOMAIN_TAG: &[u8; 7] = b"CAREER-";
const WORD_MASK: u16 = 0x01FF;
const NN_MASK: u16 = 0x7F;

pub const WORD_LIST: [&str; 64] = [
    "OFFER", "RESUME", "LEDGER", "QUERY", "PANDAS", "TENSOR", "VECTOR", "KERNEL", "COMMIT",
    "BRANCH", "MERGE", "DEPLOY", "SPRINT", "STANDUP", "BACKLOG", "TICKET", "REVIEW", "PIVOT",
    "JOIN", "INDEX", "SCHEMA", "METRIC", "SIGNAL", "MODEL", "TOKEN", "PROMPT", "EPOCH", "BATCH",
    "GRADIENT", "LATENCY", "CACHE", "QUEUE", "BADGE", "LANYARD", "COFFEE", "REFERRAL", "NETWORK",
    "PROFILE", "PORTFOL", "SALARY", "EQUITY", "BONUS", "RECRUIT", "SCREEN", "PANEL", "WHITEBRD",
    "TAKEHOME", "ONSITE", "HANDSHK", "CONTRACT", "RUNWAY", "SAVINGS", "HUSTLE", "MENTOR", "ALUMNI",
    "CAREER", "LADDER", "PROMO", "INTERN", "JUNIOR", "SENIOR", "STAFF", "HIRED", "LAUNCH",
];

fn fnv1a64(bytes: &[u8]) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0100_0000_01b3;
    let mut hash = FNV_OFFSET;
    for b in bytes {
        hash = (hash ^ u64::from(*b)).wrapping_mul(FNV_PRIME);
    }
    hash
}

fn sanitize_word(word: &str) -> String {
    word.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

const fn track_prefix(track: ProfessionalTrack) -> &'static str {
    match track {
        ProfessionalTrack::Analyst => "AN",
        ProfessionalTrack::Engineer => "EN",
        ProfessionalTrack::AiEngineer => "AI",
    }
}

fn track_from_prefix(prefix: &str) -> Option<ProfessionalTrack> {
    let upper = prefix.to_ascii_uppercase();
    ProfessionalTrack::ALL
        .into_iter()
        .find(|track| track_prefix(*track) == upper)
}

fn pack(word_index: u16, nn: u8) -> u16 {
    (word_index & WORD_MASK) | ((u16::from(nn) & NN_MASK) << 9)
}

fn unpack(packed: u16) -> (u16, u8) {
    let nn = u8::try_from((packed >> 9) & NN_MASK).unwrap_or(0);
    (packed & WORD_MASK, nn)
}

fn compose_seed(track: ProfessionalTrack, word_index: u16, nn: u8) -> u64 {
    let packed = pack(word_index, nn);
    let [lo, hi] = packed.to_le_bytes();
    let mut buf = [0_u8; 11];
    buf[..7].copy_from_slice(DOMAIN_TAG);
    buf[7..9].copy_from_slice(track_prefix(track).as_bytes());
    buf[9] = lo;
    buf[10] = hi;
    let h = fnv1a64(&buf);
    (h & 0xFFFF_FFFF_FFFF_0000) | u64::from(packed)
}

/// Render the replay code for a track and seed.
#[must_use]
pub fn encode_replay_code(track: ProfessionalTrack, seed: u64) -> String {
    let low = u16::try_from(seed & 0xFFFF).unwrap_or(0);
    let (wi, nn) = unpack(low);
    let word = WORD_LIST
        .get(usize::from(wi))
        .copied()
        .unwrap_or(WORD_LIST[0]);
    let prefix = track_prefix(track);
    format!("{prefix}-{word}{:02}", nn % 100)
}

/// Parse a replay code into its track and canonical seed.
#[must_use]
pub fn parse_replay_code(code: &str) -> Option<(ProfessionalTrack, u64)> {
    let (prefix, rest) = code.trim().split_once('-')?;
    let track = track_from_prefix(prefix)?;
    if rest.len() < 3 || !rest.is_ascii() {
        return None;
    }
    let (word_part, nn_part) = rest.split_at(rest.len() - 2);
    let nn: u8 = nn_part.parse().ok()?;
    let word = sanitize_word(word_part);
    let idx = WORD_LIST.iter().position(|w| sanitize_word(w) == word)?;
    let wi = u16::try_from(idx).ok()?;
    Some((track, compose_seed(track, wi, nn)))
}

/// Build a fresh replay code from arbitrary entropy.
#[must_use]
pub fn replay_code_from_entropy(track: ProfessionalTrack, entropy: u64) -> String {
    let words = u64::try_from(WORD_LIST.len()).unwrap_or(1);
    let wi = u16::try_from(entropy % words).unwrap_or(0);
    let nn = u8::try_from((entropy >> 17) % 100).unwrap_or(0);
    encode_replay_code(track, compose_seed(track, wi, nn))
}
