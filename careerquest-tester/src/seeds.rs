use anyhow::{Result, bail};
use careerquest_game::{ProfessionalTrack, encode_replay_code, parse_replay_code};

/// A seed requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedInfo {
    pub seed: u64,
    pub code: Option<String>,
    pub source_track: Option<ProfessionalTrack>,
}

impl SeedInfo {
    #[must_use]
    pub const fn from_numeric(seed: u64) -> Self {
        Self {
            seed,
            code: None,
            source_track: None,
        }
    }

    #[must_use]
    pub const fn from_replay_code(seed: u64, track: ProfessionalTrack, code: String) -> Self {
        Self {
            seed,
            code: Some(code),
            source_track: Some(track),
        }
    }

    /// Replay codes pin their track; numeric seeds run on every track.
    #[must_use]
    pub fn matches_track(&self, track: ProfessionalTrack) -> bool {
        self.source_track.is_none_or(|source| source == track)
    }

    #[must_use]
    pub fn replay_code_for_track(&self, track: ProfessionalTrack) -> String {
        if let (Some(code), Some(source)) = (&self.code, self.source_track)
            && source == track
        {
            return code.clone();
        }
        encode_replay_code(track, self.seed)
    }
}

/// Resolve CLI seed tokens: plain integers, `start..end` ranges, or replay codes.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<SeedInfo>> {
    let mut resolved = Vec::new();
    for token in tokens {
        if token.is_empty() {
            continue;
        }
        if let Ok(value) = token.parse::<u64>() {
            resolved.push(SeedInfo::from_numeric(value));
            continue;
        }
        if let Some((start, end)) = token.split_once("..") {
            let (Ok(start), Ok(end)) = (start.parse::<u64>(), end.parse::<u64>()) else {
                bail!("invalid seed range `{token}`");
            };
            if start >= end {
                bail!("empty seed range `{token}`");
            }
            resolved.extend((start..end).map(SeedInfo::from_numeric));
            continue;
        }
        if let Some((track, seed)) = parse_replay_code(token) {
            resolved.push(SeedInfo::from_replay_code(
                seed,
                track,
                token.trim().to_ascii_uppercase(),
            ));
            continue;
        }
        bail!("unrecognized seed `{token}` (expected a number, a range, or a replay code)");
    }

    let mut seen = std::collections::HashSet::new();
    resolved.retain(|info| seen.insert((info.seed, info.source_track)));
    if resolved.is_empty() {
        bail!("no seeds given");
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn numbers_and_ranges_expand() {
        let seeds = resolve_seed_inputs(&tokens(&["7", "1..4", "2"])).unwrap();
        let values: Vec<u64> = seeds.iter().map(|s| s.seed).collect();
        assert_eq!(values, vec![7, 1, 2, 3]);
        assert!(seeds.iter().all(|s| s.source_track.is_none()));
    }

    #[test]
    fn replay_codes_pin_their_track() {
        let seeds = resolve_seed_inputs(&tokens(&["an-offer42"])).unwrap();
        let info = &seeds[0];
        assert_eq!(info.source_track, Some(ProfessionalTrack::Analyst));
        assert!(info.matches_track(ProfessionalTrack::Analyst));
        assert!(!info.matches_track(ProfessionalTrack::Engineer));
        assert_eq!(
            info.replay_code_for_track(ProfessionalTrack::Analyst),
            "AN-OFFER42"
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(resolve_seed_inputs(&tokens(&["nope"])).is_err());
        assert!(resolve_seed_inputs(&tokens(&["5..5"])).is_err());
        assert!(resolve_seed_inputs(&[]).is_err());
    }
}
