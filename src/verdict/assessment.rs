use serde::Serialize;

/// Mean-latency bands, best first.
const CRUSHED_BELOW_MS: f64 = 500.0;
const FENDED_OFF_BELOW_MS: f64 = 1000.0;
const WOUNDED_BELOW_MS: f64 = 1500.0;
const COMPROMISED_BELOW_MS: f64 = 2000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Assessment {
    Crushed,
    FendedOff,
    Wounded,
    SeverelyCompromised,
    Annihilated,
}

impl Assessment {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Assessment::Crushed => "Target crushed bee offensive.",
            Assessment::FendedOff => "Target successfully fended off the swarm.",
            Assessment::Wounded => "Target wounded, but operational.",
            Assessment::SeverelyCompromised => "Target severely compromised.",
            Assessment::Annihilated => "Swarm annihilated target.",
        }
    }
}

#[must_use]
pub fn assess(mean_time_per_request_ms: f64) -> Assessment {
    if mean_time_per_request_ms < CRUSHED_BELOW_MS {
        Assessment::Crushed
    } else if mean_time_per_request_ms < FENDED_OFF_BELOW_MS {
        Assessment::FendedOff
    } else if mean_time_per_request_ms < WOUNDED_BELOW_MS {
        Assessment::Wounded
    } else if mean_time_per_request_ms < COMPROMISED_BELOW_MS {
        Assessment::SeverelyCompromised
    } else {
        Assessment::Annihilated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_edges_fall_into_the_slower_band() -> Result<(), String> {
        let cases = [
            (0.0, Assessment::Crushed),
            (499.9, Assessment::Crushed),
            (500.0, Assessment::FendedOff),
            (999.0, Assessment::FendedOff),
            (1000.0, Assessment::Wounded),
            (1500.0, Assessment::SeverelyCompromised),
            (1999.99, Assessment::SeverelyCompromised),
            (2000.0, Assessment::Annihilated),
            (60_000.0, Assessment::Annihilated),
        ];
        for (mean, expected) in cases {
            let actual = assess(mean);
            if actual != expected {
                return Err(format!(
                    "{}ms mapped to {:?}, expected {:?}",
                    mean, actual, expected
                ));
            }
        }
        Ok(())
    }

    #[test]
    fn bands_are_ordered_by_severity() -> Result<(), String> {
        if !(assess(100.0) < assess(700.0) && assess(700.0) < assess(2500.0)) {
            return Err("Expected slower means to map to worse bands".to_owned());
        }
        if assess(100.0).message() != "Target crushed bee offensive." {
            return Err("Unexpected message".to_owned());
        }
        Ok(())
    }
}
