pub const DEFAULT_LEAGUE: &str = "super-lig";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct League {
    pub key: &'static str,
    /// ESPN's identifier, e.g. `tur.1`.
    pub provider_code: &'static str,
    pub display_name: &'static str,
    /// Shown in the league picker.
    pub featured: bool,
}

pub const LEAGUES: &[League] = &[
    League {
        key: "super-lig",
        provider_code: "tur.1",
        display_name: "Süper Lig",
        featured: true,
    },
    League {
        key: "champions-league",
        provider_code: "uefa.champions",
        display_name: "Şampiyonlar Ligi",
        featured: true,
    },
    League {
        key: "europa-league",
        provider_code: "uefa.europa",
        display_name: "Avrupa Ligi",
        featured: true,
    },
    League {
        key: "premier-lig",
        provider_code: "eng.1",
        display_name: "Premier Lig",
        featured: true,
    },
    League {
        key: "la-liga",
        provider_code: "esp.1",
        display_name: "La Liga",
        featured: true,
    },
    League {
        key: "serie-a",
        provider_code: "ita.1",
        display_name: "Serie A",
        featured: true,
    },
    League {
        key: "bundesliga",
        provider_code: "ger.1",
        display_name: "Bundesliga",
        featured: true,
    },
    League {
        key: "ligue-1",
        provider_code: "fra.1",
        display_name: "Ligue 1",
        featured: true,
    },
    League {
        key: "eredivisie",
        provider_code: "ned.1",
        display_name: "Eredivisie",
        featured: true,
    },
    League {
        key: "liga-portugal",
        provider_code: "por.1",
        display_name: "Liga Portugal",
        featured: true,
    },
    League {
        key: "tff-1-lig",
        provider_code: "tur.2",
        display_name: "TFF 1. Lig",
        featured: false,
    },
    League {
        key: "championship",
        provider_code: "eng.2",
        display_name: "Championship",
        featured: false,
    },
    League {
        key: "la-liga-2",
        provider_code: "esp.2",
        display_name: "La Liga 2",
        featured: false,
    },
    League {
        key: "serie-b",
        provider_code: "ita.2",
        display_name: "Serie B",
        featured: false,
    },
    League {
        key: "bundesliga-2",
        provider_code: "ger.2",
        display_name: "2. Bundesliga",
        featured: false,
    },
];

pub fn league_by_key(key: &str) -> Option<&'static League> {
    LEAGUES.iter().find(|league| league.key == key)
}

pub fn featured_leagues() -> impl Iterator<Item = &'static League> {
    LEAGUES.iter().filter(|league| league.featured)
}

pub fn league_label(key: &str) -> &str {
    league_by_key(key)
        .map(|league| league.display_name)
        .unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_league_is_known() {
        let league = league_by_key(DEFAULT_LEAGUE).expect("default league present");
        assert_eq!(league.provider_code, "tur.1");
    }

    #[test]
    fn keys_are_unique() {
        for (i, a) in LEAGUES.iter().enumerate() {
            assert!(LEAGUES[i + 1..].iter().all(|b| b.key != a.key), "{}", a.key);
        }
    }

    #[test]
    fn featured_matches_picker() {
        assert_eq!(featured_leagues().count(), 10);
        assert_eq!(league_label("europa-league"), "Avrupa Ligi");
        assert_eq!(league_label("nope"), "nope");
    }
}
