use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::leagues::{DEFAULT_LEAGUE, League, featured_leagues, league_by_key, league_label};

/// One team's season record as shown in the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRow {
    #[serde(rename = "sira")]
    pub rank: i32,
    #[serde(rename = "takim")]
    pub team: String,
    #[serde(rename = "oynanan")]
    pub played: i32,
    #[serde(rename = "galibiyet")]
    pub won: i32,
    #[serde(rename = "beraberlik")]
    pub drawn: i32,
    #[serde(rename = "malubiyet")]
    pub lost: i32,
    #[serde(rename = "atilanGol")]
    pub goals_for: i32,
    #[serde(rename = "yenilenGol")]
    pub goals_against: i32,
    #[serde(rename = "averaj")]
    pub goal_difference: i32,
    #[serde(rename = "puan")]
    pub points: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "hafta")]
    pub week: String,
    #[serde(rename = "tarih")]
    pub date: String,
    #[serde(rename = "evSahibi")]
    pub home: String,
    #[serde(rename = "evGol")]
    pub home_goals: i32,
    #[serde(rename = "deplasman")]
    pub away: String,
    #[serde(rename = "depGol")]
    pub away_goals: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    HomeWin,
    AwayWin,
    Draw,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Outcome::HomeWin => "Ev Sahibi",
            Outcome::AwayWin => "Deplasman",
            Outcome::Draw => "Berabere",
        }
    }
}

impl MatchResult {
    pub fn outcome(&self) -> Outcome {
        match self.home_goals.cmp(&self.away_goals) {
            std::cmp::Ordering::Greater => Outcome::HomeWin,
            std::cmp::Ordering::Less => Outcome::AwayWin,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    pub fn score_label(&self) -> String {
        format!("{} - {}", self.home_goals, self.away_goals)
    }

    /// Widened so two `i32` goal counts never overflow.
    pub fn total_goals(&self) -> i64 {
        i64::from(self.home_goals) + i64::from(self.away_goals)
    }
}

/// Points desc, then goal difference desc. Stable, so equal rows keep provider order.
pub fn sort_standings(rows: &mut [StandingsRow]) {
    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.goal_difference.cmp(&a.goal_difference))
    });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StandingsSource {
    #[serde(rename = "espn")]
    Live,
    #[serde(rename = "cache")]
    Fallback,
}

impl StandingsSource {
    pub fn label(self) -> &'static str {
        match self {
            StandingsSource::Live => "espn",
            StandingsSource::Fallback => "cache",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StandingsReport {
    pub league: String,
    pub rows: Vec<StandingsRow>,
    pub source: StandingsSource,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub league: &'static League,
    pub season: String,
    pub rows: Vec<StandingsRow>,
    pub source: Option<StandingsSource>,
    pub updated: Option<String>,
    pub loading: bool,
    pub scroll: usize,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    next_seq: u64,
    pending_seq: Option<u64>,
}

impl AppState {
    pub fn new(season: impl Into<String>) -> Self {
        let league = league_by_key(DEFAULT_LEAGUE).unwrap_or(&crate::leagues::LEAGUES[0]);
        Self {
            league,
            season: season.into(),
            rows: Vec::new(),
            source: None,
            updated: None,
            loading: false,
            scroll: 0,
            logs: VecDeque::new(),
            help_overlay: false,
            next_seq: 0,
            pending_seq: None,
        }
    }

    /// Issues a fetch command for the current league. Only the reply carrying
    /// this sequence number will be applied.
    pub fn begin_fetch(&mut self) -> ProviderCommand {
        self.next_seq = self.next_seq.wrapping_add(1);
        self.pending_seq = Some(self.next_seq);
        self.loading = true;
        ProviderCommand::FetchStandings {
            seq: self.next_seq,
            league: self.league.key.to_string(),
        }
    }

    pub fn cycle_league(&mut self, forward: bool) {
        let featured: Vec<&'static League> = featured_leagues().collect();
        if featured.is_empty() {
            return;
        }
        let current = featured
            .iter()
            .position(|l| l.key == self.league.key)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % featured.len()
        } else {
            (current + featured.len() - 1) % featured.len()
        };
        self.league = featured[next];
        self.rows.clear();
        self.source = None;
        self.scroll = 0;
    }

    pub fn scroll_down(&mut self) {
        if self.scroll + 1 < self.rows.len() {
            self.scroll += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    FetchStandings { seq: u64, league: String },
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetStandings {
        seq: u64,
        report: StandingsReport,
        updated: String,
    },
    UnknownLeague {
        seq: u64,
        league: String,
    },
    Log(String),
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetStandings {
            seq,
            report,
            updated,
        } => {
            if state.pending_seq != Some(seq) || report.league != state.league.key {
                state.push_log(format!(
                    "[INFO] Dropped stale standings for {}",
                    league_label(&report.league)
                ));
                return;
            }
            state.pending_seq = None;
            state.loading = false;
            state.push_log(format!(
                "[INFO] {} rows for {} ({})",
                report.rows.len(),
                state.league.display_name,
                report.source.label()
            ));
            state.rows = report.rows;
            state.source = Some(report.source);
            state.updated = Some(updated);
            state.scroll = state.scroll.min(state.rows.len().saturating_sub(1));
        }
        Delta::UnknownLeague { seq, league } => {
            if state.pending_seq == Some(seq) {
                state.pending_seq = None;
                state.loading = false;
            }
            state.push_log(format!("[WARN] Unknown league: {league}"));
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}
