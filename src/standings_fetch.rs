use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::fallback::fallback_standings;
use crate::leagues::league_by_key;
use crate::state::{StandingsReport, StandingsRow, StandingsSource, sort_standings};

/// Resolves `league_key`, makes one attempt at the live table and degrades to
/// the static table on any failure. Only an unknown key is an error.
pub async fn fetch_standings(
    client: &Client,
    base_url: &str,
    league_key: &str,
) -> Result<StandingsReport, FetchError> {
    let league = league_by_key(league_key)
        .ok_or_else(|| FetchError::UnknownLeague(league_key.to_string()))?;

    match fetch_from_espn(client, base_url, league.provider_code).await {
        Ok(rows) if !rows.is_empty() => {
            debug!(league = league.key, rows = rows.len(), "live standings");
            return Ok(StandingsReport {
                league: league.key.to_string(),
                rows,
                source: StandingsSource::Live,
            });
        }
        Ok(_) => warn!(league = league.key, "espn returned no standings entries"),
        Err(err) => warn!(league = league.key, "espn standings failed: {err:#}"),
    }

    Ok(StandingsReport {
        league: league.key.to_string(),
        rows: fallback_standings(league.key),
        source: StandingsSource::Fallback,
    })
}

pub fn standings_url(base_url: &str, provider_code: &str) -> String {
    format!(
        "{}/{provider_code}/standings",
        base_url.trim_end_matches('/')
    )
}

async fn fetch_from_espn(
    client: &Client,
    base_url: &str,
    provider_code: &str,
) -> Result<Vec<StandingsRow>> {
    let url = standings_url(base_url, provider_code);
    let resp = client.get(&url).send().await.context("request failed")?;
    let status = resp.status();
    if !status.is_success() {
        return Err(anyhow!("http {status} from {url}"));
    }
    let body = resp.text().await.context("failed reading body")?;
    parse_espn_standings_json(&body)
}

/// Maps an ESPN standings payload onto table rows, sorted by points then
/// goal difference. Entries without any team name are skipped. Fails when
/// the payload has no entries list.
pub fn parse_espn_standings_json(raw: &str) -> Result<Vec<StandingsRow>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(anyhow!("empty standings response"));
    }
    let root: Value = serde_json::from_str(trimmed).context("invalid standings json")?;
    let entries = standings_entries(&root).ok_or_else(|| anyhow!("missing standings entries"))?;

    let mut rows = entries
        .iter()
        .enumerate()
        .filter_map(|(idx, entry)| parse_entry(idx, entry))
        .collect::<Vec<_>>();
    sort_standings(&mut rows);
    Ok(rows)
}

// Leagues with groups nest the table under `children`; plain leagues don't.
fn standings_entries(root: &Value) -> Option<&Vec<Value>> {
    root.get("children")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("standings"))
        .and_then(|s| s.get("entries"))
        .or_else(|| root.get("standings").and_then(|s| s.get("entries")))
        .and_then(Value::as_array)
}

fn parse_entry(idx: usize, entry: &Value) -> Option<StandingsRow> {
    let team = entry.get("team").unwrap_or(&Value::Null);
    let name = pick_string(team, &["displayName", "name", "shortDisplayName"])?;
    let stats = entry.get("stats").and_then(Value::as_array);
    let stat = |name: &str| stat_value(stats, name);

    let rank = match stat("rank") {
        0 => idx as i32 + 1,
        rank => rank,
    };

    Some(StandingsRow {
        rank,
        team: name,
        played: stat("gamesPlayed"),
        won: stat("wins"),
        drawn: stat("ties"),
        lost: stat("losses"),
        goals_for: stat("pointsFor"),
        goals_against: stat("pointsAgainst"),
        goal_difference: stat("pointDifferential"),
        points: stat("points"),
        logo: team
            .get("logos")
            .and_then(|l| l.get(0))
            .and_then(|l| l.get("href"))
            .and_then(Value::as_str)
            .filter(|href| !href.is_empty())
            .map(str::to_string),
    })
}

fn stat_value(stats: Option<&Vec<Value>>, name: &str) -> i32 {
    stats
        .into_iter()
        .flatten()
        .find(|s| s.get("name").and_then(Value::as_str) == Some(name))
        .and_then(|s| s.get("value"))
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .map(|v| v.round() as i32)
        .unwrap_or(0)
}

fn pick_string(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| value.get(*key).and_then(Value::as_str))
        .find(|s| !s.trim().is_empty())
        .map(str::to_string)
}
