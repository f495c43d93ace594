use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use serde::Deserialize;

use crate::state::{MatchResult, Outcome, StandingsRow};

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub const STANDINGS_SHEET: &str = "Puan Tablosu";
pub const MATCHES_SHEET: &str = "Maçlar";
pub const STATS_SHEET: &str = "İstatistikler";

pub const STANDINGS_HEADER: [&str; 10] = ["Sıra", "Takım", "O", "G", "B", "M", "AG", "YG", "AV", "P"];
pub const MATCHES_HEADER: [&str; 6] = ["Hafta", "Tarih", "Ev Sahibi", "Skor", "Deplasman", "Sonuç"];

const TOP_SCORERS: usize = 5;

/// Body of an export request, using the field names the page posts.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportRequest {
    #[serde(rename = "puanTablosu")]
    pub standings: Vec<StandingsRow>,
    #[serde(rename = "maclar", default)]
    pub matches: Vec<MatchResult>,
    #[serde(rename = "ligAdi")]
    pub league_name: String,
    #[serde(rename = "sezon")]
    pub season: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Int(i64),
    Decimal(f64),
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell::Int(value.into())
    }
}

impl From<usize> for Cell {
    fn from(value: usize) -> Self {
        Cell::Int(value as i64)
    }
}

/// A sheet before it is written: its rows (an empty row is a spacer) and
/// column widths in characters.
#[derive(Debug, Clone)]
pub struct SheetData {
    pub name: &'static str,
    pub rows: Vec<Vec<Cell>>,
    pub widths: &'static [f64],
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeasonTotals {
    pub teams: usize,
    pub matches: usize,
    pub goals: i64,
    pub goals_per_match: f64,
    pub home_wins: usize,
    pub away_wins: usize,
    pub draws: usize,
}

pub struct ExportedWorkbook {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: &'static str,
}

pub fn export_workbook(request: &ExportRequest, today: NaiveDate) -> Result<ExportedWorkbook> {
    let sheets = build_sheets(request);
    let bytes = render_workbook(&sheets)?;
    Ok(ExportedWorkbook {
        bytes,
        filename: export_filename(&request.league_name, today),
        content_type: XLSX_CONTENT_TYPE,
    })
}

pub fn build_sheets(request: &ExportRequest) -> Vec<SheetData> {
    vec![
        standings_sheet(request),
        matches_sheet(request),
        stats_sheet(&request.standings, &request.matches),
    ]
}

pub fn render_workbook(sheets: &[SheetData]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let title = Format::new().set_bold();
    let decimal = Format::new().set_num_format("0.00");

    for data in sheets {
        let sheet = workbook.add_worksheet();
        sheet
            .set_name(data.name)
            .with_context(|| format!("name sheet {}", data.name))?;
        for (col_idx, width) in data.widths.iter().enumerate() {
            sheet
                .set_column_width(col_idx as u16, *width)
                .with_context(|| format!("set width of column {col_idx}"))?;
        }
        write_rows(sheet, &data.rows, &title, &decimal)
            .with_context(|| format!("write sheet {}", data.name))?;
    }

    workbook
        .save_to_buffer()
        .context("failed serializing workbook")
}

/// `puan_tablosu_<league>_<YYYY-MM-DD>.xlsx`, each whitespace run in the
/// league name collapsed to one underscore.
pub fn export_filename(league_name: &str, today: NaiveDate) -> String {
    let mut league = String::with_capacity(league_name.len());
    let mut in_space = false;
    for ch in league_name.chars() {
        if ch.is_whitespace() {
            if !in_space {
                league.push('_');
            }
            in_space = true;
        } else {
            league.push(ch);
            in_space = false;
        }
    }
    format!("puan_tablosu_{league}_{}.xlsx", today.format("%Y-%m-%d"))
}

pub fn season_totals(standings: &[StandingsRow], matches: &[MatchResult]) -> SeasonTotals {
    let goals: i64 = matches.iter().map(MatchResult::total_goals).sum();
    let count = |outcome: Outcome| matches.iter().filter(|m| m.outcome() == outcome).count();
    let goals_per_match = if matches.is_empty() {
        0.0
    } else {
        round2(goals as f64 / matches.len() as f64)
    };

    SeasonTotals {
        teams: standings.len(),
        matches: matches.len(),
        goals,
        goals_per_match,
        home_wins: count(Outcome::HomeWin),
        away_wins: count(Outcome::AwayWin),
        draws: count(Outcome::Draw),
    }
}

/// Highest goals-for first; teams level on goals keep their input order.
pub fn top_scoring_teams(standings: &[StandingsRow], limit: usize) -> Vec<&StandingsRow> {
    let mut ranked: Vec<&StandingsRow> = standings.iter().collect();
    ranked.sort_by(|a, b| b.goals_for.cmp(&a.goals_for));
    ranked.truncate(limit);
    ranked
}

fn standings_sheet(request: &ExportRequest) -> SheetData {
    let mut rows = vec![
        vec![Cell::from(format!(
            "PUAN TABLOSU - {} {}",
            request.league_name, request.season
        ))],
        Vec::new(),
        header_row(&STANDINGS_HEADER),
    ];
    rows.extend(request.standings.iter().map(standings_row));

    SheetData {
        name: STANDINGS_SHEET,
        rows,
        widths: &[6.0, 25.0, 5.0, 5.0, 5.0, 5.0, 6.0, 6.0, 6.0, 5.0],
    }
}

fn standings_row(team: &StandingsRow) -> Vec<Cell> {
    vec![
        team.rank.into(),
        team.team.as_str().into(),
        team.played.into(),
        team.won.into(),
        team.drawn.into(),
        team.lost.into(),
        team.goals_for.into(),
        team.goals_against.into(),
        team.goal_difference.into(),
        team.points.into(),
    ]
}

fn matches_sheet(request: &ExportRequest) -> SheetData {
    let mut rows = vec![
        vec![Cell::from(format!(
            "MAÇ SONUÇLARI - {} {}",
            request.league_name, request.season
        ))],
        Vec::new(),
        header_row(&MATCHES_HEADER),
    ];
    rows.extend(request.matches.iter().map(|m| {
        vec![
            m.week.as_str().into(),
            m.date.as_str().into(),
            m.home.as_str().into(),
            m.score_label().into(),
            m.away.as_str().into(),
            m.outcome().label().into(),
        ]
    }));

    SheetData {
        name: MATCHES_SHEET,
        rows,
        widths: &[8.0, 12.0, 20.0, 10.0, 20.0, 12.0],
    }
}

fn stats_sheet(standings: &[StandingsRow], matches: &[MatchResult]) -> SheetData {
    let totals = season_totals(standings, matches);
    let mut rows = vec![
        vec![Cell::from("GENEL İSTATİSTİKLER")],
        Vec::new(),
        vec!["Toplam Takım".into(), totals.teams.into()],
        vec!["Toplam Maç".into(), totals.matches.into()],
        vec!["Toplam Gol".into(), Cell::Int(totals.goals)],
        vec!["Maç Başına Gol".into(), Cell::Decimal(totals.goals_per_match)],
        vec!["Ev Sahibi Galibiyet".into(), totals.home_wins.into()],
        vec!["Deplasman Galibiyet".into(), totals.away_wins.into()],
        vec!["Beraberlik".into(), totals.draws.into()],
        Vec::new(),
        vec![Cell::from("EN ÇOK GOL ATAN TAKIMLAR")],
        Vec::new(),
    ];
    rows.extend(
        top_scoring_teams(standings, TOP_SCORERS)
            .into_iter()
            .enumerate()
            .map(|(idx, team)| {
                vec![
                    (idx + 1).into(),
                    team.team.as_str().into(),
                    team.goals_for.into(),
                ]
            }),
    );

    SheetData {
        name: STATS_SHEET,
        rows,
        widths: &[25.0, 15.0, 10.0],
    }
}

fn header_row(labels: &[&str]) -> Vec<Cell> {
    labels.iter().map(|label| Cell::from(*label)).collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn write_rows(
    worksheet: &mut Worksheet,
    rows: &[Vec<Cell>],
    title: &Format,
    decimal: &Format,
) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            let (r, c) = (row_idx as u32, col_idx as u16);
            let written = match cell {
                // Row 0 holds the sheet title.
                Cell::Text(value) if row_idx == 0 => {
                    worksheet.write_string_with_format(r, c, value, title)
                }
                Cell::Text(value) => worksheet.write_string(r, c, value),
                Cell::Int(value) => worksheet.write_number(r, c, *value as f64),
                Cell::Decimal(value) => worksheet.write_number_with_format(r, c, *value, decimal),
            };
            written.with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
