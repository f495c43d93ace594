use std::io::{Cursor, Read};

use chrono::NaiveDate;

use puan_tablosu::excel_export::{
    Cell, ExportRequest, MATCHES_HEADER, MATCHES_SHEET, STANDINGS_HEADER, STANDINGS_SHEET,
    STATS_SHEET, XLSX_CONTENT_TYPE, build_sheets, export_workbook, season_totals,
    top_scoring_teams,
};
use puan_tablosu::fallback::fallback_standings;
use puan_tablosu::state::{MatchResult, Outcome, StandingsRow};

fn team(name: &str, goals_for: i32, points: i32) -> StandingsRow {
    StandingsRow {
        rank: 0,
        team: name.to_string(),
        played: 10,
        won: 0,
        drawn: 0,
        lost: 0,
        goals_for,
        goals_against: 0,
        goal_difference: 0,
        points,
        logo: None,
    }
}

fn game(home: &str, home_goals: i32, away: &str, away_goals: i32) -> MatchResult {
    MatchResult {
        week: "1".to_string(),
        date: "2025-01-10".to_string(),
        home: home.to_string(),
        home_goals,
        away: away.to_string(),
        away_goals,
    }
}

fn request(standings: Vec<StandingsRow>, matches: Vec<MatchResult>) -> ExportRequest {
    ExportRequest {
        standings,
        matches,
        league_name: "Süper Lig".to_string(),
        season: "2024-2025".to_string(),
    }
}

fn text(cell: &Cell) -> &str {
    match cell {
        Cell::Text(value) => value,
        other => panic!("expected text, got {other:?}"),
    }
}

#[test]
fn workbook_has_three_named_sheets_with_headers() {
    let req = request(fallback_standings("super-lig"), Vec::new());
    let sheets = build_sheets(&req);
    let names: Vec<&str> = sheets.iter().map(|s| s.name).collect();
    assert_eq!(names, [STANDINGS_SHEET, MATCHES_SHEET, STATS_SHEET]);

    let standings = &sheets[0];
    assert_eq!(text(&standings.rows[0][0]), "PUAN TABLOSU - Süper Lig 2024-2025");
    assert!(standings.rows[1].is_empty());
    let header: Vec<&str> = standings.rows[2].iter().map(text).collect();
    assert_eq!(header, STANDINGS_HEADER);
    assert_eq!(standings.rows.len(), 3 + 19);

    let matches = &sheets[1];
    assert_eq!(text(&matches.rows[0][0]), "MAÇ SONUÇLARI - Süper Lig 2024-2025");
    let header: Vec<&str> = matches.rows[2].iter().map(text).collect();
    assert_eq!(header, MATCHES_HEADER);
    assert_eq!(matches.rows.len(), 3);

    assert_eq!(text(&sheets[2].rows[0][0]), "GENEL İSTATİSTİKLER");
}

#[test]
fn standings_sheet_keeps_caller_order() {
    let rows = vec![team("Low", 5, 1), team("High", 40, 50), team("Mid", 20, 20)];
    let sheets = build_sheets(&request(rows, Vec::new()));
    let order: Vec<&str> = sheets[0].rows[3..].iter().map(|r| text(&r[1])).collect();
    assert_eq!(order, ["Low", "High", "Mid"]);
    assert_eq!(sheets[0].rows[4][9], Cell::Int(50));
}

#[test]
fn outcome_labels_follow_score() {
    assert_eq!(game("A", 2, "B", 1).outcome(), Outcome::HomeWin);
    assert_eq!(game("A", 1, "B", 2).outcome(), Outcome::AwayWin);
    assert_eq!(game("A", 1, "B", 1).outcome(), Outcome::Draw);

    let matches = vec![game("A", 2, "B", 1), game("A", 1, "B", 2), game("A", 1, "B", 1)];
    let sheets = build_sheets(&request(Vec::new(), matches));
    let rows = &sheets[1].rows[3..];
    let labels: Vec<&str> = rows.iter().map(|r| text(&r[5])).collect();
    assert_eq!(labels, ["Ev Sahibi", "Deplasman", "Berabere"]);
    assert_eq!(text(&rows[0][3]), "2 - 1");
}

#[test]
fn no_matches_means_zero_average() {
    let totals = season_totals(&fallback_standings("super-lig"), &[]);
    assert_eq!(totals.teams, 19);
    assert_eq!(totals.matches, 0);
    assert_eq!(totals.goals, 0);
    assert_eq!(totals.goals_per_match, 0.0);

    let sheets = build_sheets(&request(Vec::new(), Vec::new()));
    let avg = sheets[2]
        .rows
        .iter()
        .find(|r| r.first().map(text) == Some("Maç Başına Gol"))
        .expect("average row");
    assert_eq!(avg[1], Cell::Decimal(0.0));
}

#[test]
fn totals_count_goals_and_outcomes() {
    let matches = vec![
        game("A", 3, "B", 0),
        game("C", 0, "D", 2),
        game("E", 1, "F", 1),
        game("G", 2, "H", 1),
    ];
    let totals = season_totals(&[], &matches);
    assert_eq!(totals.goals, 10);
    assert_eq!(totals.matches, 4);
    assert!((totals.goals_per_match - 2.5).abs() < 1e-9);
    assert_eq!(totals.home_wins, 2);
    assert_eq!(totals.away_wins, 1);
    assert_eq!(totals.draws, 1);

    let odd = season_totals(&[], &[game("A", 1, "B", 0), game("A", 1, "B", 0), game("A", 0, "B", 0)]);
    assert!((odd.goals_per_match - 0.67).abs() < 1e-9);
}

#[test]
fn top_scorers_are_stable_and_capped() {
    let rows = vec![
        team("A", 10, 0),
        team("B", 30, 0),
        team("C", 10, 0),
        team("D", 25, 0),
        team("E", 10, 0),
        team("F", 5, 0),
        team("G", 10, 0),
    ];
    let top: Vec<&str> = top_scoring_teams(&rows, 5)
        .iter()
        .map(|t| t.team.as_str())
        .collect();
    assert_eq!(top, ["B", "D", "A", "C", "E"]);

    let two = vec![team("X", 1, 0), team("Y", 2, 0)];
    assert_eq!(top_scoring_teams(&two, 5).len(), 2);

    let sheets = build_sheets(&request(rows, Vec::new()));
    let stats = &sheets[2].rows;
    let list = &stats[stats.len() - 5..];
    assert_eq!(list[0], vec![Cell::Int(1), Cell::Text("B".to_string()), Cell::Int(30)]);
    assert_eq!(list[4][0], Cell::Int(5));
}

#[test]
fn export_produces_xlsx_buffer_and_filename() {
    let day = NaiveDate::from_ymd_opt(2025, 1, 14).expect("valid date");
    let req = request(fallback_standings("super-lig"), vec![game("A", 2, "B", 1)]);
    let workbook = export_workbook(&req, day).expect("export should succeed");
    assert_eq!(workbook.content_type, XLSX_CONTENT_TYPE);
    assert_eq!(workbook.filename, "puan_tablosu_Süper_Lig_2025-01-14.xlsx");
    // xlsx is a zip container
    assert!(workbook.bytes.starts_with(b"PK"));
}

#[test]
fn export_request_accepts_page_body() {
    let body = r#"{
        "puanTablosu": [{"sira":1,"takim":"Galatasaray","oynanan":19,"galibiyet":15,
            "beraberlik":5,"malubiyet":0,"atilanGol":47,"yenilenGol":17,"averaj":30,"puan":50}],
        "ligAdi": "Süper Lig",
        "sezon": "2024-2025"
    }"#;
    let req: ExportRequest = serde_json::from_str(body).expect("body should parse");
    assert_eq!(req.standings.len(), 1);
    assert!(req.matches.is_empty());
    assert_eq!(req.standings[0].goals_for, 47);
}

#[test]
fn rendered_workbook_names_its_sheets() {
    let day = NaiveDate::from_ymd_opt(2025, 1, 14).expect("valid date");
    let req = request(fallback_standings("super-lig"), vec![game("A", 2, "B", 1)]);
    let workbook = export_workbook(&req, day).expect("export should succeed");

    let mut archive = zip::ZipArchive::new(Cursor::new(workbook.bytes)).expect("xlsx is a zip");
    let mut xml = String::new();
    archive
        .by_name("xl/workbook.xml")
        .expect("workbook part")
        .read_to_string(&mut xml)
        .expect("utf8 workbook part");

    let positions: Vec<usize> = [STANDINGS_SHEET, MATCHES_SHEET, STATS_SHEET]
        .iter()
        .map(|name| {
            xml.find(&format!("name=\"{name}\""))
                .unwrap_or_else(|| panic!("sheet {name} missing from {xml}"))
        })
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "sheet order: {positions:?}");
    assert_eq!(xml.matches("<sheet ").count(), 3);
}

#[test]
fn extreme_goal_counts_export_without_overflow() {
    let body = r#"{
        "puanTablosu": [],
        "maclar": [{"hafta":"1","tarih":"2025-01-10","evSahibi":"A","evGol":2147483647,
            "deplasman":"B","depGol":1}],
        "ligAdi": "Süper Lig",
        "sezon": "2024-2025"
    }"#;
    let req: ExportRequest = serde_json::from_str(body).expect("body should parse");
    let game = &req.matches[0];
    assert_eq!(game.total_goals(), 2_147_483_648);
    assert_eq!(game.outcome(), Outcome::HomeWin);
    assert_eq!(game.score_label(), "2147483647 - 1");

    let totals = season_totals(&req.standings, &req.matches);
    assert_eq!(totals.goals, 2_147_483_648);

    let sheets = build_sheets(&req);
    let goals = sheets[2]
        .rows
        .iter()
        .find(|r| r.first().map(text) == Some("Toplam Gol"))
        .expect("goal total row");
    assert_eq!(goals[1], Cell::Int(2_147_483_648));

    let day = NaiveDate::from_ymd_opt(2025, 1, 14).expect("valid date");
    let workbook = export_workbook(&req, day).expect("export should succeed");
    assert!(workbook.bytes.starts_with(b"PK"));
}
