use crate::state::StandingsRow;

// rank, team, played, won, drawn, lost, goals for, goals against, difference, points
type Row = (i32, &'static str, i32, i32, i32, i32, i32, i32, i32, i32);

const SUPER_LIG: &[Row] = &[
    (1, "Galatasaray", 19, 15, 5, 0, 47, 17, 30, 50),
    (2, "Fenerbahçe", 19, 13, 3, 3, 48, 19, 29, 42),
    (3, "Samsunspor", 19, 10, 5, 4, 29, 18, 11, 35),
    (4, "Trabzonspor", 19, 10, 5, 4, 38, 24, 14, 35),
    (5, "Göztepe", 19, 10, 4, 5, 32, 17, 15, 34),
    (6, "Beşiktaş", 19, 9, 3, 7, 32, 28, 4, 30),
    (7, "Eyüpspor", 19, 8, 5, 6, 24, 21, 3, 29),
    (8, "Başakşehir", 19, 8, 4, 7, 26, 25, 1, 28),
    (9, "Alanyaspor", 19, 7, 6, 6, 23, 22, 1, 27),
    (10, "Sivasspor", 19, 6, 8, 5, 22, 21, 1, 26),
    (11, "Rizespor", 19, 7, 4, 8, 24, 27, -3, 25),
    (12, "Antalyaspor", 19, 6, 5, 8, 22, 31, -9, 23),
    (13, "Kasımpaşa", 19, 6, 4, 9, 24, 33, -9, 22),
    (14, "Konyaspor", 19, 5, 6, 8, 24, 27, -3, 21),
    (15, "Gaziantep FK", 19, 5, 5, 9, 21, 27, -6, 20),
    (16, "Bodrum FK", 19, 4, 5, 10, 17, 30, -13, 17),
    (17, "Hatayspor", 19, 4, 4, 11, 19, 35, -16, 16),
    (18, "Adana Demirspor", 19, 3, 4, 12, 16, 33, -17, 13),
    (19, "Kayserispor", 19, 1, 5, 13, 12, 35, -23, 8),
];

/// Static table served when live standings are unavailable. Only the Süper Lig
/// has one; every other league falls back to an empty table.
pub fn fallback_standings(league: &str) -> Vec<StandingsRow> {
    let rows = match league {
        "super-lig" => SUPER_LIG,
        _ => &[],
    };
    rows.iter().map(to_row).collect()
}

fn to_row(row: &Row) -> StandingsRow {
    let &(rank, team, played, won, drawn, lost, goals_for, goals_against, goal_difference, points) =
        row;
    StandingsRow {
        rank,
        team: team.to_string(),
        played,
        won,
        drawn,
        lost,
        goals_for,
        goals_against,
        goal_difference,
        points,
        logo: None,
    }
}
