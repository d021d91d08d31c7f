//! Match records and the immutable [Dataset] that queries run against.

use std::collections::BTreeSet;
use std::io;
use std::io::Read;
use std::path::{Path, PathBuf};

use ordinalizer::Ordinal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumCount, EnumIter};
use thiserror::Error;
use tracing::debug;

use crate::csv::{CsvReader, Record};
use crate::file;
use crate::venue::Venue;

/// One played or scheduled fixture. Goals are absent for fixtures not yet played or with
/// missing data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub round: u16,
    pub home_team: String,
    pub away_team: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_goals: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_goals: Option<u8>,
}
impl MatchRecord {
    /// The team occupying the given role.
    pub fn team(&self, venue: Venue) -> &str {
        match venue {
            Venue::Home => &self.home_team,
            Venue::Away => &self.away_team,
        }
    }

    /// Goals scored by the side occupying the given role.
    pub fn goals_scored(&self, venue: Venue) -> Option<u8> {
        match venue {
            Venue::Home => self.home_goals,
            Venue::Away => self.away_goals,
        }
    }

    /// Goals scored against the side occupying the given role.
    pub fn goals_conceded(&self, venue: Venue) -> Option<u8> {
        self.goals_scored(venue.flip())
    }

    pub fn to_record(&self) -> Record {
        let mut record = Record::with_capacity(Column::COUNT);
        record.set(Column::Round, self.round);
        record.set(Column::HomeTeam, &self.home_team);
        record.set(Column::AwayTeam, &self.away_team);
        if let Some(goals) = self.home_goals {
            record.set(Column::HomeGoals, goals);
        }
        if let Some(goals) = self.away_goals {
            record.set(Column::AwayGoals, goals);
        }
        record
    }
}

/// The tabular layout of match data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Ordinal, EnumCount, EnumIter, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Column {
    Round,
    HomeTeam,
    AwayTeam,
    HomeGoals,
    AwayGoals,
}
impl Column {
    /// Header names recognised for this column, lowercase. The second name is the one used by
    /// the Brazilian league spreadsheets.
    fn aliases(&self) -> [&'static str; 2] {
        match self {
            Column::Round => ["round", "partida"],
            Column::HomeTeam => ["home_team", "casa - time"],
            Column::AwayTeam => ["away_team", "fora - time"],
            Column::HomeGoals => ["home_goals", "casa - gols"],
            Column::AwayGoals => ["away_goals", "fora - gols"],
        }
    }

    fn from_header(name: &str) -> Option<Column> {
        let name = name.trim().to_lowercase();
        Column::iter().find(|column| column.aliases().contains(&name.as_str()))
    }
}

impl From<Column> for usize {
    fn from(column: Column) -> Self {
        column.ordinal()
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("no header row")]
    MissingHeader,

    #[error("missing column '{0}'")]
    MissingColumn(Column),

    #[error("row {row}: invalid {column} '{value}'")]
    InvalidValue {
        row: usize,
        column: Column,
        value: String,
    },

    #[error("row {row}: blank {column}")]
    BlankTeam { row: usize, column: Column },

    #[error("unsupported file type {0:?}")]
    UnsupportedFormat(PathBuf),
}

/// An ordered, immutable collection of match records, in load order. Records are never mutated
/// once loaded; queries borrow the dataset for their duration.
#[derive(Debug, Default)]
pub struct Dataset {
    records: Vec<MatchRecord>,
    rounds: FxHashMap<u16, Vec<usize>>,
}
impl Dataset {
    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct rounds with at least one record.
    pub fn num_rounds(&self) -> usize {
        self.rounds.len()
    }

    pub fn has_round(&self, round: u16) -> bool {
        self.rounds.contains_key(&round)
    }

    /// Records for the given round, in load order.
    pub fn round(&self, round: u16) -> impl Iterator<Item = &MatchRecord> {
        self.rounds
            .get(&round)
            .map(|indexes| indexes.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|&index| &self.records[index])
    }

    pub fn roster(&self) -> TeamRoster {
        TeamRoster::from(self)
    }

    /// Loads a dataset from a `.csv` or `.json` file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        if file::has_extension(path, "csv") {
            Self::read_csv(path)
        } else if file::has_extension(path, "json") {
            Self::read_json(path)
        } else {
            Err(LoadError::UnsupportedFormat(path.to_path_buf()))
        }
    }

    pub fn read_csv(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let dataset = Self::from_csv(CsvReader::open(&path)?)?;
        debug!(
            "read {} records across {} rounds from {:?}",
            dataset.len(),
            dataset.num_rounds(),
            path.as_ref()
        );
        Ok(dataset)
    }

    /// Parses a header row followed by data rows. Columns are located by header name; extra
    /// columns are ignored and blank rows skipped.
    pub fn from_csv<R: Read>(mut reader: CsvReader<R>) -> Result<Self, LoadError> {
        let header = reader.next().ok_or(LoadError::MissingHeader)??;
        let mut positions = [None; Column::COUNT];
        for (position, name) in header.iter().enumerate() {
            if let Some(column) = Column::from_header(name) {
                positions[usize::from(column)].get_or_insert(position);
            }
        }
        let mut layout = [0; Column::COUNT];
        for column in Column::iter() {
            layout[usize::from(column)] =
                positions[usize::from(column)].ok_or(LoadError::MissingColumn(column))?;
        }

        let mut records = vec![];
        for (index, row) in reader.enumerate() {
            let row = row?;
            if row.iter().all(|field| field.trim().is_empty()) {
                continue;
            }
            let line = index + 2;
            let field = |column: Column| {
                row.get(layout[usize::from(column)])
                    .map(|field| field.trim())
                    .unwrap_or_default()
            };
            records.push(MatchRecord {
                round: parse_round(line, field(Column::Round))?,
                home_team: parse_team(line, Column::HomeTeam, field(Column::HomeTeam))?,
                away_team: parse_team(line, Column::AwayTeam, field(Column::AwayTeam))?,
                home_goals: parse_goals(line, Column::HomeGoals, field(Column::HomeGoals))?,
                away_goals: parse_goals(line, Column::AwayGoals, field(Column::AwayGoals))?,
            });
        }
        Ok(Self::from(records))
    }

    /// Reads a JSON array of match records.
    pub fn read_json(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let records: Vec<MatchRecord> = file::read_json(&path)?;
        for (index, record) in records.iter().enumerate() {
            for (column, venue) in [(Column::HomeTeam, Venue::Home), (Column::AwayTeam, Venue::Away)] {
                if record.team(venue).trim().is_empty() {
                    return Err(LoadError::BlankTeam { row: index + 1, column });
                }
            }
        }
        let dataset = Self::from(records);
        debug!(
            "read {} records across {} rounds from {:?}",
            dataset.len(),
            dataset.num_rounds(),
            path.as_ref()
        );
        Ok(dataset)
    }
}

impl From<Vec<MatchRecord>> for Dataset {
    fn from(records: Vec<MatchRecord>) -> Self {
        let mut rounds = FxHashMap::<u16, Vec<usize>>::default();
        for (index, record) in records.iter().enumerate() {
            rounds.entry(record.round).or_default().push(index);
        }
        Self { records, rounds }
    }
}

fn invalid(row: usize, column: Column, value: &str) -> LoadError {
    LoadError::InvalidValue {
        row,
        column,
        value: value.to_string(),
    }
}

/// Parses an integral cell, tolerating the `20.0` form that spreadsheet exports produce.
fn parse_integral<T: TryFrom<u64> + std::str::FromStr>(value: &str) -> Option<T> {
    value.parse().ok().or_else(|| {
        let float = value.parse::<f64>().ok()?;
        if float.fract() == 0.0 && float >= 0.0 && float <= u64::MAX as f64 {
            T::try_from(float as u64).ok()
        } else {
            None
        }
    })
}

fn parse_round(row: usize, value: &str) -> Result<u16, LoadError> {
    parse_integral(value).ok_or_else(|| invalid(row, Column::Round, value))
}

fn parse_team(row: usize, column: Column, value: &str) -> Result<String, LoadError> {
    if value.is_empty() {
        Err(LoadError::BlankTeam { row, column })
    } else {
        Ok(value.to_string())
    }
}

fn parse_goals(row: usize, column: Column, value: &str) -> Result<Option<u8>, LoadError> {
    if value.is_empty() || value == "-" || value.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    parse_integral(value)
        .map(Some)
        .ok_or_else(|| invalid(row, column, value))
}

/// The distinct teams appearing in a dataset, in lexicographic order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TeamRoster(Vec<String>);
impl TeamRoster {
    pub fn contains(&self, team: &str) -> bool {
        self.0
            .binary_search_by(|candidate| candidate.as_str().cmp(team))
            .is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&Dataset> for TeamRoster {
    fn from(dataset: &Dataset) -> Self {
        let teams = dataset
            .records()
            .iter()
            .flat_map(|record| [record.home_team.as_str(), record.away_team.as_str()])
            .collect::<BTreeSet<_>>();
        Self(teams.into_iter().map(ToString::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixture;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn load(csv: &str) -> Result<Dataset, LoadError> {
        Dataset::from_csv(CsvReader::from(csv.as_bytes()))
    }

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn csv_with_english_headers() {
        let dataset = load(
            "round,home_team,away_team,home_goals,away_goals\n\
             1,X,Y,2,1\n\
             1,Z,W,,\n\
             \n\
             2,Y,Z,0.0,3.0\n",
        )
        .unwrap();
        assert_eq!(
            vec![
                fixture(1, "X", "Y", Some((2, 1))),
                fixture(1, "Z", "W", None),
                fixture(2, "Y", "Z", Some((0, 3))),
            ],
            dataset.records()
        );
        assert_eq!(2, dataset.num_rounds());
    }

    #[test]
    fn csv_with_spreadsheet_headers_in_any_order() {
        let dataset = load(
            "Fora - Gols,Casa - Time,Data,Partida,Fora - Time,Casa - Gols\n\
             NaN,Flamengo,2023-05-01,11,Palmeiras,1\n",
        )
        .unwrap();
        assert_eq!(
            &[MatchRecord {
                round: 11,
                home_team: "Flamengo".into(),
                away_team: "Palmeiras".into(),
                home_goals: Some(1),
                away_goals: None,
            }],
            dataset.records()
        );
    }

    #[test]
    fn csv_missing_column() {
        let err = load("round,home_team,away_team,home_goals\n").unwrap_err();
        assert_eq!("missing column 'away_goals'", err.to_string());
    }

    #[test]
    fn csv_missing_header() {
        assert!(matches!(load("").unwrap_err(), LoadError::MissingHeader));
    }

    #[test]
    fn csv_invalid_goals() {
        let err = load("round,home_team,away_team,home_goals,away_goals\n1,X,Y,-2,1\n").unwrap_err();
        assert_eq!("row 2: invalid home_goals '-2'", err.to_string());
    }

    #[test]
    fn csv_invalid_round() {
        let err = load("round,home_team,away_team,home_goals,away_goals\n1.5,X,Y,2,1\n").unwrap_err();
        assert_eq!("row 2: invalid round '1.5'", err.to_string());
    }

    #[test]
    fn csv_blank_team() {
        let err = load("round,home_team,away_team,home_goals,away_goals\n1,X, ,2,1\n").unwrap_err();
        assert_eq!("row 2: blank away_team", err.to_string());
    }

    #[test]
    fn json_with_absent_goals() {
        let dir = tempdir().unwrap();
        let path = write_file(
            &dir,
            "season.json",
            r#"[
                {"round": 11, "home_team": "X", "away_team": "Y", "home_goals": 2, "away_goals": 0},
                {"round": 12, "home_team": "Y", "away_team": "X"},
                {"round": 12, "home_team": "Z", "away_team": "W", "home_goals": null, "away_goals": 1}
            ]"#,
        );
        let dataset = Dataset::read_json(&path).unwrap();
        assert_eq!(
            vec![
                fixture(11, "X", "Y", Some((2, 0))),
                fixture(12, "Y", "X", None),
                MatchRecord {
                    round: 12,
                    home_team: "Z".into(),
                    away_team: "W".into(),
                    home_goals: None,
                    away_goals: Some(1),
                },
            ],
            dataset.records()
        );
        assert_eq!(2, dataset.num_rounds());
    }

    #[test]
    fn json_blank_team() {
        let dir = tempdir().unwrap();
        let path = write_file(
            &dir,
            "season.json",
            r#"[
                {"round": 11, "home_team": "X", "away_team": "Y"},
                {"round": 12, "home_team": "Y", "away_team": "  "}
            ]"#,
        );
        let err = Dataset::read_json(&path).unwrap_err();
        assert!(matches!(
            err,
            LoadError::BlankTeam {
                row: 2,
                column: Column::AwayTeam
            }
        ));
        assert_eq!("row 2: blank away_team", err.to_string());
    }

    #[test]
    fn json_malformed() {
        let dir = tempdir().unwrap();
        let path = write_file(&dir, "season.json", r#"[{"round": "eleven"}]"#);
        assert!(matches!(Dataset::read_json(&path).unwrap_err(), LoadError::Io(_)));
    }

    #[test]
    fn read_by_extension() {
        let dir = tempdir().unwrap();
        let csv = write_file(
            &dir,
            "season.CSV",
            "round,home_team,away_team,home_goals,away_goals\n11,X,Y,1,1\n",
        );
        let json = write_file(
            &dir,
            "season.json",
            r#"[{"round": 11, "home_team": "X", "away_team": "Y", "home_goals": 1, "away_goals": 1}]"#,
        );
        let expected = vec![fixture(11, "X", "Y", Some((1, 1)))];
        assert_eq!(expected, Dataset::read(&csv).unwrap().records());
        assert_eq!(expected, Dataset::read(&json).unwrap().records());

        let txt = write_file(&dir, "season.txt", "round,home_team,away_team,home_goals,away_goals\n");
        let err = Dataset::read(&txt).unwrap_err();
        assert!(matches!(&err, LoadError::UnsupportedFormat(path) if path == &txt));
        assert_eq!(format!("unsupported file type {txt:?}"), err.to_string());
    }

    #[test]
    fn read_missing_file() {
        let dir = tempdir().unwrap();
        let err = Dataset::read(dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io(err) if err.kind() == io::ErrorKind::NotFound));
    }

    #[test]
    fn round_lookup_preserves_load_order() {
        let dataset = Dataset::from(vec![
            fixture(3, "A", "B", None),
            fixture(1, "C", "D", None),
            fixture(3, "E", "F", None),
        ]);
        let homes = dataset
            .round(3)
            .map(|record| record.home_team.as_str())
            .collect::<Vec<_>>();
        assert_eq!(vec!["A", "E"], homes);
        assert!(dataset.has_round(1));
        assert!(!dataset.has_round(2));
        assert_eq!(0, dataset.round(2).count());
    }

    #[test]
    fn roster_is_sorted_and_distinct() {
        let dataset = Dataset::from(vec![
            fixture(1, "Santos", "Bahia", None),
            fixture(2, "Bahia", "Ceará", None),
        ]);
        let roster = dataset.roster();
        assert_eq!(vec!["Bahia", "Ceará", "Santos"], roster.iter().collect::<Vec<_>>());
        assert!(roster.contains("Ceará"));
        assert!(!roster.contains("Vasco"));
        assert_eq!(3, roster.len());
        assert!(Dataset::default().roster().is_empty());
    }

    #[test]
    fn record_perspective() {
        let record = fixture(1, "X", "Y", Some((2, 1)));
        assert_eq!("Y", record.team(Venue::Away));
        assert_eq!(Some(2), record.goals_scored(Venue::Home));
        assert_eq!(Some(1), record.goals_conceded(Venue::Home));
        assert_eq!(Some(2), record.goals_conceded(Venue::Away));
    }

    #[test]
    fn record_to_csv_record() {
        let record = fixture(7, "X", "Y", None).to_record();
        assert_eq!(
            vec!["7", "X", "Y", "", ""],
            record.into_iter().collect::<Vec<_>>()
        );
    }
}
