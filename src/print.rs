use stanza::style::HAlign::Left;
use stanza::style::{HAlign, Header, MinWidth, Separator, Styles};
use stanza::table::{Col, Row, Table};

use crate::data::MatchRecord;
use crate::display::DisplayPercent;
use crate::poisson::{self, GoalProbs, MAX_GOALS};

fn format_goals(goals: Option<u8>) -> String {
    goals.map(|goals| goals.to_string()).unwrap_or_default()
}

pub fn tabulate_matches(matches: &[&MatchRecord]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(5)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(15)).with(Left)),
            Col::new(Styles::default().with(MinWidth(15)).with(Left)),
            Col::new(Styles::default().with(MinWidth(5)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(5)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Round".into(),
                "Home team".into(),
                "Away team".into(),
                "Home goals".into(),
                "Away goals".into(),
            ],
        ));
    for record in matches {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                record.round.to_string().into(),
                record.home_team.clone().into(),
                record.away_team.clone().into(),
                format_goals(record.home_goals).into(),
                format_goals(record.away_goals).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_probabilities(probs: &GoalProbs) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(10)).with(Left)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["Goals".into(), "Probability".into(), "Share".into()],
        ));
    for (goals, &prob) in probs.iter().enumerate() {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                goals.to_string().into(),
                format!("{prob:.6}").into(),
                DisplayPercent(prob).to_string().into(),
            ],
        ));
    }
    let unreported = poisson::unreported(probs);
    table.push_row(Row::new(
        Styles::default().with(Separator(true)),
        vec![
            format!("{}+", MAX_GOALS + 1).into(),
            format!("{unreported:.6}").into(),
            DisplayPercent(unreported).to_string().into(),
        ],
    ));
    table
}

pub fn tabulate_frequencies(frequencies: &[usize]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(10)).with(Left)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["Goals scored".into(), "Matches".into()],
        ));
    for (goals, &count) in frequencies.iter().enumerate() {
        table.push_row(Row::new(
            Styles::default(),
            vec![goals.to_string().into(), count.to_string().into()],
        ));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factorial::Calculator;
    use crate::testing::fixture;
    use stanza::renderer::console::Console;
    use stanza::renderer::Renderer;

    #[test]
    fn matches_table() {
        let matches = [fixture(19, "Fortaleza", "Bahia", Some((2, 1))), fixture(20, "Bahia", "Goiás", None)];
        let matches = matches.iter().collect::<Vec<_>>();
        let rendered = Console::default().render(&tabulate_matches(&matches)).to_string();
        assert!(rendered.contains("Fortaleza"));
        assert!(rendered.contains("Goiás"));
        assert_eq!(3, tabulate_matches(&matches).num_rows());
    }

    #[test]
    fn probabilities_table() {
        let probs = poisson::distribution(1.0, &Calculator);
        let table = tabulate_probabilities(&probs);
        assert_eq!(7, table.num_rows());
        let rendered = Console::default().render(&table).to_string();
        assert!(rendered.contains("36.8%"));
        assert!(rendered.contains("5+"));
    }

    #[test]
    fn frequencies_table() {
        assert_eq!(4, tabulate_frequencies(&[1, 0, 2]).num_rows());
    }
}
