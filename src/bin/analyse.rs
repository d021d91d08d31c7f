use std::env;
use std::error::Error;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use strum::IntoEnumIterator;
use tracing::{debug, info, warn};

use goalrate::analysis::{analyse, AnalysisQuery, TeamSelector};
use goalrate::config::AnalysisConfig;
use goalrate::csv::{CsvWriter, Record};
use goalrate::data::{Column, Dataset};
use goalrate::display::DisplayRangeInclusive;
use goalrate::print::{tabulate_frequencies, tabulate_matches, tabulate_probabilities};
use goalrate::venue::Venue;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// CSV or JSON file to source the match data from
    file: Option<PathBuf>,

    /// round to analyse
    #[clap(short = 'r', long)]
    round: Option<String>,

    /// team to analyse, or ALL for every match of the round
    #[clap(short = 't', long, default_value = "ALL", value_parser = parse_team)]
    team: TeamSelector,

    /// the round is a future fixture, with the venue given by --venue
    #[clap(short = 'f', long)]
    future: bool,

    /// venue of a future fixture (home or away)
    #[clap(short = 'v', long, value_parser = parse_venue)]
    venue: Option<Venue>,

    /// JSON file to read the analysis config from
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// where to write the selected matches to, as CSV
    #[clap(short = 'o', long)]
    out: Option<PathBuf>,

    /// list the teams in the match data and exit
    #[clap(long)]
    list_teams: bool,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        self.file
            .as_ref()
            .ok_or(anyhow!("match data file must be specified"))?;
        if !self.list_teams {
            self.round
                .as_ref()
                .ok_or(anyhow!("round must be specified"))?;
        }
        Ok(())
    }
}
fn parse_team(s: &str) -> anyhow::Result<TeamSelector> {
    Ok(s.parse()?)
}
fn parse_venue(s: &str) -> anyhow::Result<Venue> {
    Ok(s.parse()?)
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let config = match &args.config {
        None => AnalysisConfig::default(),
        Some(path) => AnalysisConfig::read_json(path)?,
    };
    debug!("config: {config:?}");

    let dataset = Dataset::read(args.file.as_ref().ok_or(anyhow!("no match data file"))?)?;
    let roster = dataset.roster();
    info!(
        "loaded {} matches across {} rounds, featuring {} teams",
        dataset.len(),
        dataset.num_rounds(),
        roster.len()
    );
    if args.list_teams {
        for team in roster.iter() {
            println!("{team}");
        }
        return Ok(());
    }

    let round = config.parse_round(args.round.as_deref().unwrap_or_default())?;
    let query = AnalysisQuery {
        round,
        team: args.team,
        is_future: args.future,
        declared_venue: args.venue,
    };
    if let TeamSelector::Team(team) = &query.team {
        if !roster.contains(team) {
            return Err(anyhow!("unknown team '{team}'").into());
        }
    }
    info!(
        "analysing {} in round {round} (valid rounds {})",
        query.team,
        DisplayRangeInclusive::from(&config.rounds)
    );

    let result = analyse(&dataset, &query, &config)?;
    info!(
        "selected matches:\n{}",
        Console::default().render(&tabulate_matches(&result.selected_matches))
    );
    if let Some(venue) = result.venue {
        info!(
            "goals scored by {} at {venue}:\n{}",
            query.team,
            Console::default().render(&tabulate_frequencies(&result.scored_frequencies))
        );
    }
    if let Some(shortfall) = &result.shortfall {
        warn!("{shortfall}");
    }
    if let (Some(mean), Some(probs)) = (result.mean_opponent_goals, result.goal_probabilities) {
        info!("mean goals conceded: {mean:.3}");
        info!(
            "goal probabilities (Poisson):\n{}",
            Console::default().render(&tabulate_probabilities(&probs))
        );
    }

    if let Some(out) = args.out {
        let mut csv = CsvWriter::create(&out)?;
        csv.append(Record::with_values(Column::iter()))?;
        for record in &result.selected_matches {
            csv.append(record.to_record())?;
        }
        csv.flush()?;
        info!("wrote {} matches to {out:?}", result.selected_matches.len());
    }

    Ok(())
}
