use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;

use scoreboard::model::Match;
use scoreboard::recorded::Recording;
use scoreboard::summary::{DamageSummary, WeaponSummary};

#[derive(Parser)]
#[command(name = "scoreboard")]
#[command(about = "Aggregate a recorded match into its scoreboard", long_about = None)]
struct Cli {
    /// Recorded match as JSON
    input: PathBuf,

    /// Identifier of the match, defaults to the file name up to the first `_`
    #[arg(long)]
    match_id: Option<String>,

    /// Pretty print the output
    #[arg(long, default_value = "false")]
    pretty: bool,

    /// Include the weapon and head to head damage summaries
    #[arg(long, default_value = "false")]
    summary: bool,

    #[arg(long, default_value = "info")]
    log_level: tracing::Level,
}

#[derive(serde::Serialize)]
struct Report<'m> {
    #[serde(flatten)]
    scoreboard: &'m Match,
    #[serde(skip_serializing_if = "Option::is_none")]
    weapons: Option<BTreeMap<String, WeaponSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    damages: Option<DamageSummary>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = cli.log_level;
    let registry = tracing_subscriber::Registry::default()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::filter::filter_fn(move |meta| {
            meta.target().starts_with("scoreboard") && meta.level() <= &level
        }));
    tracing::subscriber::set_global_default(registry)?;

    if let Err(e) = run(&cli) {
        tracing::error!(input = %cli.input.display(), "Failed to aggregate match: {}", e);
        return Err(e);
    }

    Ok(())
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let input = std::fs::read_to_string(&cli.input)?;
    let recording: Recording = serde_json::from_str(&input)?;
    tracing::debug!(frames = recording.frames.len(), "Loaded recording");

    let config = scoreboard::Config {
        match_id: cli
            .match_id
            .clone()
            .unwrap_or_else(|| match_id_from_path(&cli.input)),
        ..Default::default()
    };

    let result = scoreboard::parse(&config, &mut recording.stream())?;

    let report = Report {
        scoreboard: &result,
        weapons: cli.summary.then(|| result.weapon_summary()),
        damages: cli.summary.then(|| result.damage_summary()),
    };

    let output = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", output);

    Ok(())
}

fn match_id_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    match stem.split_once('_') {
        Some((id, _)) => id.to_owned(),
        None => stem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn match_id_from_file_name() {
        assert_eq!(
            "1042",
            match_id_from_path(Path::new("testfiles/1042_short_match.json"))
        );
        assert_eq!("demo", match_id_from_path(Path::new("/tmp/demo.json")));
        assert_eq!("", match_id_from_path(Path::new("/")));
    }

    #[test]
    fn report_of_recording() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../testfiles/1042_short_match.json");
        let input = std::fs::read_to_string(path).unwrap();
        let recording: Recording = serde_json::from_str(&input).unwrap();
        let result =
            scoreboard::parse(&scoreboard::Config::default(), &mut recording.stream()).unwrap();

        let report = Report {
            scoreboard: &result,
            weapons: Some(result.weapon_summary()),
            damages: None,
        };
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(serde_json::json!("de_mirage"), value["general"]["map_name"]);
        assert_eq!(serde_json::json!(2), value["weapons"]["m4a1_silencer"]["total_shots"]);
        assert!(value.get("damages").is_none());
    }
}
