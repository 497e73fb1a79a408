use std::env;
use std::fs;
use std::process;

use piano_drill::transpose::parse_key;
use piano_drill::{
    to_musicxml, MeasureCount, Pitch, Player, PracticeConfig, PracticeSession, Round, StrategyKind,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

const USAGE: &str = "Usage: piano-drill [--config FILE] [--seed N] [--measures 2|4] [--chords] [--key K] [--musicxml OUT] [--json]";

/// The terminal has no audio; scheduled notes are only logged
struct LogPlayer;

impl Player for LogPlayer {
    fn schedule_note(&mut self, pitch: &Pitch, duration: f64, at: f64) {
        debug!(note = %pitch, at, duration, "note");
    }

    fn attack(&mut self, pitch: &Pitch) {
        debug!(note = %pitch, "attack");
    }

    fn release(&mut self, pitch: &Pitch) {
        debug!(note = %pitch, "release");
    }
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}

fn flag_value(args: &mut impl Iterator<Item = String>) -> String {
    args.next().unwrap_or_else(|| fail(USAGE))
}

fn main() {
    // Logs go to stderr so stdout stays clean for --json
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let mut args = env::args().skip(1);

    let mut config_path: Option<String> = None;
    let mut seed: Option<u64> = None;
    let mut measures: Option<MeasureCount> = None;
    let mut chords = false;
    let mut key: Option<String> = None;
    let mut musicxml_path: Option<String> = None;
    let mut json = false;

    // Parse flags
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config_path = Some(flag_value(&mut args)),
            "--seed" => {
                let text = flag_value(&mut args);
                seed = Some(text.parse().unwrap_or_else(|_| fail(format!("Invalid seed: {}", text))));
            }
            "--measures" => {
                measures = Some(flag_value(&mut args).parse().unwrap_or_else(|e| fail(e)));
            }
            "--key" => key = Some(flag_value(&mut args)),
            "--musicxml" => musicxml_path = Some(flag_value(&mut args)),
            "--chords" => chords = true,
            "--json" => json = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                fail(USAGE);
            }
        }
    }

    // Load configuration, then apply overrides
    let mut config = match config_path {
        Some(path) => match PracticeConfig::from_file(&path) {
            Ok(config) => config,
            Err(e) => fail(format!("Error reading config '{}': {}", path, e)),
        },
        None => PracticeConfig::default(),
    };
    if let Some(seed) = seed {
        config.seed = Some(seed);
    }
    if let Some(measures) = measures {
        config.measures = measures;
    }
    if chords {
        config.mode = StrategyKind::Chords;
    }
    if let Some(key) = key {
        config.key = parse_key(&key).unwrap_or_else(|e| fail(e));
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut session = PracticeSession::new(config);
    let round = match session.regenerate(&mut rng, Some(&mut LogPlayer), None) {
        Some(round) => round,
        None => fail("Could not generate a drill"),
    };

    if let Some(path) = musicxml_path {
        let xml = to_musicxml(&round.layout, Some(&round.composition.label));
        if let Err(e) = fs::write(&path, &xml) {
            fail(format!("Error writing to '{}': {}", path, e));
        }
        eprintln!("Wrote MusicXML to {}", path);
    }

    // Output
    match format_round(&round, json) {
        Ok(text) => print!("{}", text),
        Err(e) => fail(format!("Error encoding JSON: {}", e)),
    }
}

/// The round as printed on stdout: pretty JSON, or a short text summary
fn format_round(round: &Round, json: bool) -> Result<String, serde_json::Error> {
    if json {
        let mut text = serde_json::to_string_pretty(round)?;
        text.push('\n');
        return Ok(text);
    }

    let mut text = format!("{}\n", round.composition.label);
    for (number, measure) in round.layout.measure_strings().iter().enumerate() {
        text.push_str(&format!("  {}: {}\n", number + 1, measure));
    }
    let captions: Vec<String> = round.captions.iter().map(|c| c.syllable.to_string()).collect();
    text.push_str(&format!("  {}\n", captions.join(" ")));
    text.push_str(&format!("  {:.2}s at {} bpm\n", round.total_seconds, round.schedule.tempo));
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(seed: u64) -> Round {
        let mut session = PracticeSession::default();
        let mut rng = StdRng::seed_from_u64(seed);
        session.regenerate(&mut rng, Some(&mut LogPlayer), None).unwrap()
    }

    #[test]
    fn test_json_output_is_only_json() {
        let round = round(3);
        let text = format_round(&round, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["composition"]["label"], round.composition.label.as_str());
        assert_eq!(value["layout"]["measures"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_text_output() {
        let round = round(3);
        let text = format_round(&round, false).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], round.composition.label);
        assert_eq!(lines.len(), 1 + 4 + 2);
        assert!(lines[1].starts_with("  1: "));
        assert_eq!(lines[6], "  8.00s at 120 bpm");
    }
}
