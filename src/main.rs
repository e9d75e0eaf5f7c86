use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use cardio_risk::utils::logging::console::{print_assessment, print_record_summary};
use cardio_risk::utils::logging::{create_main_progress_bar, finish_progress_bar, log_failure};
use cardio_risk::{PredictorConfig, RawRecord, RiskPredictor, encode, validate_with_policy};
use log::{error, info};

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(input) = std::env::args().nth(1).map(PathBuf::from) else {
        bail!("usage: cardio-risk <record.json | records.jsonl>");
    };

    let config = PredictorConfig::from_env();
    let predictor = match RiskPredictor::from_config(&config) {
        Ok(predictor) => predictor,
        Err(err) => {
            error!("Error loading model: {err}");
            return Err(err).context("model initialization failed");
        }
    };

    if input.extension().is_some_and(|ext| ext == "jsonl") {
        assess_batch(&predictor, &input)
    } else {
        assess_single(&predictor, &input)
    }
}

/// Assess one record and print the summary and result panel
fn assess_single(predictor: &RiskPredictor, path: &Path) -> anyhow::Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read record file: {}", path.display()))?;
    let raw: RawRecord = serde_json::from_str(&text)
        .with_context(|| format!("Record file is not a valid JSON record: {}", path.display()))?;

    let record = match validate_with_policy(&raw, predictor.config().range_policy) {
        Ok(record) => record,
        Err(err) => {
            println!("{}", err.user_message());
            bail!("record rejected: {err}");
        }
    };

    let features = encode(&record)?;
    print_record_summary(&features.summary()?);
    println!();

    match predictor.classify(&features) {
        Ok(assessment) => {
            print_assessment(&assessment);
            Ok(())
        }
        Err(err) => {
            log_failure(&err);
            println!("{}", err.user_message());
            Err(err.into())
        }
    }
}

/// Assess every line of a JSON-lines file in parallel, printing one JSON result per line
///
/// Lines that are not valid JSON records are reported in place and never reach the
/// predictor.
fn assess_batch(predictor: &RiskPredictor, path: &Path) -> anyhow::Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read records file: {}", path.display()))?;
    let parsed: Vec<Result<RawRecord, String>> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).map_err(|err| format!("invalid JSON: {err}")))
        .collect();

    let records: Vec<RawRecord> = parsed
        .iter()
        .filter_map(|line| line.as_ref().ok().cloned())
        .collect();
    info!(
        "Assessing {} of {} records from {}",
        records.len(),
        parsed.len(),
        path.display()
    );

    let pb = create_main_progress_bar(records.len() as u64, Some("assessing"));
    let mut assessed = predictor
        .assess_many_with_progress(&records, Some(&pb))
        .into_iter();
    finish_progress_bar(&pb, "done");

    for (idx, line) in parsed.into_iter().enumerate() {
        let output = match line {
            Ok(_) => match assessed.next() {
                Some(Ok(assessment)) => {
                    serde_json::json!({ "record": idx + 1, "assessment": assessment })
                }
                Some(Err(err)) => serde_json::json!({ "record": idx + 1, "error": err.user_message() }),
                None => bail!("missing result for record {}", idx + 1),
            },
            Err(message) => serde_json::json!({ "record": idx + 1, "error": message }),
        };
        println!("{output}");
    }

    Ok(())
}
