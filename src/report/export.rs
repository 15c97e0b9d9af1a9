use std::path::Path;

use tokio::io::{AsyncWriteExt, BufWriter};

use crate::domain::{PERCENTILE_POINTS, WorkerResult};
use crate::error::OutputError;

use super::AttackOutcome;

/// Writes one row per percentile index: the global value followed by each
/// completed worker's own value, in fleet order. With no completed workers
/// only the header is written.
///
/// # Errors
///
/// Returns an error when the file cannot be created or written.
pub async fn write_comparison_csv(path: &Path, outcome: &AttackOutcome) -> Result<(), OutputError> {
    let mut header = String::from("percentile,global");
    let mut columns = Vec::new();
    for worker in &outcome.workers {
        if let Some(sample) = worker.result.sample() {
            header.push(',');
            header.push_str(&worker.worker_id);
            columns.push(sample.latency_percentiles.as_slice());
        }
    }
    header.push('\n');

    let mut body = header;
    if outcome.report.has_percentiles() {
        for idx in 0..PERCENTILE_POINTS {
            body.push_str(&idx.to_string());
            for value in std::iter::once(outcome.report.percentile(idx))
                .chain(columns.iter().map(|column| column.get(idx).copied()))
            {
                body.push(',');
                if let Some(value) = value {
                    body.push_str(&value.to_string());
                }
            }
            body.push('\n');
        }
    }

    write_file(path, body.as_bytes()).await
}

/// Writes the report, verdict, assessment and per-worker outcomes as pretty
/// JSON.
///
/// # Errors
///
/// Returns an error when serialization or the write fails.
pub async fn export_json(path: &Path, outcome: &AttackOutcome) -> Result<(), OutputError> {
    let workers: Vec<serde_json::Value> = outcome
        .workers
        .iter()
        .map(|worker| {
            let detail = match &worker.result {
                WorkerResult::TransportError(detail) => Some(detail.as_str()),
                WorkerResult::Completed(_) | WorkerResult::Timeout => None,
            };
            serde_json::json!({
                "worker_id": worker.worker_id,
                "address": worker.address,
                "status": worker.result.label(),
                "detail": detail,
                "sample": worker.result.sample(),
            })
        })
        .collect();

    let payload = serde_json::json!({
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "url": outcome.url,
        "algorithm": outcome.algorithm.as_str(),
        "undispatched_requests": outcome.undispatched_requests,
        "undispatched_concurrency": outcome.undispatched_concurrency,
        "report": outcome.report,
        "verdict": outcome.verdict.map(|verdict| verdict.as_str()),
        "accepted": outcome.accepted(),
        "assessment": outcome.assessment.map(|assessment| assessment.message()),
        "workers": workers,
    });
    let json =
        serde_json::to_vec_pretty(&payload).map_err(|err| OutputError::Serialize { source: err })?;
    write_file(path, &json).await
}

async fn write_file(path: &Path, bytes: &[u8]) -> Result<(), OutputError> {
    let wrap = |err: std::io::Error| OutputError::Write {
        path: path.to_path_buf(),
        source: err,
    };
    let file = tokio::fs::File::create(path).await.map_err(wrap)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes).await.map_err(wrap)?;
    writer.flush().await.map_err(wrap)?;
    Ok(())
}
