use crate::domain::model::{HomeworkRecord, Verdict};
use crate::utils::error::{NotifierError, Result};
use serde_json::Value;

fn verdict(record: &HomeworkRecord) -> Result<Verdict> {
    let status = record.field("status").ok_or_else(|| incomplete("status"))?;

    // A non-string status is as unknown as a misspelled one.
    status
        .as_str()
        .and_then(Verdict::from_status)
        .ok_or_else(|| {
            tracing::error!("Unknown homework status in response: {}", status);
            NotifierError::UnknownStatusError {
                status: display(status),
            }
        })
}

/// Status key of a record, checked against the known verdicts.
pub fn status_key(record: &HomeworkRecord) -> Result<&'static str> {
    verdict(record).map(|verdict| verdict.status_key())
}

pub fn interpret(record: &HomeworkRecord) -> Result<String> {
    let name = record
        .field("homework_name")
        .ok_or_else(|| incomplete("homework_name"))?;
    let verdict = verdict(record)?;
    let name = display(name);

    tracing::debug!("Homework '{}' has status '{}'", name, verdict.status_key());
    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        name,
        verdict.text()
    ))
}

fn display(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn incomplete(field: &str) -> NotifierError {
    NotifierError::IncompleteRecordError {
        field: field.to_string(),
    }
}
