use crate::domain::model::{ApiResponse, HomeworkRecord};
use crate::utils::error::{NotifierError, Result};
use serde_json::Value;

/// Checks the payload shape and turns it into an [`ApiResponse`].
pub fn validate(raw: Value) -> Result<ApiResponse> {
    let mut payload = match raw {
        Value::Object(map) => map,
        other => {
            return Err(NotifierError::TypeMismatchError {
                message: format!("expected a JSON object, got {}", type_name(&other)),
            })
        }
    };

    let homeworks = payload
        .remove("homeworks")
        .ok_or_else(|| missing("homeworks"))?;
    let current_date = payload
        .remove("current_date")
        .ok_or_else(|| missing("current_date"))?;

    let items = match homeworks {
        Value::Array(items) => items,
        other => {
            return Err(NotifierError::TypeMismatchError {
                message: format!("`homeworks` is {}, not a list", type_name(&other)),
            })
        }
    };

    let current_date = current_date
        .as_i64()
        .ok_or_else(|| NotifierError::TypeMismatchError {
            message: format!("`current_date` is {}, not an integer", type_name(&current_date)),
        })?;

    // Records are not inspected here; the interpreter checks the latest one.
    let homeworks: Vec<HomeworkRecord> = items.into_iter().map(HomeworkRecord).collect();

    tracing::debug!(
        "Response validated: {} homework(s), current_date={}",
        homeworks.len(),
        current_date
    );

    Ok(ApiResponse {
        homeworks,
        current_date,
    })
}

fn missing(field: &str) -> NotifierError {
    NotifierError::MissingFieldError {
        field: field.to_string(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
