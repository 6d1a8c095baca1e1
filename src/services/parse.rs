// SPDX-License-Identifier: MIT

//! Defensive extraction of a reading from raw completion text.
//!
//! Permissive only about markdown fencing. After the strict JSON parse,
//! array cardinalities are verified; anything else fails whole with the
//! raw text preserved for diagnostics. No partial extraction.

use crate::error::AppError;
use crate::models::ReadingResponse;

const STRENGTHS_COUNT: usize = 3;
const WATCH_OUTS_COUNT: usize = 2;
const NEXT7_DAYS_COUNT: usize = 3;

/// Parse raw completion text into a fully populated `ReadingResponse`.
pub fn parse_reading_response(text: &str) -> Result<ReadingResponse, AppError> {
    let cleaned = strip_fences(text);

    let reading: ReadingResponse = serde_json::from_str(cleaned)
        .map_err(|_| AppError::MalformedResponse(text.to_string()))?;

    if reading.strengths.len() != STRENGTHS_COUNT
        || reading.watch_outs.len() != WATCH_OUTS_COUNT
        || reading.next7_days.len() != NEXT7_DAYS_COUNT
    {
        return Err(AppError::MalformedResponse(text.to_string()));
    }

    Ok(reading)
}

/// Strip a leading triple-backtick fence (optionally tagged `json`) and
/// the matching closing fence, if present.
fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_prefix('\n').unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    let rest = rest.strip_suffix('\n').unwrap_or(rest);

    rest.trim()
}
