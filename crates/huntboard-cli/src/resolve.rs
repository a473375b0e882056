//! Input resolution helpers: partial target ids and human date expressions.

use chrono::{DateTime, NaiveDate, SubsecRound, TimeDelta, Utc};
use huntboard_core::model::JobTarget;
use huntboard_core::model::job_target::TARGET_ID_PREFIX;
use uuid::Uuid;

/// Find the target `input` refers to.
///
/// Resolution order:
/// 1. Exact id match.
/// 2. `input` with the `jt_` prefix added (`1700000000000_ab12cd3`).
/// 3. A unique target whose id starts or ends with `input`.
///
/// Ambiguous partial ids resolve to nothing.
pub fn resolve_target<'a>(targets: &'a [JobTarget], input: &str) -> Option<&'a JobTarget> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Some(found) = targets.iter().find(|t| t.id == input) {
        return Some(found);
    }

    if !input.starts_with(TARGET_ID_PREFIX) {
        let prefixed = format!("{TARGET_ID_PREFIX}{input}");
        if let Some(found) = targets.iter().find(|t| t.id == prefixed) {
            return Some(found);
        }
    }

    let mut candidates = targets
        .iter()
        .filter(|t| t.id.starts_with(input) || t.id.ends_with(input));
    let first = candidates.next()?;
    if candidates.next().is_some() {
        return None;
    }
    Some(first)
}

/// Find the record id `input` refers to: a full UUID or a unique prefix of
/// its hyphenated form.
pub fn resolve_record_id(ids: impl IntoIterator<Item = Uuid>, input: &str) -> Option<Uuid> {
    let input = input.trim().to_ascii_lowercase();
    if input.is_empty() {
        return None;
    }
    let mut candidates = ids
        .into_iter()
        .filter(|id| id.hyphenated().to_string().starts_with(&input));
    let first = candidates.next()?;
    if candidates.next().is_some() {
        return None;
    }
    Some(first)
}

/// Parse a date expression relative to the current time.
///
/// # Errors
///
/// Returns a message describing the accepted forms when `input` matches
/// none of them.
pub fn parse_when(input: &str) -> Result<DateTime<Utc>, String> {
    parse_when_at(input, Utc::now().trunc_subsecs(3))
}

/// Parse a date expression relative to `now`.
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DD` (midnight UTC), `now`,
/// `today`, `tomorrow`, and offsets such as `+3d`, `+2w` or `+6h`.
///
/// # Errors
///
/// Returns a message describing the accepted forms when `input` matches
/// none of them.
pub fn parse_when_at(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, String> {
    let raw = input.trim();
    let lower = raw.to_ascii_lowercase();

    match lower.as_str() {
        "now" => return Ok(now),
        "today" => return Ok(start_of_day(now)),
        "tomorrow" => return Ok(start_of_day(now) + TimeDelta::days(1)),
        _ => {}
    }

    if let Some(offset) = lower.strip_prefix('+') {
        return parse_offset(offset)
            .and_then(|delta| now.checked_add_signed(delta))
            .ok_or_else(|| invalid(raw));
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc).trunc_subsecs(3));
    }

    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(day.and_hms_opt(0, 0, 0).map_or(now, |dt| dt.and_utc()));
    }

    Err(invalid(raw))
}

fn parse_offset(offset: &str) -> Option<TimeDelta> {
    let unit = offset.chars().last()?;
    let amount: i64 = offset[..offset.len() - unit.len_utf8()].parse().ok()?;
    match unit {
        'h' => TimeDelta::try_hours(amount),
        'd' => TimeDelta::try_days(amount),
        'w' => TimeDelta::try_weeks(amount),
        _ => None,
    }
}

fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .map_or(now, |dt| dt.and_utc())
}

fn invalid(raw: &str) -> String {
    format!(
        "invalid date '{raw}': use YYYY-MM-DD, an RFC 3339 timestamp, today, tomorrow or +N[h|d|w]"
    )
}
