use rst_common::standard::chrono::{NaiveDate, NaiveDateTime};

use super::credential::CredentialRecord;
use super::types::{AllowList, ISSUE_DATE_ATTRIBUTE};

const MS_IN_DAY: i64 = 1000 * 60 * 60 * 24;

/// `InvalidReason` explains why an attestation credential must be removed from the wallet
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidReason {
    MissingIssueDate,
    MalformedIssueDate(String),
    Revoked,
    Expired { days: i64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// not an attestation credential, never touched
    Skipped,
    Valid,
    Invalid(InvalidReason),
}

/// `Classification` is the outcome of the pure classification phase
///
/// Records keep the order the agent returned them in. Skipped records are dropped
#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub valid: Vec<CredentialRecord>,
    pub invalid: Vec<(CredentialRecord, InvalidReason)>,
}

/// `parse_issue_date` reads a `YYYYMMDD` date. Anything that isn't an existing calendar day
/// is rejected
pub fn parse_issue_date(raw: &str) -> Option<NaiveDate> {
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let year = raw[0..4].parse::<i32>().ok()?;
    let month = raw[4..6].parse::<u32>().ok()?;
    let day = raw[6..8].parse::<u32>().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// `days_since` counts the days elapsed from the start of `issued` until `now`, rounding any
/// partial day up
pub fn days_since(issued: NaiveDate, now: NaiveDateTime) -> Option<i64> {
    let issued_at = issued.and_hms_opt(0, 0, 0)?;
    let elapsed_ms = (now - issued_at).num_milliseconds();

    let whole_days = elapsed_ms.div_euclid(MS_IN_DAY);
    if elapsed_ms.rem_euclid(MS_IN_DAY) > 0 {
        return Some(whole_days + 1);
    }

    Some(whole_days)
}

/// `evaluate` gives the verdict of a single stored credential
pub fn evaluate(
    record: &CredentialRecord,
    allow_list: &AllowList,
    max_age_days: i64,
    now: NaiveDateTime,
) -> Verdict {
    let is_attestation = record
        .get_cred_def_id()
        .is_some_and(|cred_def_id| allow_list.contains(cred_def_id));

    if !is_attestation {
        return Verdict::Skipped;
    }

    let Some(raw_date) = record
        .get_attribute(ISSUE_DATE_ATTRIBUTE)
        .filter(|value| !value.is_empty())
    else {
        return Verdict::Invalid(InvalidReason::MissingIssueDate);
    };

    let Some(days) = parse_issue_date(raw_date).and_then(|issued| days_since(issued, now)) else {
        return Verdict::Invalid(InvalidReason::MalformedIssueDate(raw_date.to_string()));
    };

    if record.is_revoked() {
        return Verdict::Invalid(InvalidReason::Revoked);
    }

    if days > max_age_days {
        return Verdict::Invalid(InvalidReason::Expired { days });
    }

    Verdict::Valid
}

/// `classify` splits the stored credentials into valid and invalid attestation credentials
/// without touching the wallet
pub fn classify(
    records: Vec<CredentialRecord>,
    allow_list: &AllowList,
    max_age_days: i64,
    now: NaiveDateTime,
) -> Classification {
    let mut classification = Classification::default();

    for record in records {
        match evaluate(&record, allow_list, max_age_days, now) {
            Verdict::Skipped => {}
            Verdict::Valid => classification.valid.push(record),
            Verdict::Invalid(reason) => classification.invalid.push((record, reason)),
        }
    }

    classification
}
