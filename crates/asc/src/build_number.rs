//! Build number ordering (`CFBundleVersion`).
//!
//! Build numbers are dot-separated integers such as `42` or `1.2.3`.
//! Missing trailing segments compare as zero, so `1.2` == `1.2.0`. Anything
//! that is not purely numeric sorts below every numeric build number and
//! compares as a plain string against other non-numeric values.

use std::cmp::Ordering;
use std::fmt;

use crate::error::CliError;

#[derive(Debug, Clone)]
pub struct BuildNumber {
    raw: String,
    segments: Option<Vec<u64>>,
}

fn parse_segments(raw: &str) -> Option<Vec<u64>> {
    if raw.is_empty() {
        return None;
    }
    raw.split('.')
        .map(|segment| {
            if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                None
            } else {
                segment.parse::<u64>().ok()
            }
        })
        .collect()
}

impl BuildNumber {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim().to_string();
        let segments = parse_segments(&raw);
        Self { raw, segments }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_numeric(&self) -> bool {
        self.segments.is_some()
    }

    /// Increments the last segment: `41` -> `42`, `1.2.9` -> `1.2.10`.
    pub fn next(&self) -> Result<BuildNumber, CliError> {
        let Some(segments) = &self.segments else {
            return Err(CliError::InvalidInput(format!(
                "cannot compute the next build number after non-numeric '{}'",
                self.raw
            )));
        };
        let mut next = segments.clone();
        if let Some(last) = next.last_mut() {
            *last = last.checked_add(1).ok_or_else(|| {
                CliError::InvalidInput(format!("build number '{}' is too large", self.raw))
            })?;
        }
        let raw = next
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(".");
        Ok(BuildNumber {
            raw,
            segments: Some(next),
        })
    }

    /// The number that follows `latest`, or `1` when there is none yet.
    pub fn next_after(latest: Option<&BuildNumber>) -> Result<BuildNumber, CliError> {
        match latest {
            Some(latest) => latest.next(),
            None => Ok(BuildNumber::parse("1")),
        }
    }
}

fn compare_segments(a: &[u64], b: &[u64]) -> Ordering {
    let len = a.len().max(b.len());
    for i in 0..len {
        let left = a.get(i).copied().unwrap_or(0);
        let right = b.get(i).copied().unwrap_or(0);
        match left.cmp(&right) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

impl Ord for BuildNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.segments, &other.segments) {
            (Some(a), Some(b)) => compare_segments(a, b),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => self.raw.cmp(&other.raw),
        }
    }
}

impl PartialOrd for BuildNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for BuildNumber {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BuildNumber {}

impl fmt::Display for BuildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
