// File: src/model/time.rs
//! Free-form time strings ("1pm", "12:30am", "14:00", "9:5") to canonical `HH:MM`.

/// Outcome of reading a raw time field.
///
/// `normalize_time` collapses `Absent` and `Invalid` into `None`; editors that
/// need to tell "left blank" from "could not parse" use `parse_time_input`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeInput {
    Absent,
    Invalid,
    Valid(String),
}

impl TimeInput {
    pub fn into_option(self) -> Option<String> {
        match self {
            TimeInput::Valid(t) => Some(t),
            _ => None,
        }
    }
}

/// Grammar: `hour[:minute][ ]*[am|pm]` where hour and minute are 1-2 digits.
/// Returns (hour, minute, meridiem) without range checks.
fn split_time(s: &str) -> Option<(u32, u32, Option<bool>)> {
    let (body, is_pm) = if let Some(stripped) = s.strip_suffix("am") {
        (stripped.trim_end(), Some(false))
    } else if let Some(stripped) = s.strip_suffix("pm") {
        (stripped.trim_end(), Some(true))
    } else {
        (s, None)
    };

    let (h_str, m_str) = match body.split_once(':') {
        Some((h, m)) => (h, Some(m)),
        None => (body, None),
    };

    let digits = |part: &str| -> Option<u32> {
        if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        part.parse::<u32>().ok()
    };

    let hour = digits(h_str)?;
    let minute = match m_str {
        Some(m) => digits(m)?,
        None => 0,
    };
    Some((hour, minute, is_pm))
}

pub fn parse_time_input(input: &str) -> TimeInput {
    let lower = input.trim().to_lowercase();
    if lower.is_empty() {
        return TimeInput::Absent;
    }

    let Some((mut hour, minute, meridiem)) = split_time(&lower) else {
        return TimeInput::Invalid;
    };

    if let Some(is_pm) = meridiem {
        if !(1..=12).contains(&hour) {
            return TimeInput::Invalid;
        }
        if hour == 12 {
            hour = 0;
        }
        if is_pm {
            hour += 12;
        }
    }

    if hour > 23 || minute > 59 {
        return TimeInput::Invalid;
    }

    TimeInput::Valid(format!("{:02}:{:02}", hour, minute))
}

/// Canonical `HH:MM` for anything the grammar accepts; `None` for blank or invalid input.
pub fn normalize_time(input: Option<&str>) -> Option<String> {
    parse_time_input(input?).into_option()
}

/// Minutes since midnight for a canonical (or normalizable) time string.
pub fn time_to_minutes(time: &str) -> Option<u32> {
    let canonical = normalize_time(Some(time))?;
    let (h, m) = canonical.split_once(':')?;
    Some(h.parse::<u32>().ok()? * 60 + m.parse::<u32>().ok()?)
}

pub fn minutes_to_time(minutes: u32) -> String {
    format!("{:02}:{:02}", (minutes / 60) % 24, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tri_state_distinguishes_blank_from_garbage() {
        assert_eq!(parse_time_input("   "), TimeInput::Absent);
        assert_eq!(parse_time_input("noon"), TimeInput::Invalid);
        assert_eq!(parse_time_input("9 AM"), TimeInput::Valid("09:00".into()));
    }

    #[test]
    fn test_split_rejects_three_digit_parts() {
        assert_eq!(split_time("123"), None);
        assert_eq!(split_time("1:234"), None);
        assert_eq!(split_time(":30"), None);
        assert_eq!(split_time("7:"), None);
    }

    #[test]
    fn test_minutes_helpers() {
        assert_eq!(time_to_minutes("1:30pm"), Some(13 * 60 + 30));
        assert_eq!(time_to_minutes("bogus"), None);
        assert_eq!(minutes_to_time(605), "10:05");
    }
}
