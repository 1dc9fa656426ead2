//! Envelope fields: transmission identifier and nondisclosure deadline.

use regex::Regex;
use std::sync::LazyLock;

// Both date orders occur after the declassification label:
// month/day/year (year in two or four digits) and year/month/day.
static RE_DEADLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)E\.?O\.?\s*12958:?\s*DECL\s*:?\s*(?:([0-9]{1,2})/([0-9]{1,2})/([0-9]{2,4})|([0-9]{4})/([0-9]{2})/([0-9]{2}))",
    )
    .unwrap()
});
static RE_TRANSMISSION_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(VZCZ[A-Z]+[0-9]+)").unwrap());

/// Extracts the declassification deadline as an ISO `YYYY-MM-DD` date.
pub fn parse_nondisclosure_deadline(content: &str) -> Option<String> {
    let caps = RE_DEADLINE.captures(content)?;
    let (year, month, day) = if caps.get(1).is_some() {
        let month: u32 = caps[1].parse().ok()?;
        let day: u32 = caps[2].parse().ok()?;
        let year: u32 = caps[3].parse().ok()?;
        let year = if caps[3].len() == 2 { 2000 + year } else { year };
        (year, month, day)
    } else {
        (
            caps[4].parse().ok()?,
            caps[5].parse().ok()?,
            caps[6].parse().ok()?,
        )
    };
    Some(format!("{year:04}-{month:02}-{day:02}"))
}

/// Extracts the transmission identifier from a transmission header.
pub fn parse_transmission_id(header: &str) -> Option<String> {
    RE_TRANSMISSION_ID
        .captures(header)
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadline_month_first() {
        let content = "E.O. 12958: DECL: 03/04/19\nTAGS: PREL\n";
        assert_eq!(
            parse_nondisclosure_deadline(content).as_deref(),
            Some("2019-03-04")
        );
    }

    #[test]
    fn test_deadline_four_digit_year() {
        assert_eq!(
            parse_nondisclosure_deadline("E.O. 12958: DECL: 3/4/2019").as_deref(),
            Some("2019-03-04")
        );
        assert_eq!(
            parse_nondisclosure_deadline("EO 12958 DECL: 2019/03/04").as_deref(),
            Some("2019-03-04")
        );
    }

    #[test]
    fn test_no_deadline() {
        assert_eq!(parse_nondisclosure_deadline("1. Body only."), None);
    }

    #[test]
    fn test_transmission_id() {
        let header = "VZCZCXRO4790\nOO RUEHBC RUEHDE\nDE RUEHGB #1234/01\n";
        assert_eq!(
            parse_transmission_id(header).as_deref(),
            Some("VZCZCXRO4790")
        );
        assert_eq!(parse_transmission_id("FM AMEMBASSY OSLO"), None);
    }
}
