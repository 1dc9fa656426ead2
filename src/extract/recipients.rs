//! Recipient extraction from the transmission header.
//!
//! The header lists addressees in a `TO` block and onlookers in an
//! `INFO` block. Each line carries an optional routing code, the
//! organizational name, and an optional precedence marker. Routing
//! codes missing from a line are resolved from the name through
//! [`RouteTable`]; military relay codes (`RHMFISS`, `RHMFIUU`) are
//! transport artifacts and are not kept as routes.

use crate::exceptions;
use crate::model::Recipient;
use crate::routes::RouteTable;
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

static RE_TO_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\nTO\s+(?:PAGE [0-9]+ [A-Z]+ [0-9]+ [0-9]+Z\s*)?(.+?)(?:\nINFO\s|\z)")
        .unwrap()
});
static RE_INFO_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\nTO\s.+?\nINFO\s+(.+?)\z").unwrap());
static RE_RECIPIENT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(?:([A-Z]+)/)?([A-Z][A-Z -]+)(?:[ ]*([0-9]+))?.*$").unwrap());

const PRECEDENCE_MARKERS: &[&str] = &["NIACT IMMEDIATE", "IMMEDIATE", "PRIORITY"];
// Names that are transport noise, not addressees. The relay codes
// appear as bare lines in some ANKARA cables.
const NOISE_NAMES: &[&str] = &["PAGE", "RHMFISS", "RHMFIUU"];
const RELAY_ROUTES: &[&str] = &["RHMFISS", "RHMFIUU"];

/// Extracts the addressees from the `TO` block of a transmission
/// header. A missing block is reported unless the cable is known to
/// have been released without one.
pub fn parse_recipients(header: &str, reference_id: &str, routes: &RouteTable) -> Vec<Recipient> {
    match RE_TO_BLOCK.captures(header) {
        Some(caps) => recipients_from_block(&caps[1], reference_id, routes),
        None => {
            if !exceptions::tables().allows_missing_to(reference_id) {
                warn!(reference_id, "transmission header has no TO block");
            }
            Vec::new()
        }
    }
}

/// Extracts the onlookers from the `INFO` block. Cables without an
/// `INFO` block are common and unremarkable.
pub fn parse_info_recipients(
    header: &str,
    reference_id: &str,
    routes: &RouteTable,
) -> Vec<Recipient> {
    match RE_INFO_BLOCK.captures(header) {
        Some(caps) => recipients_from_block(&caps[1], reference_id, routes),
        None => Vec::new(),
    }
}

fn recipients_from_block(
    block: &str,
    reference_id: &str,
    routes: &RouteTable,
) -> Vec<Recipient> {
    let mut recipients = Vec::new();
    for caps in RE_RECIPIENT_LINE.captures_iter(block) {
        let mut route = caps.get(1).map(|m| m.as_str().to_string());
        if route
            .as_deref()
            .is_some_and(|r| RELAY_ROUTES.contains(&r))
        {
            route = None;
        }

        let mut name = caps[2].trim().to_string();
        let mcn = caps.get(3).map(|m| m.as_str().to_string());
        let mut precedence = None;
        for marker in PRECEDENCE_MARKERS {
            if let Some(stripped) = name.strip_suffix(marker) {
                precedence = Some((*marker).to_string());
                name = stripped.trim_end().to_string();
                break;
            }
        }
        let name = exceptions::tables()
            .apply_recipient_fixes(reference_id, &name)
            .trim()
            .to_string();
        if name.is_empty() || NOISE_NAMES.contains(&name.as_str()) {
            continue;
        }
        if route.is_none() {
            route = routes.route_for_name(&name).map(str::to_string);
        }
        recipients.push(Recipient {
            route,
            name,
            precedence,
            mcn,
            ..Recipient::default()
        });
    }
    recipients
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, LazyLock};

    static ROUTES: LazyLock<RouteTable> = LazyLock::new(RouteTable::load);

    const HEADER: &str = "O 121314Z MAR 09\nFM AMEMBASSY OSLO\nTO RUEHC/SECSTATE WASHDC PRIORITY\nRUEHLO/AMEMBASSY LONDON\nINFO RUEHFR/AMEMBASSY PARIS IMMEDIATE\nRHMFISS/HQ USEUCOM VAIHINGEN GE\n";

    #[test]
    fn test_to_block() {
        let recipients = parse_recipients(HEADER, "09OSLO123", &ROUTES);
        assert_eq!(recipients.len(), 2);
        assert_eq!(recipients[0].route.as_deref(), Some("RUEHC"));
        assert_eq!(recipients[0].name, "SECSTATE WASHDC");
        assert_eq!(recipients[0].precedence.as_deref(), Some("PRIORITY"));
        assert_eq!(recipients[1].route.as_deref(), Some("RUEHLO"));
        assert_eq!(recipients[1].name, "AMEMBASSY LONDON");
        assert_eq!(recipients[1].precedence, None);
    }

    #[test]
    fn test_info_block() {
        let info = parse_info_recipients(HEADER, "09OSLO123", &ROUTES);
        assert_eq!(info.len(), 2);
        assert_eq!(info[0].route.as_deref(), Some("RUEHFR"));
        assert_eq!(info[0].precedence.as_deref(), Some("IMMEDIATE"));
        // Military relay codes are dropped but the name keeps its
        // override route when one is known.
        assert_eq!(info[1].name, "HQ USEUCOM VAIHINGEN GE");
        assert_eq!(info[1].route.as_deref(), Some("RHMCSUU"));
    }

    #[test]
    fn test_route_resolved_from_name() {
        let header = "\nTO AMEMBASSY OSLO\n";
        let recipients = parse_recipients(header, "09STATE1", &ROUTES);
        assert_eq!(recipients.len(), 1);
        assert_eq!(recipients[0].route.as_deref(), Some("RUEHNY"));
    }

    #[test]
    fn test_missing_to_block() {
        assert!(parse_recipients("FM AMEMBASSY OSLO\n", "09OSLO1", &ROUTES)
            .is_empty());
    }

    #[test]
    fn test_page_noise_dropped() {
        let header = "\nTO RUEHC/SECSTATE WASHDC\nPAGE 02 OSLO 00123 121314Z\n";
        let recipients = parse_recipients(header, "09OSLO123", &ROUTES);
        assert_eq!(recipients.len(), 1);
    }

    #[test]
    fn test_trailing_mcn_split_from_name() {
        let header = "\nTO RUEHC/SECSTATE WASHDC PRIORITY 0000\n";
        let recipients = parse_recipients(header, "09OSLO123", &ROUTES);
        assert_eq!(recipients.len(), 1);
        assert_eq!(recipients[0].name, "SECSTATE WASHDC");
        assert_eq!(recipients[0].precedence.as_deref(), Some("PRIORITY"));
        assert_eq!(recipients[0].route.as_deref(), Some("RUEHC"));
        assert_eq!(recipients[0].mcn.as_deref(), Some("0000"));
    }

    #[test]
    fn test_bare_relay_code_dropped() {
        let header = "\nTO RUEHC/SECSTATE WASHDC\nRHMFIUU\n";
        let recipients = parse_recipients(header, "07ANKARA1091", &ROUTES);
        assert_eq!(recipients.len(), 1);
        assert_eq!(recipients[0].name, "SECSTATE WASHDC");
    }

    struct WarnCounter(Arc<AtomicUsize>);

    impl tracing::Subscriber for WarnCounter {
        fn enabled(&self, _: &tracing::Metadata<'_>) -> bool {
            true
        }
        fn new_span(&self, _: &tracing::span::Attributes<'_>) -> tracing::span::Id {
            tracing::span::Id::from_u64(1)
        }
        fn record(&self, _: &tracing::span::Id, _: &tracing::span::Record<'_>) {}
        fn record_follows_from(&self, _: &tracing::span::Id, _: &tracing::span::Id) {}
        fn event(&self, event: &tracing::Event<'_>) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
        fn enter(&self, _: &tracing::span::Id) {}
        fn exit(&self, _: &tracing::span::Id) {}
    }

    #[test]
    fn test_missing_to_block_warns_once() {
        let warnings = Arc::new(AtomicUsize::new(0));
        tracing::subscriber::with_default(WarnCounter(warnings.clone()), || {
            assert!(parse_recipients("FM AMEMBASSY OSLO\n", "09OSLO1", &ROUTES).is_empty());
        });
        assert_eq!(warnings.load(Ordering::SeqCst), 1);

        // Cables known to have been released without a TO block stay quiet.
        let warnings = Arc::new(AtomicUsize::new(0));
        tracing::subscriber::with_default(WarnCounter(warnings.clone()), || {
            assert!(parse_recipients("FM SECSTATE WASHDC\n", "08STATE125686", &ROUTES).is_empty());
        });
        assert_eq!(warnings.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_token_fix_applied() {
        let header = "\nTO RUEHC/SECSTATE WASHDC PIORITY\n";
        let recipients = parse_recipients(header, "09BAKU179", &ROUTES);
        assert_eq!(recipients[0].name, "SECSTATE WASHDC");
        assert_eq!(recipients[0].precedence, None);
    }
}
