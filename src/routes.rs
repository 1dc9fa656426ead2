//! Diplomatic routing-code lookup.
//!
//! Recipient lines sometimes omit their routing code, so the recipients
//! extractor resolves one from the organizational name. The table is built
//! once from `data/routes.txt` plus a manual override map for names the
//! static source resolves incorrectly or ambiguously, and is immutable
//! afterwards: unlimited concurrent readers, no synchronization.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

/// Names the static route file resolves incorrectly or ambiguously.
const ROUTE_OVERRIDES: &[(&str, &str)] = &[
    ("USMISSION USNATO", "RUCNDT"),
    ("USMISSION USUN NEW YORK", "RUCNDT"),
    ("SECSTATE WASHDC", "RUEHC"),
    ("AMEMBASSY GUATEMALA", "RUEHGT"),
    ("AMCONSUL LAGOS", "RUEHOS"),
    ("AMCONSUL MELBOURNE", "RUEHBN"),
    ("AMEMBASSY PANAMA", "RUEHZP"),
    ("AMEMBASSY MEXICO", "RUEHME"),
    ("AMEMBASSY VATICAN", "RUEHROV"),
    ("AMEMBASSY ALMATY", "RUEHTA"),
    ("AMEMBASSY QUITO", "RUEHQT"),
    ("AMCONSUL JOHANNESBURG", "RUEHJO"),
    ("XMT AMCONSUL JOHANNESBURG", "RUEHJO"),
    ("XMT AMCONSUL STRASBOURG", "RUEHSR"),
    ("DEPT OF JUSTICE WASHINGTON DC", "RUEAWJA"),
    ("DEPARTMENT OF JUSTICE WASHINGTON DC", "RUEAWJA"),
    ("NATIONAL SECURITY COUNCIL WASHINGTON DC", "RHEHNSC"),
    ("NSC WASHINGTON DC", "RHEHNSC"),
    ("AMEMBASSY RIO DE JANEIRO", "RUEHRI"),
    ("DIA WASHINGTON DC", "RHEFJMA"),
    ("HQ USCENTCOM MACDILL AFB FL", "RUMICEA"),
    ("CDR USCENTCOM MACDILL AFB FL", "RUMICEA"),
    ("COMSOCCENT MACDILL AFB FL", "RHMFIUU"),
    ("HQ USSOCOM MACDILL AFB FL", "RHMFIUU"),
    ("USCINCCENT MACDILL AFB FL", "RUMICEA"),
    ("USEU BRUSSELS", "RUEHNO"),
    ("SECDEF", "RUEKJCS"),
    ("SECDEF WASHINGTON DC", "RUEKJCS"),
    ("DEPT OF HOMELAND SECURITY WASHINGTON DC", "RHEFHLC"),
    ("HOMELAND SECURITY CENTER WASHINGTON DC", "RHEFHLC"),
    ("USMISSION UNVIE VIENNA", "RUEHUNV"),
    ("THE WHITE HOUSE WASHINGTON DC", "RHEHAAA"),
    ("WHITE HOUSE WASHINGTON DC", "RHEHAAA"),
    ("CJCS WASHINGTON DC", "RUEKJCS"),
    ("COMUSKOREA J", "RUACAAA"),
    ("COMUSFK SEOUL KOR", "RUACAAA"),
    ("COMUSKOREA SCJS SEOUL KOR", "RUACAAA"),
    // Collective routes extracted from other cables.
    ("EUROPEAN POLITICAL COLLECTIVE", "RUEHZL"),
    ("EU MEMBER STATES COLLECTIVE", "RUCNMEM"),
    ("GULF COOPERATION COUNCIL COLLECTIVE", "RUEHZM"),
    ("MERCOSUR COLLECTIVE", "RUCNMER"),
    ("IRAN COLLECTIVE", "RUCNIRA"),
    ("WESTERN HEMISPHERIC AFFAIRS DIPL POSTS", "RUEHWH"),
    ("MOSCOW POLITICAL COLLECTIVE", "RUEHXD"),
    ("IRAQ COLLECTIVE", "RUCNRAQ"),
    ("ECOWAS COLLECTIVE", "RUEHZK"),
    ("ARAB ISRAELI COLLECTIVE", "RUEHXK"),
    ("ARAB LEAGUE COLLECTIVE", "RUEHEE"),
    ("SOUTHERN AFRICAN DEVELOPMENT COMMUNITY", "RUCNSAD"),
    ("SOUTHERN AF DEVELOPMENT COMMUNITY COLLECTIVE", "RUCNSAD"),
    ("DARFUR COLLECTIVE", "RUCNFUR"),
    ("AFRICAN UNION COLLECTIVE", "RUEHZO"),
    ("ALL US CONSULATES IN MEXICO COLLECTIVE", "RUEHXC"),
    ("OPEC COLLECTIVE", "RUEHHH"),
    ("ALL NATO POST COLLECTIVE", "RUEHXP"),
    ("ENVIRONMENT SCIENCE AND TECHNOLOGY COLLECTIVE", "RUEHZN"),
    ("AFGHANISTAN COLLECTIVE", "RUCNAFG"),
    ("WHA CENTRAL AMERICAN COLLECTIVE", "RUEHZA"),
    ("UN SECURITY COUNCIL COLLECTIVE", "RUEHGG"),
    ("IGAD COLLECTIVE", "RUCNIAD"),
    ("DEA HQS WASHINGTON DC", "RUEABND"),
    ("OSD WASHINGTON DC", "RUEKJCS"),
    ("HAITI COLLECTIVE", "RUEHZH"),
    ("NCTC WASHINGTON DC", "RUEILB"),
    ("SOMALIA COLLECTIVE", "RUCNSOM"),
    ("CDR USPACOM HONOLULU HI", "RHHMUNA"),
    ("HQ USAFRICOM STUTTGART GE", "RUEWMFD"),
    ("CDR USAFRICOM STUTTGART GE", "RUEWMFD"),
    ("EUCOM POLAD VAIHINGEN GE", "RHMCSUU"),
    ("HQ USEUCOM VAIHINGEN GE", "RHMCSUU"),
    ("CDR USEUCOM VAIHINGEN GE", "RHMCSUU"),
    ("HQ USSOUTHCOM MIAMI FL", "RUMIAAA"),
    ("CDR USSOUTHCOM MIAMI FL", "RHMFIUU"),
    ("RWANDA COLLECTIVE", "RUEHXR"),
    ("COMNAVBASE GUANTANAMO BAY CU", "RUCOGCA"),
    ("NAVINTELOFC GUANTANAMO BAY CU", "RUCOGCA"),
    ("MAGHREB COLLECTIVE", "RUCNMGH"),
];

static RE_ROUTE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(R[A-Z]+)[ \t]+(.+)$").unwrap());

/// Name -> routing-code lookup, immutable after construction.
///
/// Built once by the caller and passed by reference into every
/// extraction that needs it; there is no hidden process-wide instance.
#[derive(Debug)]
pub struct RouteTable {
    name_to_route: HashMap<String, String>,
}

impl RouteTable {
    /// Builds the table from `data/routes.txt` plus the override map.
    pub fn load() -> Self {
        let mut name_to_route = HashMap::new();
        for line in include_str!("../data/routes.txt").lines() {
            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }
            match RE_ROUTE_LINE.captures(line) {
                Some(caps) => {
                    name_to_route.insert(caps[2].trim().to_string(), caps[1].to_string());
                }
                None => debug!(line, "skipping malformed route line"),
            }
        }
        for (name, route) in ROUTE_OVERRIDES {
            name_to_route.insert((*name).to_string(), (*route).to_string());
        }
        Self { name_to_route }
    }

    /// Resolves a routing code for a recipient name. Retries with the
    /// "WASHDC" -> "WASHINGTON DC" suffix normalization on a direct miss.
    pub fn route_for_name(&self, name: &str) -> Option<&str> {
        if let Some(route) = self.name_to_route.get(name) {
            return Some(route);
        }
        if name.ends_with("WASHDC") {
            return self
                .name_to_route
                .get(&name.replace("WASHDC", "WASHINGTON DC"))
                .map(String::as_str);
        }
        None
    }

    /// Number of known names.
    pub fn len(&self) -> usize {
        self.name_to_route.len()
    }

    pub fn is_empty(&self) -> bool {
        self.name_to_route.is_empty()
    }
}
