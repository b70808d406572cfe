//! Interface version extraction.
//!
//! The replacement binary needs to know which interface versions the game was
//! built against. Those appear as plain strings in the original vendor
//! binary (e.g. `SteamClient017`), so they are recovered by scanning its
//! bytes for a fixed table of interface names each followed by a 3-digit
//! version.

use std::sync::LazyLock;

use regex::bytes::Regex;

/// One row of the interface table
struct InterfaceName {
    prefix: &'static str,
    /// Emit the bare name when no versioned string is present
    bare_fallback: bool,
}

const fn versioned(prefix: &'static str) -> InterfaceName {
    InterfaceName {
        prefix,
        bare_fallback: false,
    }
}

/// Interface names in output order
const INTERFACE_NAMES: &[InterfaceName] = &[
    versioned("SteamClient"),
    versioned("SteamGameServer"),
    versioned("SteamGameServerStats"),
    versioned("SteamUser"),
    versioned("SteamFriends"),
    versioned("SteamUtils"),
    versioned("SteamMatchMaking"),
    versioned("SteamMatchMakingServers"),
    versioned("STEAMUSERSTATS_INTERFACE_VERSION"),
    versioned("STEAMAPPS_INTERFACE_VERSION"),
    versioned("SteamNetworking"),
    versioned("STEAMREMOTESTORAGE_INTERFACE_VERSION"),
    versioned("STEAMSCREENSHOTS_INTERFACE_VERSION"),
    versioned("STEAMHTTP_INTERFACE_VERSION"),
    versioned("STEAMUNIFIEDMESSAGES_INTERFACE_VERSION"),
    versioned("STEAMUGC_INTERFACE_VERSION"),
    versioned("STEAMAPPLIST_INTERFACE_VERSION"),
    versioned("STEAMMUSIC_INTERFACE_VERSION"),
    versioned("STEAMMUSICREMOTE_INTERFACE_VERSION"),
    versioned("STEAMHTMLSURFACE_INTERFACE_VERSION_"),
    versioned("STEAMINVENTORY_INTERFACE_V"),
    versioned("SteamController"),
    versioned("SteamMasterServerUpdater"),
    versioned("STEAMVIDEO_INTERFACE_V"),
    // Older SDKs export the controller interface without a version suffix
    InterfaceName {
        prefix: "STEAMCONTROLLER_INTERFACE_VERSION",
        bare_fallback: true,
    },
];

struct Matcher {
    versioned: Regex,
    bare: Option<Regex>,
}

static MATCHERS: LazyLock<Vec<Matcher>> = LazyLock::new(|| {
    INTERFACE_NAMES
        .iter()
        .map(|name| {
            let prefix = regex::escape(name.prefix);
            Matcher {
                versioned: Regex::new(&format!("{prefix}[0-9]{{3}}"))
                    .expect("interface pattern is valid"),
                bare: name
                    .bare_fallback
                    .then(|| Regex::new(&prefix).expect("interface pattern is valid")),
            }
        })
        .collect()
});

/// Every interface version string in `binary`, in table order then scan order.
///
/// Duplicates are kept.
pub fn extract_interfaces(binary: &[u8]) -> Vec<String> {
    let mut found = Vec::new();
    for matcher in MATCHERS.iter() {
        let before = found.len();
        push_matches(&mut found, &matcher.versioned, binary);
        if found.len() == before
            && let Some(bare) = &matcher.bare
        {
            push_matches(&mut found, bare, binary);
        }
    }
    found
}

fn push_matches(found: &mut Vec<String>, regex: &Regex, binary: &[u8]) {
    found.extend(
        regex
            .find_iter(binary)
            .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned()),
    );
}

/// Render the list as file contents, one name per line
pub fn format_interfaces(interfaces: &[String]) -> String {
    interfaces.iter().map(|i| format!("{i}\n")).collect()
}
