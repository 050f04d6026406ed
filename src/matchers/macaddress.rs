// src/matchers/macaddress.rs

//! Find a MAC address within record text.
//!
//! A MAC address token is six octets separated by `:`. Each octet is one or
//! two hex digits, e.g. `a:b:c:d:e:f` or `0a:0b:0c:0d:0e:0f`. Tokens are
//! normalized to two digits per octet before comparing to the target.
//! Letter case is not changed.

use std::fmt;
use std::str::FromStr;

use crate::common::{MergeError, Result};

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Octets in a MAC address.
pub const MAC_OCTETS: usize = 6;
/// Length of a canonical MAC address `XX:XX:XX:XX:XX:XX`.
pub const MAC_LEN: usize = MAC_OCTETS * 3 - 1;
/// Shortest token that may be a MAC address, `X:X:X:X:X:X`.
const MAC_LEN_MIN: usize = MAC_OCTETS * 2 - 1;

/// Canonical text of a MAC address.
pub type MacText = [u8; MAC_LEN];

/// Normalize `token` to canonical form if the entire token is a MAC address.
///
/// Reads at most six octets; an octet is one or two hex digits. Octets one
/// to five must be followed by `:`, the sixth must end the token.
pub fn normalize_token(token: &[u8]) -> Option<MacText> {
    if token.len() < MAC_LEN_MIN || token.len() > MAC_LEN {
        return None;
    }
    let mut norm: MacText = [b':'; MAC_LEN];
    let mut at: usize = 0;
    for octet in 0..MAC_OCTETS {
        let digits: usize = token[at..]
            .iter()
            .take(2)
            .take_while(|b| b.is_ascii_hexdigit())
            .count();
        let out: usize = octet * 3;
        match digits {
            1 => {
                norm[out] = b'0';
                norm[out + 1] = token[at];
            }
            2 => {
                norm[out] = token[at];
                norm[out + 1] = token[at + 1];
            }
            _ => return None,
        }
        at += digits;
        if octet + 1 < MAC_OCTETS {
            if token.get(at) != Some(&b':') {
                return None;
            }
            at += 1;
        }
    }
    if at != token.len() {
        return None;
    }

    Some(norm)
}

/// A MAC address in canonical form.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct MacAddress(MacText);

impl MacAddress {
    /// Parse and normalize `text`, e.g. `"a:b:c:d:e:f"` becomes
    /// `"0a:0b:0c:0d:0e:0f"`.
    pub fn parse(text: &str) -> Result<MacAddress> {
        match normalize_token(text.trim().as_bytes()) {
            Some(norm) => Ok(MacAddress(norm)),
            None => Err(MergeError::InvalidMacAddress(text.to_string())),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for MacAddress {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<MacAddress> {
        MacAddress::parse(s)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // always ASCII, see `normalize_token`
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Debug for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MacAddress({})", self)
    }
}

/// Matches record text against one target MAC address.
#[derive(Clone, Copy, Debug)]
pub struct MacAddressMatcher {
    target: MacAddress,
}

impl MacAddressMatcher {
    pub fn new(target: MacAddress) -> MacAddressMatcher {
        MacAddressMatcher { target }
    }

    pub fn target(&self) -> &MacAddress {
        &self.target
    }

    /// Does any whitespace-separated token of `record_text` normalize to the
    /// target? Stops at the first matching token.
    pub fn scan(&self, record_text: &[u8]) -> bool {
        scan(record_text, self.target.as_bytes())
    }
}

/// Does any whitespace-separated token of `record_text` normalize to
/// `target_mac`?
///
/// A token textually equal to `target_mac` matches without normalizing.
pub fn scan(record_text: &[u8], target_mac: &[u8]) -> bool {
    for token in record_text
        .split(|b| b.is_ascii_whitespace())
        .filter(|t| !t.is_empty())
    {
        if token == target_mac {
            defñ!("matched token as-is");
            return true;
        }
        if let Some(norm) = normalize_token(token) {
            if norm[..] == *target_mac {
                defñ!("matched token {:?} normalized", String::from_utf8_lossy(token));
                return true;
            }
        }
    }

    false
}
