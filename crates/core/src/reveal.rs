//! Character Reveal Driver
//!
//! Cosmetic reveal of an already-complete string: the full text has been
//! received before the reveal begins, and is fed to the display one code
//! point at a time with a fixed pause. This is deliberately decoupled from
//! network streaming, which this system does not perform.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default pause between revealed characters.
pub const REVEAL_DELAY: Duration = Duration::from_millis(20);

/// Lifecycle of one submit-and-reveal invocation.
///
/// `Error` absorbs from `Submitting` and `AwaitingResponse`; once a reveal
/// has started it runs to completion (there is no cancellation path).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealPhase {
    Idle,
    Submitting,
    AwaitingResponse,
    Revealing,
    Done,
    Error,
}

impl RevealPhase {
    /// Whether the error state is reachable from this phase.
    pub fn can_fail(self) -> bool {
        matches!(self, RevealPhase::Submitting | RevealPhase::AwaitingResponse)
    }

    /// Whether this phase is terminal.
    pub fn is_terminal(self) -> bool {
        matches!(self, RevealPhase::Done | RevealPhase::Error)
    }
}

/// Iterator over successive prefixes of a string, each one code point
/// longer than the previous. The final item is the whole string; an empty
/// string yields nothing.
pub struct PrefixReveal<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> PrefixReveal<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, offset: 0 }
    }
}

impl<'a> Iterator for PrefixReveal<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let ch = self.text[self.offset..].chars().next()?;
        self.offset += ch.len_utf8();
        Some(&self.text[..self.offset])
    }
}

/// Feed `text` into `sink` one code point at a time, pausing `delay`
/// between reveals. The sink receives each successive prefix; the string
/// is captured up front, so state changes made elsewhere during the
/// reveal do not affect it.
pub async fn reveal<F: FnMut(&str)>(text: &str, delay: Duration, mut sink: F) {
    for prefix in PrefixReveal::new(text) {
        sink(prefix);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
