//! Language fallback cascade.
//!
//! # Invariants
//!
//! 1. **Terminates**: every step either shortens the code, moves to the base
//!    resource, or ends in [`CascadeState::Exhausted`].
//! 2. **Sequential**: the next candidate exists only after the current one
//!    has failed.
//!
//! A cascade started at `en-US` tries `en-US`, `en`, then the base resource.

use crate::types::Candidate;

/// Region separators, in the order they are looked for.
const REGION_SEPARATORS: [char; 2] = ['-', '_'];

/// Position of the cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CascadeState {
    /// Loading the given candidate.
    Trying(Candidate),
    /// A candidate loaded.
    Success,
    /// Every candidate failed.
    Exhausted,
}

/// Next candidate after `attempted` failed to load.
///
/// 1. A code with a region subtag loses it (`en-US` -> `en`). The hyphen is
///    looked for first, then the underscore.
/// 2. Any other code falls back to the base resource.
/// 3. The base resource has no fallback.
#[must_use]
pub fn next_candidate(attempted: &Candidate) -> Option<Candidate> {
    let code = attempted.code()?;

    let split_at = REGION_SEPARATORS
        .iter()
        .find_map(|sep| code.find(*sep))
        .filter(|index| *index > 0);

    match split_at.and_then(|index| code.get(..index)) {
        Some(language) => Some(Candidate::from_code(language)),
        None => Some(Candidate::Base),
    }
}

/// Tracks the state of one fallback cascade.
#[derive(Debug, Clone)]
pub struct Cascade {
    /// Where the walk currently stands.
    state: CascadeState,
    /// Every candidate tried so far, in order.
    attempts: Vec<Candidate>,
}

impl Cascade {
    #[must_use]
    pub fn new(first: Candidate) -> Self {
        Self { attempts: vec![first.clone()], state: CascadeState::Trying(first) }
    }

    #[must_use]
    pub const fn state(&self) -> &CascadeState {
        &self.state
    }

    /// Candidate currently being loaded, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&Candidate> {
        match &self.state {
            CascadeState::Trying(candidate) => Some(candidate),
            CascadeState::Success | CascadeState::Exhausted => None,
        }
    }

    #[must_use]
    pub fn attempts(&self) -> &[Candidate] {
        &self.attempts
    }

    /// Marks the current candidate as loaded.
    pub fn succeed(&mut self) {
        if matches!(self.state, CascadeState::Trying(_)) {
            self.state = CascadeState::Success;
        }
    }

    /// Marks the current candidate as failed and moves on.
    pub fn fail(&mut self) -> &CascadeState {
        if let CascadeState::Trying(current) = &self.state {
            self.state = match next_candidate(current) {
                Some(next) => {
                    self.attempts.push(next.clone());
                    CascadeState::Trying(next)
                }
                None => CascadeState::Exhausted,
            };
        }
        &self.state
    }
}
