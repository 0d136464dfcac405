// SPDX-License-Identifier: MIT

pub mod changes;
pub mod decision;
pub mod options;
pub mod trigger;

pub use changes::{matches_change_set, GlobPatternSet, LARGE_CHANGE_THRESHOLD};
pub use decision::{DecisionCombinator, ForcedBy, Verdict};
