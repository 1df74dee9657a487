//! Size recommendation heuristic.
//!
//! Maps a [`SizeProfile`] to a size label with a linear score:
//!
//! ```text
//! score = (height_cm - 160) + (weight_kg - 60)   (+10 for athletic/broad)
//! ```
//!
//! Bands use strict less-than comparisons, so boundary scores round up to
//! the next size (score 10 is M, not S). Gender is accepted on the profile
//! but plays no part in scoring.

use crate::models::SizeProfile;

/// Builds that add 10 to the score.
const HEAVY_BUILDS: [&str; 2] = ["athletic", "broad"];

/// Computes the recommended size label for a body profile.
///
/// Pure and deterministic: no I/O, no side effects. The caller is expected
/// to have validated the profile bounds first.
///
/// # Example
///
/// ```
/// use amberarctic_core::{recommend_size, SizeProfile};
///
/// let profile = SizeProfile {
///     height_cm: 170,
///     weight_kg: 70,
///     build: "average".into(),
///     gender: None,
/// };
/// assert_eq!(recommend_size(&profile), "L");
/// ```
#[must_use]
pub fn recommend_size(profile: &SizeProfile) -> &'static str {
    let mut score = (profile.height_cm - 160) + (profile.weight_kg - 60);
    if HEAVY_BUILDS.contains(&profile.build.as_str()) {
        score += 10;
    }

    if score < 0 {
        "XS"
    } else if score < 10 {
        "S"
    } else if score < 20 {
        "M"
    } else if score < 30 {
        "L"
    } else if score < 40 {
        "XL"
    } else {
        "XXL"
    }
}
