//! Extension token values.
//!
//! Extensions never hand out raw numbers; each contributed value is derived
//! from the extension number and a small offset:
//!
//! ```text
//! value = ±(1_000_000_000 + (number - 1) * 1000 + offset)
//! ```
//!
//! The arithmetic is done in `i64`. With `u32` inputs the largest magnitude is
//! about 4.3e12, so nothing here can overflow or truncate.

use std::num::NonZeroU32;

use crate::model::{Contribution, ContributionKind, Enumerant, Sign};

/// Base of the extension value space.
pub const EXTENSION_BASE_VALUE: i64 = 1_000_000_000;

/// Values reserved per extension number.
pub const EXTENSION_BLOCK_SIZE: i64 = 1000;

/// Canonical value of an extension-contributed enumerant.
pub fn extension_value(number: NonZeroU32, offset: u32, sign: Sign) -> i64 {
    let magnitude = EXTENSION_BASE_VALUE
        + (i64::from(number.get()) - 1) * EXTENSION_BLOCK_SIZE
        + i64::from(offset);
    match sign {
        Sign::Positive => magnitude,
        Sign::Negative => -magnitude,
    }
}

/// Build the enumerant for an eligible contribution; excluded kinds yield `None`.
pub fn resolve_contribution(contribution: &Contribution) -> Option<Enumerant> {
    let ContributionKind::Eligible {
        offset,
        sign,
        number,
        comment,
    } = &contribution.kind
    else {
        return None;
    };

    let value = extension_value(*number, *offset, *sign);
    if i32::try_from(value).is_err() {
        tracing::warn!(
            name = %contribution.name,
            extends = %contribution.extends,
            value,
            "extension value does not fit in a 32-bit enum"
        );
    }

    Some(Enumerant::new(contribution.name.clone(), value).with_comment(comment.clone()))
}
