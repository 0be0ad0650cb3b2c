//! Unified error type for glyphkey.
//!
//! We avoid `alloc` - all variants carry only fixed-size data.
//! `defmt::Format` is derived behind the feature flag so the host test
//! build never links defmt.

/// Top-level error type used across the application.
///
/// Nothing here is fatal: the device has no channel to report failure
/// other than a status LED and absent typed output, so callers log and
/// carry on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The USB transport rejected or failed to send a report.
    Usb,

    /// A bounded wait elapsed (e.g. the debug link never connected).
    Timeout,
}
