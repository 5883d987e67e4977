//! Site settings domain type.

use hemline_core::DropId;

/// The global storefront gate (domain type).
///
/// `closed_mode_drop_id` is only meaningful while `closed_mode` is true;
/// disabling closed mode always clears it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SiteSettings {
    /// When true, the storefront shows only the countdown view.
    pub closed_mode: bool,
    /// The drop featured by the countdown view.
    pub closed_mode_drop_id: Option<DropId>,
}
