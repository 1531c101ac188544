//! Device classification
//!
//! Derives coarse device flags from a `User-Agent` header so that the first
//! render already knows which layout the client expects.

use serde::{Deserialize, Serialize};

const TABLET_MARKERS: &[&str] = &["ipad", "tablet", "kindle", "silk", "playbook"];
const PHONE_MARKERS: &[&str] = &[
    "iphone",
    "ipod",
    "windows phone",
    "blackberry",
    "opera mini",
    "mobile",
];

/// Device flags carried in the `device` slice of the application state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceInfo {
    pub phone: bool,
    pub tablet: bool,
    /// `phone || tablet`
    pub mobile: bool,
    pub desktop: bool,
}

impl Default for DeviceInfo {
    fn default() -> Self {
        Self::desktop()
    }
}

impl DeviceInfo {
    pub fn desktop() -> Self {
        Self {
            phone: false,
            tablet: false,
            mobile: false,
            desktop: true,
        }
    }

    fn from_flags(phone: bool, tablet: bool) -> Self {
        Self {
            phone,
            tablet,
            mobile: phone || tablet,
            desktop: !(phone || tablet),
        }
    }
}

/// Classify a request by its user agent
///
/// A missing or unrecognised user agent is treated as a desktop browser.
/// Android devices without the `Mobile` token are tablets.
pub fn classify(user_agent: Option<&str>) -> DeviceInfo {
    let Some(ua) = user_agent else {
        return DeviceInfo::desktop();
    };
    let ua = ua.to_ascii_lowercase();

    let android = ua.contains("android");
    let tablet = TABLET_MARKERS.iter().any(|m| ua.contains(m))
        || (android && !ua.contains("mobile"));
    let phone = !tablet && (android || PHONE_MARKERS.iter().any(|m| ua.contains(m)));

    DeviceInfo::from_flags(phone, tablet)
}
