use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceType {
    Mobile,
    Tablet,
    Desktop,
}

/// Screen geometry reported alongside the user agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenMetrics {
    pub width: u32,
    pub height: u32,
    pub device_pixel_ratio: f64,
}

impl Default for ScreenMetrics {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            device_pixel_ratio: 1.0,
        }
    }
}

/// Device/browser descriptor posted at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub user_agent: String,
    pub device_type: DeviceType,
    pub os: String,
    pub browser: String,
    pub screen_width: u32,
    pub screen_height: u32,
    pub device_pixel_ratio: f64,
}

impl DeviceInfo {
    pub fn detect(user_agent: &str, screen: ScreenMetrics) -> Self {
        Self {
            user_agent: user_agent.to_string(),
            device_type: device_type(user_agent),
            os: operating_system(user_agent).to_string(),
            browser: browser(user_agent).to_string(),
            screen_width: screen.width,
            screen_height: screen.height,
            device_pixel_ratio: screen.device_pixel_ratio,
        }
    }
}

fn has_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

pub fn device_type(user_agent: &str) -> DeviceType {
    // iPad matches the mobile probe first.
    if has_any(user_agent, &["Mobi", "Android", "iPhone", "iPad", "iPod"]) {
        DeviceType::Mobile
    } else if has_any(user_agent, &["Tablet", "iPad"]) {
        DeviceType::Tablet
    } else {
        DeviceType::Desktop
    }
}

pub fn operating_system(user_agent: &str) -> &'static str {
    if user_agent.contains("Windows") {
        "Windows"
    } else if user_agent.contains("Mac") {
        "MacOS"
    } else if user_agent.contains("Android") {
        "Android"
    } else if has_any(user_agent, &["iOS", "iPhone", "iPad", "iPod"]) {
        "iOS"
    } else if user_agent.contains("Linux") {
        "Linux"
    } else {
        "Unknown OS"
    }
}

pub fn browser(user_agent: &str) -> &'static str {
    let chrome = user_agent.contains("Chrome");
    if chrome && !has_any(user_agent, &["Edge", "OPR"]) {
        "Chrome"
    } else if user_agent.contains("Safari") && !chrome {
        "Safari"
    } else if user_agent.contains("Firefox") {
        "Firefox"
    } else if user_agent.contains("Edge") {
        "Edge"
    } else if has_any(user_agent, &["OPR", "Opera"]) {
        "Opera"
    } else {
        "Unknown Browser"
    }
}
