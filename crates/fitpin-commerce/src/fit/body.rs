//! User body profile.

use serde::{Deserialize, Serialize};

/// Body measurements recorded for a user, in centimeters (weight in kg).
///
/// Fetched once per product-page visit and never modified by the client.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UserBodyProfile {
    #[serde(rename = "userHeight")]
    pub height: f64,
    #[serde(rename = "userWeight")]
    pub weight: f64,
    #[serde(rename = "armSize")]
    pub arm_length: f64,
    #[serde(rename = "shoulderSize")]
    pub shoulder_width: f64,
    #[serde(rename = "bodySize")]
    pub torso_length: f64,
    #[serde(rename = "legSize")]
    pub leg_length: f64,
}

impl UserBodyProfile {
    /// Measurements as (name, value) pairs, for display.
    pub fn measurements(&self) -> [(&'static str, f64); 6] {
        [
            ("height", self.height),
            ("weight", self.weight),
            ("arm_length", self.arm_length),
            ("shoulder_width", self.shoulder_width),
            ("torso_length", self.torso_length),
            ("leg_length", self.leg_length),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_body_profile() {
        let json = r#"{
            "userHeight": 175,
            "userWeight": 68.5,
            "armSize": 60,
            "shoulderSize": 45,
            "bodySize": 70,
            "legSize": 100
        }"#;
        let body: UserBodyProfile = serde_json::from_str(json).unwrap();
        assert_eq!(body.weight, 68.5);
        assert_eq!(body.torso_length, 70.0);
        assert_eq!(body.leg_length, 100.0);
    }
}
