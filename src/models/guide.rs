use serde::{Deserialize, Serialize};

/// A trekking guide's public profile. Guides are managed by admin tooling;
/// the booking lifecycle only ever reads them to resolve "assigned guide."
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guide {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub experience_years: u32,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub trek_count: u32,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub rating_count: u32,
    /// Reference to the guide's payment QR image, if one is uploaded.
    #[serde(default)]
    pub payment_qr: Option<String>,
}
