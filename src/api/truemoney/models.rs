use serde::{Deserialize, Serialize};

use crate::models::Page;

/// Envelope of the transaction-history endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionResponse {
    #[serde(default)]
    pub code: String,
    pub data: Option<Page>,
}

/// Envelope of the legacy balance endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceResponse {
    #[serde(default)]
    pub code: String,
    pub data: Option<BalanceData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BalanceData {
    #[serde(rename = "currentBalance")]
    pub current_balance: Option<String>,
}

/// Envelope of the profile endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileResponse {
    #[serde(default)]
    pub code: String,
    pub data: Option<Profile>,
}

/// Account holder profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub tmn_id: String,
    pub mobile_number: String,
    pub current_balance: String,
    pub fullname: String,
    pub firstname_en: String,
    pub lastname_en: String,
    pub title: String,
    pub email: String,
    pub birthdate: String,
    pub occupation: String,
    pub profile_type: String,
    pub has_password: bool,
    #[serde(rename = "imageURL")]
    pub image_url: String,
    pub address_list: Vec<Address>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    #[serde(rename = "addressID")]
    pub address_id: i64,
    pub address: String,
    pub province: String,
    #[serde(rename = "postalCode")]
    pub postal_code: String,
}

/// Envelope of the transaction-detail endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ReportResponse {
    #[serde(default)]
    pub code: String,
    pub data: Option<ReportDetail>,
}

/// Detail view of one activity, looked up by its report id.
///
/// The gateway lays the detail out as display sections; only the sections carrying the
/// counterparty and reference cells are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportDetail {
    pub service_type: String,
    pub amount: f64,
    pub section2: Section,
    pub section4: Section,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    pub column1: Option<Column>,
    pub column2: Option<Column>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Column {
    pub cell1: Option<Cell>,
    pub cell2: Option<Cell>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Cell {
    pub title: String,
    pub value: String,
}

impl ReportDetail {
    /// Every populated cell, in display order
    pub fn cells(&self) -> Vec<&Cell> {
        [&self.section2, &self.section4]
            .into_iter()
            .flat_map(|section| [&section.column1, &section.column2])
            .flatten()
            .flat_map(|column| [&column.cell1, &column.cell2])
            .flatten()
            .collect()
    }
}
