use super::{Amount, MenuId};
use serde::{Deserialize, Deserializer, Serialize};

/// One line of an order submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLinePayload {
    pub menu_id: MenuId,
    pub name: String,
    pub price: Amount,
    pub quantity: u32,
    pub total_price: Amount,
}

/// Body of `POST /api/orders`, built from a cart at submission time.
///
/// `total_amount` is always the sum of the lines' `total_price`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub items: Vec<OrderLinePayload>,
    pub total_amount: Amount,
}

/// A line of a placed order as reported by `GET /api/orders`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineSummary {
    pub name: String,
    pub quantity: u32,
    pub total_price: Amount,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(deserialize_with = "string_or_number")]
    pub order_number: String,
    #[serde(default)]
    pub items: Vec<OrderLineSummary>,
    pub total_amount: Amount,
}

// Order numbers come back as either sequence integers or strings.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}
