//! Order Model
//!
//! Orders are owned by the order API. The storefront creates them via
//! `POST /orders` and afterwards only reads them, except for the single
//! customer-side PIX confirmation action.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payment status, set by the merchant side
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pendente,
    Confirmado,
    Recusado,
}

/// Fulfillment status (`statusPedido`)
///
/// Transitions are driven by the merchant: novo → em_preparo → pronto →
/// entregue, with cancelado reachable from any pre-terminal state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Novo,
    EmPreparo,
    Pronto,
    Entregue,
    Cancelado,
}

impl OrderStatus {
    /// Terminal for display purposes (no further action offered)
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Entregue | OrderStatus::Cancelado)
    }

    /// Human-readable label (pt-BR)
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Novo => "Novo",
            OrderStatus::EmPreparo => "Em Preparo",
            OrderStatus::Pronto => "Pronto",
            OrderStatus::Entregue => "Entregue",
            OrderStatus::Cancelado => "Cancelado",
        }
    }
}

/// Payment method chosen at checkout
///
/// `Other` absorbs methods newer servers may emit so an unknown value
/// never breaks order deserialization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Pix,
    /// Pay on pickup (cash or card)
    Retirada,
    #[serde(other)]
    Other,
}

impl PaymentMethod {
    pub fn is_pix(&self) -> bool {
        matches!(self, PaymentMethod::Pix)
    }
}

/// Customer contact fields captured at checkout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerInfo {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "telefone")]
    pub phone: String,
}

/// Order line item with name/price captured at order time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLineItem {
    /// Product reference
    #[serde(rename = "produto")]
    pub product: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "quantidade")]
    pub quantity: u32,
    /// price × quantity, computed server-side
    pub subtotal: f64,
}

/// Convenience fee as charged on an order (or derived for a cart)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ConvenienceFeeCharge {
    #[serde(rename = "percentual")]
    pub percent: f64,
    #[serde(rename = "valor")]
    pub value: f64,
}

/// Order entity as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    /// Human-facing order number, distinct from `id`
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "cliente")]
    pub customer: CustomerInfo,
    #[serde(rename = "itens")]
    pub items: Vec<OrderLineItem>,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(rename = "taxaConveniencia", default)]
    pub convenience_fee: Option<ConvenienceFeeCharge>,
    pub total: f64,
    #[serde(rename = "formaPagamento")]
    pub payment_method: PaymentMethod,
    #[serde(rename = "statusPagamento", default)]
    pub payment_status: PaymentStatus,
    #[serde(rename = "statusPedido", default)]
    pub status: OrderStatus,
    #[serde(rename = "observacoes", default)]
    pub notes: String,
    #[serde(rename = "dataHora")]
    pub placed_at: DateTime<Utc>,
    /// Customer pressed "I have paid" on the PIX screen
    #[serde(rename = "pixConfirmadoPeloCliente", default)]
    pub pix_confirmed_by_customer: bool,
    /// Merchant validated the PIX payment
    #[serde(rename = "pixConfirmadoPeloAdmin", default)]
    pub pix_confirmed_by_admin: bool,
}

// ============================================================================
// Order creation payload
// ============================================================================

/// Pickup timing (`tipoRetirada`)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PickupKind {
    #[default]
    #[serde(rename = "agora")]
    Now,
    #[serde(rename = "depois")]
    Later,
}

/// One cart line in the creation payload. Quantity only — the server is
/// the pricing authority at order time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItemInput {
    #[serde(rename = "produto")]
    pub product: String,
    #[serde(rename = "quantidade")]
    pub quantity: u32,
}

/// `POST /orders` request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    #[serde(rename = "cliente")]
    pub customer: CustomerInfo,
    #[serde(rename = "itens")]
    pub items: Vec<OrderItemInput>,
    #[serde(rename = "formaPagamento")]
    pub payment_method: PaymentMethod,
    #[serde(rename = "observacoes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "tipoRetirada", default)]
    pub pickup_kind: PickupKind,
    /// Required when `pickup_kind` is `Later`, null otherwise
    #[serde(rename = "horarioRetirada")]
    pub pickup_time: Option<DateTime<Utc>>,
}

/// `POST /orders` response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderResponse {
    pub order: Order,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_spellings() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::EmPreparo).unwrap(),
            "\"em_preparo\""
        );
        assert_eq!(
            serde_json::from_str::<PaymentStatus>("\"pendente\"").unwrap(),
            PaymentStatus::Pendente
        );
        assert_eq!(
            serde_json::from_str::<PickupKind>("\"depois\"").unwrap(),
            PickupKind::Later
        );
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(OrderStatus::Entregue.is_terminal());
        assert!(OrderStatus::Cancelado.is_terminal());
        assert!(!OrderStatus::Pronto.is_terminal());
    }

    #[test]
    fn test_unknown_payment_method_tolerated() {
        let method: PaymentMethod = serde_json::from_str("\"dinheiro\"").unwrap();
        assert_eq!(method, PaymentMethod::Other);
        assert!(!method.is_pix());
    }

    #[test]
    fn test_order_deserializes_api_shape() {
        let json = r#"{
            "_id": "6650f0aa",
            "numero": "1042",
            "cliente": { "nome": "Ana", "telefone": "11999990000" },
            "itens": [
                { "produto": "p1", "nome": "Bolo de Fubá", "preco": 25.0, "quantidade": 1, "subtotal": 25.0 }
            ],
            "subtotal": 25.0,
            "taxaConveniencia": { "percentual": 10, "valor": 2.5 },
            "total": 27.5,
            "formaPagamento": "pix",
            "statusPagamento": "pendente",
            "statusPedido": "novo",
            "observacoes": "",
            "dataHora": "2026-08-07T12:30:00Z",
            "pixConfirmadoPeloCliente": false,
            "pixConfirmadoPeloAdmin": false
        }"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.number, "1042");
        assert_eq!(order.status, OrderStatus::Novo);
        assert!(order.payment_method.is_pix());
        assert_eq!(order.convenience_fee.unwrap().value, 2.5);
        assert_eq!(order.items[0].quantity, 1);
    }

    #[test]
    fn test_order_create_wire_shape() {
        let payload = OrderCreate {
            customer: CustomerInfo {
                name: "Ana".to_string(),
                phone: "11999990000".to_string(),
            },
            items: vec![OrderItemInput {
                product: "p1".to_string(),
                quantity: 2,
            }],
            payment_method: PaymentMethod::Pix,
            notes: None,
            pickup_kind: PickupKind::Now,
            pickup_time: None,
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["cliente"]["nome"], "Ana");
        assert_eq!(value["itens"][0]["produto"], "p1");
        assert_eq!(value["itens"][0]["quantidade"], 2);
        assert_eq!(value["formaPagamento"], "pix");
        assert_eq!(value["tipoRetirada"], "agora");
        // horarioRetirada is serialized as an explicit null
        assert!(value["horarioRetirada"].is_null());
        // prices never leave the client
        assert!(value["itens"][0].get("preco").is_none());
        // empty notes are omitted, not sent as null
        assert!(value.get("observacoes").is_none());
    }
}
