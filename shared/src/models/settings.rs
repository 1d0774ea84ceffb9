//! Merchant Settings Model

use serde::{Deserialize, Serialize};

/// Convenience fee configuration (percentage surcharge on the subtotal)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ConvenienceFeeConfig {
    #[serde(rename = "habilitada", default)]
    pub enabled: bool,
    /// Percentage applied to the subtotal (e.g. 10 = 10%)
    #[serde(rename = "percentual", default)]
    pub percent: f64,
}

/// Merchant settings (singleton, owned by the order API)
///
/// Read-only from the storefront's perspective. Fetched once per
/// session; not reactively synced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MerchantSettings {
    #[serde(rename = "nomeEstabelecimento", default)]
    pub establishment_name: String,
    #[serde(rename = "descricao", default)]
    pub description: String,
    #[serde(rename = "telefone", default)]
    pub phone: String,
    #[serde(rename = "endereco", default)]
    pub address: String,
    /// PIX key customers pay to
    #[serde(rename = "chavePix", default)]
    pub pix_key: String,
    #[serde(rename = "horarioFuncionamento", default)]
    pub opening_hours: String,
    #[serde(rename = "corPrimaria", default)]
    pub primary_color: String,
    #[serde(rename = "corSecundaria", default)]
    pub secondary_color: String,
    #[serde(rename = "logoUrl", default)]
    pub logo_url: String,
    /// Whether the storefront accepts new orders right now
    #[serde(rename = "aceitaPedidos", default = "default_true")]
    pub accepting_orders: bool,
    /// Message shown when orders are closed
    #[serde(rename = "mensagemFechado", default)]
    pub closed_message: String,
    /// Absent on older servers; treated as fee disabled
    #[serde(rename = "taxaConveniencia", default)]
    pub convenience_fee: ConvenienceFeeConfig,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_without_fee_block() {
        // Older servers omit taxaConveniencia entirely
        let json = r#"{
            "nomeEstabelecimento": "Padoca do Bairro",
            "chavePix": "padoca@example.com",
            "aceitaPedidos": true
        }"#;

        let settings: MerchantSettings = serde_json::from_str(json).unwrap();
        assert!(!settings.convenience_fee.enabled);
        assert_eq!(settings.convenience_fee.percent, 0.0);
        assert_eq!(settings.pix_key, "padoca@example.com");
    }

    #[test]
    fn test_settings_with_fee_enabled() {
        let json = r#"{
            "nomeEstabelecimento": "Padoca",
            "taxaConveniencia": { "habilitada": true, "percentual": 10 }
        }"#;

        let settings: MerchantSettings = serde_json::from_str(json).unwrap();
        assert!(settings.convenience_fee.enabled);
        assert_eq!(settings.convenience_fee.percent, 10.0);
        // accepting_orders defaults to open
        assert!(settings.accepting_orders);
    }
}
