//! Lookup tools with structured business errors.
//!
//! An unsupported key is data, not a failure: the tool returns
//! `{"status": "error", "error_message": ...}` and the agent relays it to
//! the end user instead of crashing the turn.

use async_trait::async_trait;
use gatekit_core::{GatekitError, Result, Tool};
use serde_json::{Value, json};

/// Looks up the transaction fee percentage for a payment method.
pub struct PaymentFeeTool;

impl PaymentFeeTool {
    fn fee_for(method: &str) -> Option<f64> {
        match method {
            "platinum credit card" => Some(0.02),
            "gold debit card" => Some(0.035),
            "bank transfer" => Some(0.01),
            _ => None,
        }
    }
}

#[async_trait]
impl Tool for PaymentFeeTool {
    fn name(&self) -> &str {
        "get_fee_for_payment_method"
    }

    fn description(&self) -> &str {
        "Looks up the transaction fee percentage for a given payment method"
    }

    async fn call(&self, args: Value) -> Result<Value> {
        let method = args
            .get("method")
            .and_then(Value::as_str)
            .ok_or_else(|| GatekitError::Tool("'method' argument is required".to_string()))?;

        Ok(match Self::fee_for(&method.to_lowercase()) {
            Some(fee) => json!({"status": "success", "fee_percentage": fee}),
            None => json!({
                "status": "error",
                "error_message": format!("Payment method '{method}' not found"),
            }),
        })
    }
}

/// Looks up the exchange rate between two currencies.
pub struct ExchangeRateTool;

impl ExchangeRateTool {
    fn rate_for(base: &str, target: &str) -> Option<f64> {
        match (base, target) {
            ("usd", "eur") => Some(0.93),
            ("usd", "jpy") => Some(157.50),
            ("usd", "inr") => Some(83.58),
            _ => None,
        }
    }
}

#[async_trait]
impl Tool for ExchangeRateTool {
    fn name(&self) -> &str {
        "get_exchange_rate"
    }

    fn description(&self) -> &str {
        "Looks up the exchange rate between two ISO 4217 currency codes"
    }

    async fn call(&self, args: Value) -> Result<Value> {
        let base = args
            .get("base_currency")
            .and_then(Value::as_str)
            .ok_or_else(|| GatekitError::Tool("'base_currency' argument is required".to_string()))?
            .to_lowercase();
        let target = args
            .get("target_currency")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                GatekitError::Tool("'target_currency' argument is required".to_string())
            })?
            .to_lowercase();

        Ok(match Self::rate_for(&base, &target) {
            Some(rate) => json!({"status": "success", "rate": rate}),
            None => json!({
                "status": "error",
                "error_message": format!(
                    "Unsupported currency pair '{}' -> '{}'",
                    base.to_uppercase(),
                    target.to_uppercase()
                ),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_payment_method() {
        let tool = PaymentFeeTool;
        let result = tool.call(json!({"method": "Bank Transfer"})).await.unwrap();
        assert_eq!(result["status"], "success");
        assert_eq!(result["fee_percentage"], 0.01);
    }

    #[tokio::test]
    async fn test_unknown_payment_method_is_data_not_error() {
        let tool = PaymentFeeTool;
        let result = tool.call(json!({"method": "crypto wallet"})).await.unwrap();
        assert_eq!(result["status"], "error");
        assert!(result["error_message"].as_str().unwrap().contains("crypto wallet"));
    }

    #[tokio::test]
    async fn test_missing_argument_is_tool_error() {
        let tool = PaymentFeeTool;
        let err = tool.call(json!({})).await.unwrap_err();
        assert!(matches!(err, GatekitError::Tool(_)));
    }

    #[tokio::test]
    async fn test_exchange_rate_lookup() {
        let tool = ExchangeRateTool;
        let result = tool
            .call(json!({"base_currency": "USD", "target_currency": "EUR"}))
            .await
            .unwrap();
        assert_eq!(result["status"], "success");
        assert_eq!(result["rate"], 0.93);
    }

    #[tokio::test]
    async fn test_unsupported_currency_pair() {
        let tool = ExchangeRateTool;
        let result = tool
            .call(json!({"base_currency": "EUR", "target_currency": "GBP"}))
            .await
            .unwrap();
        assert_eq!(result["status"], "error");
        assert!(result["error_message"].as_str().unwrap().contains("EUR"));
    }
}
