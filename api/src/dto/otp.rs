use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /api/request-otp`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestOtpRequest {
    #[serde(rename = "phoneNumber", default)]
    pub phone_number: Option<String>,
}

/// Body of `POST /api/verify-otp`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    #[serde(rename = "phoneNumber", default)]
    pub phone_number: Option<String>,

    /// Accepted as a string or a bare JSON number
    #[serde(default, deserialize_with = "string_or_number")]
    pub otp: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Number(u64),
    }

    Ok(Option::<Code>::deserialize(deserializer)?.map(|code| match code {
        Code::Text(text) => text,
        Code::Number(number) => number.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_request_accepts_numeric_code() {
        let req: VerifyOtpRequest =
            serde_json::from_str(r#"{"phoneNumber": "+15551234567", "otp": 123456}"#).unwrap();
        assert_eq!(req.otp.as_deref(), Some("123456"));
    }

    #[test]
    fn test_missing_fields_deserialize_to_none() {
        let req: VerifyOtpRequest = serde_json::from_str("{}").unwrap();
        assert!(req.phone_number.is_none());
        assert!(req.otp.is_none());

        let req: RequestOtpRequest = serde_json::from_str(r#"{"phoneNumber": null}"#).unwrap();
        assert!(req.phone_number.is_none());
    }
}
