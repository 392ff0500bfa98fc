use serde::Serialize;
use utoipa::ToSchema;

/// Success envelope shared by every endpoint. Failures use the same shape
/// with `success: false` and an `error` string instead of `data`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let envelope = ApiEnvelope::ok(vec![1, 2, 3]);
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
    }
}
