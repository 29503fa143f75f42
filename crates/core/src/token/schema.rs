use assembly_common::validation::{JsonObject, Schema, ValidationResult, Validator};
use assembly_domain::TokenPayload;
use serde_json::Value;

/// Message recorded when a payload identifies neither kind of user.
pub const MISSING_SCOPE_MESSAGE: &str =
    "Token must contain either internalUserId, or clientId and companyId";

/// Validates a decrypted token payload.
///
/// `workspaceId` must be a non-empty string, the other known fields must be
/// strings when present, and the payload must carry `internalUserId` or both
/// `clientId` and `companyId`. Unknown fields are dropped. The scope check
/// only runs once every field is well-typed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenPayloadSchema;

impl Schema for TokenPayloadSchema {
    type Output = TokenPayload;

    fn safe_parse(&self, value: &Value) -> ValidationResult<TokenPayload> {
        let mut validator = Validator::new();
        let Some(obj) = JsonObject::from_value(value, &mut validator) else {
            return validator.finish(TokenPayload::default());
        };

        let payload = TokenPayload {
            base_url: obj.optional_string("baseUrl", &mut validator),
            client_id: obj.optional_string("clientId", &mut validator),
            company_id: obj.optional_string("companyId", &mut validator),
            internal_user_id: obj.optional_string("internalUserId", &mut validator),
            notification_id: obj.optional_string("notificationId", &mut validator),
            token_id: obj.optional_string("tokenId", &mut validator),
            workspace_id: obj.required_string("workspaceId", &mut validator).unwrap_or_default(),
        };

        if !validator.has_errors() && !payload.has_valid_scope() {
            validator.add_error_with_code("", MISSING_SCOPE_MESSAGE, "custom");
        }
        validator.finish(payload)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn accepts_both_scopes() {
        let internal = TokenPayloadSchema
            .safe_parse(&json!({"workspaceId": "ws", "internalUserId": "iu"}))
            .unwrap();
        assert_eq!(internal, TokenPayload::internal_user("ws", "iu"));

        let client = TokenPayloadSchema
            .safe_parse(&json!({"workspaceId": "ws", "clientId": "c", "companyId": "co"}))
            .unwrap();
        assert_eq!(client, TokenPayload::client("ws", "c", "co"));
    }

    #[test]
    fn rejects_client_without_company() {
        let err = TokenPayloadSchema
            .safe_parse(&json!({"workspaceId": "ws", "clientId": "c"}))
            .unwrap_err();
        assert_eq!(err.error_count(), 1);
        assert_eq!(err.errors[0].message, MISSING_SCOPE_MESSAGE);
        assert_eq!(err.errors[0].code.as_deref(), Some("custom"));
    }

    #[test]
    fn rejects_missing_workspace_without_scope_noise() {
        let err = TokenPayloadSchema.safe_parse(&json!({"internalUserId": "iu"})).unwrap_err();
        assert_eq!(err.error_count(), 1);
        assert_eq!(err.errors[0].field, "workspaceId");
        assert_eq!(err.errors[0].message, "Invalid input: expected string, received undefined");
    }

    #[test]
    fn rejects_empty_workspace_and_wrong_types() {
        let err = TokenPayloadSchema
            .safe_parse(&json!({"workspaceId": "", "internalUserId": 7, "tokenId": null}))
            .unwrap_err();
        assert_eq!(err.error_count(), 3);
        assert_eq!(err.field_errors("workspaceId")[0].code.as_deref(), Some("too_small"));
        assert_eq!(
            err.field_errors("internalUserId")[0].message,
            "Invalid input: expected string, received number"
        );
        assert_eq!(
            err.field_errors("tokenId")[0].message,
            "Invalid input: expected string, received null"
        );
    }

    #[test]
    fn rejects_non_objects() {
        let err = TokenPayloadSchema.safe_parse(&json!(["ws"])).unwrap_err();
        assert_eq!(err.errors[0].message, "Invalid input: expected object, received array");
    }

    #[test]
    fn strips_unknown_fields() {
        let payload = TokenPayloadSchema
            .safe_parse(&json!({"workspaceId": "ws", "internalUserId": "iu", "extra": {"a": 1}}))
            .unwrap();
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"internalUserId":"iu","workspaceId":"ws"}"#
        );
    }
}
