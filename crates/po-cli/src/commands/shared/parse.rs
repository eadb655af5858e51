use serde::de::DeserializeOwned;

/// Parse a SCREAMING_SNAKE_CASE wire enum from loose CLI input.
///
/// `pending-approval`, `pending_approval` and `PENDING_APPROVAL` all parse.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().replace('-', "_").to_ascii_uppercase();
    serde_json::from_value(serde_json::Value::String(normalized))
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

#[cfg(test)]
mod tests {
    use po_core::enums::{Permission, PoStatus};

    use super::parse_enum;

    #[test]
    fn parses_wire_value() {
        let status: PoStatus = parse_enum("SENT_TO_VENDOR", "status").expect("status should parse");
        assert_eq!(status, PoStatus::SentToVendor);
    }

    #[test]
    fn parses_hyphenated_lowercase_alias() {
        let status: PoStatus =
            parse_enum("pending-approval", "status").expect("status should parse");
        assert_eq!(status, PoStatus::PendingApproval);

        let permission: Permission =
            parse_enum("approve_po", "permission").expect("permission should parse");
        assert_eq!(permission, Permission::ApprovePo);
    }

    #[test]
    fn errors_on_invalid_enum() {
        let err = parse_enum::<PoStatus>("archived", "status").expect_err("should fail");
        assert!(err.to_string().contains("invalid status 'archived'"));
    }
}
