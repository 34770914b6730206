use crate::domain::timestamp::{first_present, RawTimestamp};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// 建立時間欄位的讀取順序，後端命名不一致
pub const CREATED_AT_FIELDS: [&str; 2] = ["createdAt", "created_at"];

pub const NEARING_EXPIRATION_TAG: &str = "ใกล้หมดอายุ";
pub const EXPIRED_TAG: &str = "หมดอายุ";

/// 保固狀態，在資料進來時就正規化成單一列舉
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WarrantyStatus {
    Active,
    NearingExpiration,
    Expired,
    /// 後端給了無法辨識的狀態碼
    Other(String),
}

impl WarrantyStatus {
    pub fn from_code(code: &str) -> Self {
        match code {
            "active" => WarrantyStatus::Active,
            "nearing_expiration" => WarrantyStatus::NearingExpiration,
            "expired" => WarrantyStatus::Expired,
            other => WarrantyStatus::Other(other.to_string()),
        }
    }

    /// 舊資料只有顯示用的標籤，沒有狀態碼
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some(NEARING_EXPIRATION_TAG) => WarrantyStatus::NearingExpiration,
            Some(EXPIRED_TAG) => WarrantyStatus::Expired,
            _ => WarrantyStatus::Active,
        }
    }

    /// 空字串的狀態碼視同沒有給
    pub fn resolve(code: Option<&str>, tag: Option<&str>) -> Self {
        match code.filter(|code| !code.is_empty()) {
            Some(code) => Self::from_code(code),
            None => Self::from_tag(tag),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            WarrantyStatus::Active => "active",
            WarrantyStatus::NearingExpiration => "nearing_expiration",
            WarrantyStatus::Expired => "expired",
            WarrantyStatus::Other(code) => code,
        }
    }
}

impl Serialize for WarrantyStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", rename_all = "camelCase")]
pub struct WarrantyItem {
    pub status: WarrantyStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_tag: Option<String>,
}

impl WarrantyItem {
    pub fn with_code(code: &str) -> Self {
        Self {
            status: WarrantyStatus::from_code(code),
            status_tag: None,
        }
    }

    pub fn with_tag(tag: &str) -> Self {
        Self {
            status: WarrantyStatus::from_tag(Some(tag)),
            status_tag: Some(tag.to_string()),
        }
    }
}

impl From<Value> for WarrantyItem {
    fn from(value: Value) -> Self {
        let tag = value.get("statusTag").and_then(Value::as_str);
        // 非字串的狀態碼一樣算無法辨識，不退回標籤
        let status = match value.get("statusCode") {
            Some(Value::String(code)) => WarrantyStatus::resolve(Some(code.as_str()), tag),
            None | Some(Value::Null) => WarrantyStatus::from_tag(tag),
            Some(other) => WarrantyStatus::Other(other.to_string()),
        };
        Self {
            status,
            status_tag: tag.map(str::to_string),
        }
    }
}

/// 一張保固單，內含多個品項
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", rename_all = "camelCase")]
pub struct WarrantyHeader {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub items: Vec<WarrantyItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<RawTimestamp>,
}

impl WarrantyHeader {
    pub fn new(items: Vec<WarrantyItem>, created_at: Option<&str>) -> Self {
        Self {
            id: None,
            items,
            created_at: created_at.map(|text| RawTimestamp::Text(text.to_string())),
        }
    }
}

impl From<Value> for WarrantyHeader {
    fn from(value: Value) -> Self {
        let Value::Object(mut fields) = value else {
            return Self::default();
        };

        let created_at = first_present(&fields, &CREATED_AT_FIELDS).and_then(RawTimestamp::from_json);

        Self {
            id: fields.remove("id"),
            items: lenient_seq(fields.remove("items")),
            created_at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(
        default,
        alias = "storeName",
        alias = "store_name",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `/store/{id}/dashboard` 的內容（已拆掉 `data` 外層）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", rename_all = "camelCase")]
pub struct DashboardSummary {
    pub store_profile: Option<StoreProfile>,
    pub warranties: Vec<WarrantyHeader>,
}

impl From<Value> for DashboardSummary {
    fn from(value: Value) -> Self {
        let Value::Object(mut fields) = value else {
            return Self::default();
        };

        let store_profile = fields
            .remove("storeProfile")
            .filter(|profile| !profile.is_null())
            .and_then(|profile| serde_json::from_value(profile).ok());

        Self {
            store_profile,
            warranties: lenient_seq(fields.remove("warranties")),
        }
    }
}

/// 已讀旗標的欄位名稱，依序採用
pub const READ_FIELDS: [&str; 3] = ["read", "isRead", "is_read"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", rename_all = "camelCase")]
pub struct Notification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Notification {
    pub fn is_unread(&self) -> bool {
        self.read != Some(true)
    }
}

impl From<Value> for Notification {
    fn from(value: Value) -> Self {
        let Value::Object(mut fields) = value else {
            return Self::default();
        };

        let mut read = None;
        for name in READ_FIELDS {
            if let Some(flag) = fields.remove(name) {
                read = read.or_else(|| read_flag(&flag));
            }
        }

        Self {
            id: fields.remove("id").filter(|id| !id.is_null()),
            title: take_string(&mut fields, "title"),
            message: take_string(&mut fields, "message"),
            read,
            extra: fields,
        }
    }
}

/// 後端可能用 0/1 或字串表示布林
fn read_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => number.as_f64().map(|n| n != 0.0),
        Value::String(text) => match text.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// 只取字串；其他型別留在 extra 裡
fn take_string(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    match fields.remove(key) {
        Some(Value::String(text)) => Some(text),
        Some(Value::Null) | None => None,
        Some(other) => {
            fields.insert(key.to_string(), other);
            None
        }
    }
}

/// extract 階段的輸出
#[derive(Debug, Clone, Default)]
pub struct DashboardSnapshot {
    pub store_id: u64,
    pub summary: DashboardSummary,
    pub notifications: Vec<Notification>,
}

/// 後端回應可能包在 `{ "data": ... }` 裡
pub fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut fields) => match fields.remove("data") {
            Some(inner) if !inner.is_null() => inner,
            Some(inner) => {
                fields.insert("data".to_string(), inner);
                Value::Object(fields)
            }
            None => Value::Object(fields),
        },
        other => other,
    }
}

/// 非陣列一律視為空；元素各自寬鬆轉換
pub fn lenient_seq<T: From<Value>>(value: Option<Value>) -> Vec<T> {
    match value {
        Some(Value::Array(entries)) => entries.into_iter().map(T::from).collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_code_takes_precedence_over_tag() {
        let item: WarrantyItem =
            serde_json::from_value(json!({"statusCode": "expired", "statusTag": "ใกล้หมดอายุ"}))
                .unwrap();
        assert_eq!(item.status, WarrantyStatus::Expired);
    }

    #[test]
    fn test_tag_fallback() {
        let nearing: WarrantyItem = serde_json::from_value(json!({"statusTag": "ใกล้หมดอายุ"})).unwrap();
        let expired: WarrantyItem = serde_json::from_value(json!({"statusTag": "หมดอายุ"})).unwrap();
        let other_tag: WarrantyItem = serde_json::from_value(json!({"statusTag": "ใช้งาน"})).unwrap();
        let nothing: WarrantyItem = serde_json::from_value(json!({})).unwrap();

        assert_eq!(nearing.status, WarrantyStatus::NearingExpiration);
        assert_eq!(expired.status, WarrantyStatus::Expired);
        assert_eq!(other_tag.status, WarrantyStatus::Active);
        assert_eq!(nothing.status, WarrantyStatus::Active);
    }

    #[test]
    fn test_empty_or_null_code_falls_back_to_tag() {
        let empty: WarrantyItem =
            serde_json::from_value(json!({"statusCode": "", "statusTag": "หมดอายุ"})).unwrap();
        let null: WarrantyItem =
            serde_json::from_value(json!({"statusCode": null, "statusTag": "หมดอายุ"})).unwrap();
        assert_eq!(empty.status, WarrantyStatus::Expired);
        assert_eq!(null.status, WarrantyStatus::Expired);
    }

    #[test]
    fn test_unknown_code_is_kept() {
        let item: WarrantyItem = serde_json::from_value(json!({"statusCode": "voided"})).unwrap();
        assert_eq!(item.status, WarrantyStatus::Other("voided".to_string()));
        assert_eq!(item.status.code(), "voided");
    }

    #[test]
    fn test_non_string_code_is_kept_as_other() {
        let number: WarrantyItem = serde_json::from_value(json!({"statusCode": 3})).unwrap();
        let object: WarrantyItem =
            serde_json::from_value(json!({"statusCode": {"x": 1}, "statusTag": "หมดอายุ"})).unwrap();
        let flag: WarrantyItem = serde_json::from_value(json!({"statusCode": true})).unwrap();

        assert_eq!(number.status, WarrantyStatus::Other("3".to_string()));
        assert_eq!(object.status, WarrantyStatus::Other(r#"{"x":1}"#.to_string()));
        assert_eq!(flag.status, WarrantyStatus::Other("true".to_string()));
    }

    #[test]
    fn test_non_array_items_ingest_as_empty() {
        let header: WarrantyHeader =
            serde_json::from_value(json!({"items": {"statusCode": "active"}})).unwrap();
        assert!(header.items.is_empty());

        let missing: WarrantyHeader = serde_json::from_value(json!({"id": 7})).unwrap();
        assert!(missing.items.is_empty());
        assert_eq!(missing.id, Some(json!(7)));
    }

    #[test]
    fn test_created_at_field_order() {
        let both: WarrantyHeader = serde_json::from_value(json!({
            "createdAt": "2025-05-01T10:00:00Z",
            "created_at": "2024-01-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(
            both.created_at,
            Some(RawTimestamp::Text("2025-05-01T10:00:00Z".to_string()))
        );

        let snake_only: WarrantyHeader =
            serde_json::from_value(json!({"createdAt": null, "created_at": "2024-01-01"})).unwrap();
        assert_eq!(
            snake_only.created_at,
            Some(RawTimestamp::Text("2024-01-01".to_string()))
        );
    }

    #[test]
    fn test_summary_ingestion_is_lenient() {
        let summary: DashboardSummary = serde_json::from_value(json!({
            "storeProfile": {"id": 3, "storeName": "ร้านตัวอย่าง", "phone": "0812345678"},
            "warranties": [{"items": [{"statusCode": "active"}]}, "garbage"]
        }))
        .unwrap();

        let profile = summary.store_profile.unwrap();
        assert_eq!(profile.name.as_deref(), Some("ร้านตัวอย่าง"));
        assert_eq!(profile.extra.get("phone"), Some(&json!("0812345678")));
        assert_eq!(summary.warranties.len(), 2);
        assert!(summary.warranties[1].items.is_empty());

        let broken: DashboardSummary = serde_json::from_value(json!({"warranties": "none"})).unwrap();
        assert!(broken.warranties.is_empty());
        assert!(broken.store_profile.is_none());
    }

    #[test]
    fn test_unwrap_envelope() {
        assert_eq!(
            unwrap_envelope(json!({"data": {"warranties": []}})),
            json!({"warranties": []})
        );
        assert_eq!(unwrap_envelope(json!({"warranties": []})), json!({"warranties": []}));
        assert_eq!(unwrap_envelope(json!({"data": null})), json!({"data": null}));
        assert_eq!(unwrap_envelope(json!([1, 2])), json!([1, 2]));
    }

    #[test]
    fn test_notification_read_aliases() {
        let read: Notification = serde_json::from_value(json!({"id": 1, "isRead": true})).unwrap();
        let unread: Notification = serde_json::from_value(json!({"id": 2, "title": "x"})).unwrap();
        assert!(!read.is_unread());
        assert!(unread.is_unread());
    }

    #[test]
    fn test_notification_numeric_read_flag() {
        let unread: Notification = serde_json::from_value(json!({"id": 1, "read": 0})).unwrap();
        let read: Notification = serde_json::from_value(json!({"id": 2, "is_read": 1})).unwrap();
        let text: Notification = serde_json::from_value(json!({"isRead": "true"})).unwrap();

        assert_eq!(unread.read, Some(false));
        assert_eq!(read.read, Some(true));
        assert_eq!(text.read, Some(true));
        assert!(!unread.extra.contains_key("read"));
    }

    #[test]
    fn test_notification_ingestion_never_drops_entries() {
        let notifications: Vec<Notification> = lenient_seq(Some(json!([
            {"id": 1, "title": 42, "priority": "high"},
            "garbage",
            null
        ])));

        assert_eq!(notifications.len(), 3);
        assert_eq!(notifications[0].title, None);
        assert_eq!(notifications[0].extra.get("title"), Some(&json!(42)));
        assert_eq!(notifications[0].extra.get("priority"), Some(&json!("high")));
        assert!(notifications[1].is_unread());
        assert_eq!(notifications[2], Notification::default());
    }
}
