use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// 後端原樣傳回的時間欄位，解析延後到知道參考時區時才做
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    EpochMillis(i64),
    Text(String),
}

impl RawTimestamp {
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(RawTimestamp::Text(text.clone())),
            Value::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().map(|millis| millis.trunc() as i64))
                .map(RawTimestamp::EpochMillis),
            _ => None,
        }
    }

    /// 轉成 `offset` 時區下的時間；無法解析時回傳 None。
    /// 不帶時區的字串視為 `offset` 的當地時間。
    pub fn resolve(&self, offset: &FixedOffset) -> Option<DateTime<FixedOffset>> {
        match self {
            RawTimestamp::EpochMillis(millis) => {
                DateTime::from_timestamp_millis(*millis).map(|utc| utc.with_timezone(offset))
            }
            RawTimestamp::Text(text) => parse_text(text.trim(), offset),
        }
    }
}

fn parse_text(text: &str, offset: &FixedOffset) -> Option<DateTime<FixedOffset>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(offset));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return offset.from_local_datetime(&naive).single();
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(|naive| offset.from_local_datetime(&naive).single())
}

/// 依序找出第一個有值的欄位（非 null、非空字串）
pub fn first_present<'a>(fields: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| match fields.get(*name) {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) if text.is_empty() => None,
        Some(value) => Some(value),
    })
}
