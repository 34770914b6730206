//! 保固摘要彙總：純函式，不做任何 I/O，可以同時在多個執行緒呼叫。

use crate::domain::locale::Locale;
use crate::domain::model::{WarrantyHeader, WarrantyStatus};
use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate};
use serde::Serialize;

pub const DAILY_BUCKETS: usize = 7;
pub const MONTHLY_BUCKETS: usize = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_headers: usize,
    pub total_items: usize,
    pub active: usize,
    pub nearing: usize,
    pub expired: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistogramBucket {
    pub label: String,
    /// 當天日期，或月份的第一天
    pub start: NaiveDate,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub totals: Totals,
    pub active_percent: u32,
    pub nearing_percent: u32,
    pub expired_percent: u32,
    pub daily: Vec<HistogramBucket>,
    pub monthly: Vec<HistogramBucket>,
}

/// 無法辨識的狀態碼只計入 total_items
pub fn compute_totals(headers: &[WarrantyHeader]) -> Totals {
    let initial = Totals {
        total_headers: headers.len(),
        ..Totals::default()
    };

    headers
        .iter()
        .flat_map(|header| &header.items)
        .fold(initial, |mut totals, item| {
            totals.total_items += 1;
            match item.status {
                WarrantyStatus::Active => totals.active += 1,
                WarrantyStatus::NearingExpiration => totals.nearing += 1,
                WarrantyStatus::Expired => totals.expired += 1,
                WarrantyStatus::Other(_) => {}
            }
            totals
        })
}

/// 以 `reference` 當天為最後一格的 7 天，由舊到新
pub fn compute_daily_histogram(
    headers: &[WarrantyHeader],
    reference: &DateTime<FixedOffset>,
    locale: Locale,
) -> Vec<HistogramBucket> {
    let today = reference.date_naive();
    let mut counts = [0usize; DAILY_BUCKETS];

    for created in creation_dates(headers, reference.offset()) {
        let age = (today - created).num_days();
        if (0..DAILY_BUCKETS as i64).contains(&age) {
            counts[DAILY_BUCKETS - 1 - age as usize] += 1;
        }
    }

    counts
        .iter()
        .enumerate()
        .map(|(slot, &value)| {
            let date = today - Days::new((DAILY_BUCKETS - 1 - slot) as u64);
            HistogramBucket {
                label: locale.weekday_label(date.weekday()).to_string(),
                start: date,
                value,
            }
        })
        .collect()
}

/// 以 `reference` 所在月份為最後一格的 6 個月，由舊到新
pub fn compute_monthly_histogram(
    headers: &[WarrantyHeader],
    reference: &DateTime<FixedOffset>,
    locale: Locale,
) -> Vec<HistogramBucket> {
    let current = month_index(reference.date_naive());
    let mut counts = [0usize; MONTHLY_BUCKETS];

    for created in creation_dates(headers, reference.offset()) {
        let age = current - month_index(created);
        if (0..MONTHLY_BUCKETS as i64).contains(&age) {
            counts[MONTHLY_BUCKETS - 1 - age as usize] += 1;
        }
    }

    counts
        .iter()
        .enumerate()
        .map(|(slot, &value)| {
            let start = month_start(current - (MONTHLY_BUCKETS - 1 - slot) as i64);
            HistogramBucket {
                label: locale.month_label(start.month()).to_string(),
                start,
                value,
            }
        })
        .collect()
}

/// 四捨五入（.5 進位），以整數運算避免浮點誤差
pub fn percent_of(n: usize, total_items: usize) -> u32 {
    if total_items == 0 {
        return 0;
    }
    let (n, total) = (n as u64, total_items as u64);
    ((200 * n + total) / (2 * total)) as u32
}

pub fn summarize(
    headers: &[WarrantyHeader],
    reference: &DateTime<FixedOffset>,
    locale: Locale,
) -> DashboardStats {
    let totals = compute_totals(headers);

    DashboardStats {
        totals,
        active_percent: percent_of(totals.active, totals.total_items),
        nearing_percent: percent_of(totals.nearing, totals.total_items),
        expired_percent: percent_of(totals.expired, totals.total_items),
        daily: compute_daily_histogram(headers, reference, locale),
        monthly: compute_monthly_histogram(headers, reference, locale),
    }
}

/// 沒有或無法解析建立時間的保固單不列入
fn creation_dates<'a>(
    headers: &'a [WarrantyHeader],
    offset: &'a FixedOffset,
) -> impl Iterator<Item = NaiveDate> + 'a {
    headers
        .iter()
        .filter_map(|header| header.created_at.as_ref()?.resolve(offset))
        .map(|created| created.date_naive())
}

fn month_index(date: NaiveDate) -> i64 {
    date.year() as i64 * 12 + date.month0() as i64
}

fn month_start(index: i64) -> NaiveDate {
    let year = index.div_euclid(12) as i32;
    let month = index.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}
