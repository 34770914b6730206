use chrono::Weekday;
use serde::{Deserialize, Serialize};

const TH_WEEKDAYS: [&str; 7] = ["อา.", "จ.", "อ.", "พ.", "พฤ.", "ศ.", "ส."];
const EN_WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const TH_MONTHS: [&str; 12] = [
    "ม.ค.", "ก.พ.", "มี.ค.", "เม.ย.", "พ.ค.", "มิ.ย.", "ก.ค.", "ส.ค.", "ก.ย.", "ต.ค.", "พ.ย.", "ธ.ค.",
];
const EN_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// 報表標籤使用的語系
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Locale {
    #[default]
    #[serde(rename = "th", alias = "thai")]
    #[cfg_attr(feature = "cli", value(name = "th", alias = "thai"))]
    Thai,
    #[serde(rename = "en", alias = "english")]
    #[cfg_attr(feature = "cli", value(name = "en", alias = "english"))]
    English,
}

/// 文字報表中的固定字串
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Title,
    Warranties,
    Items,
    Active,
    Nearing,
    Expired,
    Daily,
    Monthly,
    Notifications,
}

impl Locale {
    /// 星期縮寫，星期日為第一天
    pub fn weekday_label(self, weekday: Weekday) -> &'static str {
        let index = weekday.num_days_from_sunday() as usize;
        match self {
            Locale::Thai => TH_WEEKDAYS[index],
            Locale::English => EN_WEEKDAYS[index],
        }
    }

    /// `month` 為 1..=12
    pub fn month_label(self, month: u32) -> &'static str {
        let index = (month.clamp(1, 12) - 1) as usize;
        match self {
            Locale::Thai => TH_MONTHS[index],
            Locale::English => EN_MONTHS[index],
        }
    }

    /// 後端沒有提供錯誤訊息時使用
    pub fn load_failure_message(self) -> &'static str {
        match self {
            Locale::Thai => "ไม่สามารถโหลดข้อมูลได้",
            Locale::English => "Unable to load data",
        }
    }

    pub fn heading(self, heading: Heading) -> &'static str {
        match (self, heading) {
            (Locale::Thai, Heading::Title) => "ภาพรวม & การรับประกัน",
            (Locale::Thai, Heading::Warranties) => "ใบรับประกัน",
            (Locale::Thai, Heading::Items) => "สินค้า",
            (Locale::Thai, Heading::Active) => "กำลังใช้งาน",
            (Locale::Thai, Heading::Nearing) => "ใกล้หมดอายุ",
            (Locale::Thai, Heading::Expired) => "หมดอายุ",
            (Locale::Thai, Heading::Daily) => "รายวัน (7 วัน)",
            (Locale::Thai, Heading::Monthly) => "รายเดือน (6 เดือน)",
            (Locale::Thai, Heading::Notifications) => "การแจ้งเตือน",
            (Locale::English, Heading::Title) => "Overview & Warranties",
            (Locale::English, Heading::Warranties) => "Warranties",
            (Locale::English, Heading::Items) => "Items",
            (Locale::English, Heading::Active) => "Active",
            (Locale::English, Heading::Nearing) => "Nearing expiration",
            (Locale::English, Heading::Expired) => "Expired",
            (Locale::English, Heading::Daily) => "Daily (7 days)",
            (Locale::English, Heading::Monthly) => "Monthly (6 months)",
            (Locale::English, Heading::Notifications) => "Notifications",
        }
    }
}
