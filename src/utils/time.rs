use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

/// 给定日期的 UTC 起止时刻（含当天最后一秒）
pub fn day_range(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_hms_opt(0, 0, 0).unwrap().and_utc();
    let end = date.and_hms_opt(23, 59, 59).unwrap().and_utc();
    (start, end)
}

pub fn today_range() -> (DateTime<Utc>, DateTime<Utc>) {
    day_range(Utc::now().date_naive())
}

/// 所在周（周一至周日）的日期范围
pub fn week_range(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = date.weekday().num_days_from_monday() as i64;
    let monday = date - Duration::days(offset);
    (monday, monday + Duration::days(6))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_range() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let (start, end) = day_range(date);
        assert_eq!(start.to_rfc3339(), "2025-03-14T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2025-03-14T23:59:59+00:00");
    }

    #[test]
    fn test_week_range() {
        // 2025-03-14 是周五
        let friday = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let (monday, sunday) = week_range(friday);
        assert_eq!(monday, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        assert_eq!(sunday, NaiveDate::from_ymd_opt(2025, 3, 16).unwrap());

        // 周一与周日落在同一周
        assert_eq!(week_range(monday), (monday, sunday));
        assert_eq!(week_range(sunday), (monday, sunday));
    }
}
