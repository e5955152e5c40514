use chrono::{DateTime, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// True when `deadline` falls on today's UTC date or later.
pub fn is_today_or_later(deadline: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    deadline.date_naive() >= now.date_naive()
}
