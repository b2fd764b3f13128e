use chrono::{Local, NaiveDate};

/// Today's date in local time, the date stamped on new posts and comments.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
