use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::region::Region;

/// One normalized long-format row: the case count for a single region on a
/// single date.
///
/// `cases` is always a finite number; missing or unparseable source cells
/// are coerced to zero by the wide-to-long transform before a record is
/// ever constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub region: Region,
    pub cases: f64,
}

impl CaseRecord {
    pub fn new(date: NaiveDate, region: Region, cases: f64) -> Self {
        Self { date, region, cases }
    }
}
