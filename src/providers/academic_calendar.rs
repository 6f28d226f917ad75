use chrono::{Datelike, NaiveDate, Utc};

use crate::types::db::section::GradeLevel;

/// First month of a new academic year
const ROLLOVER_MONTH: u32 = 8;
const FINAL_GRADE: i32 = 12;

/// Derives school grades from graduation years
///
/// Pinned to one date so a whole request classifies students consistently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcademicCalendar {
    today: NaiveDate,
}

impl AcademicCalendar {
    pub fn at(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn current() -> Self {
        Self::at(Utc::now().date_naive())
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Calendar year in which the running academic year ends
    pub fn academic_year_end(&self) -> i32 {
        if self.today.month() >= ROLLOVER_MONTH {
            self.today.year() + 1
        } else {
            self.today.year()
        }
    }

    /// `None` when the grad year is too far out to name a grade
    pub fn grade_for(&self, grad_year: i32) -> Option<i32> {
        grad_year
            .checked_sub(self.academic_year_end())
            .and_then(|years_left| FINAL_GRADE.checked_sub(years_left))
    }

    pub fn grad_year_for(&self, grade: i32) -> i32 {
        self.academic_year_end() + (FINAL_GRADE - grade)
    }

    /// `None` when the student is outside the grades sections exist for
    pub fn grade_level_for(&self, grad_year: i32) -> Option<GradeLevel> {
        self.grade_for(grad_year).and_then(GradeLevel::for_grade)
    }
}
