use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct NewAnthro {
    pub teacher_user_id: i32,
    pub student_user_id: i32,
    pub date_recorded: NaiveDate,
    pub height: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnthroChanges {
    pub date_recorded: Option<NaiveDate>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPerformanceType {
    pub name: String,
    pub unit: Option<String>,
}

/// `unit: Some(None)` clears the unit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerformanceTypeChanges {
    pub name: Option<String>,
    pub unit: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAssignedTest {
    pub performance_type_id: i32,
    pub teacher_user_id: i32,
    pub student_user_id: i32,
    pub date_assigned: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPerformanceGrade {
    pub performance_type_id: i32,
    pub teacher_user_id: i32,
    pub student_user_id: i32,
    pub date_taken: NaiveDate,
    pub grade: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerformanceGradeChanges {
    pub date_taken: Option<NaiveDate>,
    pub grade: Option<f64>,
}
