use chrono::NaiveDate;

use crate::errors::internal::FieldViolation;
use crate::types::db::section::GradeLevel;
use crate::types::db::user::UserType;
use crate::types::dto::fitness::{
    AssignPerformanceTestRequest, CreateAnthroRequest, CreatePerformanceGradeRequest, CreatePerformanceTypeRequest,
    UpdateAnthroRequest, UpdatePerformanceGradeRequest, UpdatePerformanceTypeRequest,
};
use crate::types::dto::roster::TransferStudentsRequest;
use crate::types::dto::section::{CreateSectionRequest, UpdateSectionRequest};
use crate::types::dto::user::{RegisterUserRequest, StaffDetailsInput, UpdateUserRequest};
use crate::types::internal::fitness::{
    AnthroChanges, NewAnthro, NewAssignedTest, NewPerformanceGrade, NewPerformanceType, PerformanceGradeChanges,
    PerformanceTypeChanges,
};
use crate::types::internal::section::{NewSection, SectionChanges};
use crate::types::internal::user::{NewUser, RoleDetails, StaffDetails, UserChanges};

const PASSWORD_MIN_LENGTH: usize = 4;
const PASSWORD_MAX_LENGTH: usize = 128;
const NAME_MIN_LENGTH: usize = 2;
const EMAIL_MAX_LENGTH: usize = 254;
const GRAD_YEAR_MIN: i32 = 1900;
const GRAD_YEAR_MAX: i32 = 2200;
const PERFORMANCE_TYPE_NAME_MAX_LENGTH: usize = 64;
const UNIT_MAX_LENGTH: usize = 32;

/// Field-level request validation
///
/// Every rule runs so a caller sees all problems in one response. Errors carry the
/// camelCase field names used on the wire.
pub struct ValidationProvider;

/// Accumulates violations while a request is checked
#[derive(Default)]
struct Violations(Vec<FieldViolation>);

impl Violations {
    fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldViolation::new(field, message));
    }

    /// Record the error of a failed check and keep its value otherwise
    fn check<T>(&mut self, field: &str, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.add(field, message);
                None
            }
        }
    }

    fn finish<T>(self, value: impl FnOnce() -> Option<T>) -> Result<T, Vec<FieldViolation>> {
        if !self.0.is_empty() {
            return Err(self.0);
        }
        value().ok_or_else(|| vec![FieldViolation::new("body", "Request could not be validated")])
    }
}

impl ValidationProvider {
    pub fn new() -> Self {
        Self
    }

    /// Trimmed and lower-cased form used for storage and lookups
    pub fn normalize_email(&self, email: &str) -> String {
        email.trim().to_lowercase()
    }

    pub fn validate_new_user(&self, req: &RegisterUserRequest) -> Result<NewUser, Vec<FieldViolation>> {
        let mut v = Violations::default();

        let email = v.check("email", required(&req.email, "Email").and_then(|e| self.email(e)));
        let password = v.check("password", present(&req.password, "Password").and_then(password));
        let first_name = v.check("firstName", required(&req.first_name, "First name").and_then(|n| name(n, "First name")));
        let last_name = v.check("lastName", required(&req.last_name, "Last name").and_then(|n| name(n, "Last name")));
        let birth_date = v.check("birthDate", required(&req.birth_date, "Birth date").and_then(strict_date));
        let user_type = v.check("userType", required(&req.user_type, "User type").and_then(user_type));

        let details = user_type.and_then(|user_type| match user_type {
            UserType::Student => {
                let grad_year = req.student_details.as_ref().and_then(|d| d.grad_year);
                match grad_year {
                    Some(value) => v
                        .check("studentDetails.gradYear", grad_year_in_range(value))
                        .map(|grad_year| RoleDetails::Student { grad_year }),
                    None => {
                        v.add("studentDetails.gradYear", "Graduation year is required for students");
                        None
                    }
                }
            }
            UserType::Teacher => {
                staff_details(&mut v, "teacherDetails", req.teacher_details.as_ref()).map(RoleDetails::Teacher)
            }
            UserType::Admin => {
                staff_details(&mut v, "adminDetails", req.admin_details.as_ref()).map(RoleDetails::Admin)
            }
        });

        v.finish(|| {
            Some(NewUser {
                email: email?,
                password: password?,
                first_name: first_name?,
                last_name: last_name?,
                birth_date: birth_date?,
                gender_identity: optional_text(&req.gender_identity),
                pronouns: optional_text(&req.pronouns),
                photo_url: optional_text(&req.photo_url),
                details: details?,
            })
        })
    }

    /// Validate a partial update against the stored user type
    pub fn validate_user_changes(
        &self,
        req: &UpdateUserRequest,
        stored_type: UserType,
    ) -> Result<UserChanges, Vec<FieldViolation>> {
        let mut v = Violations::default();
        let mut changes = UserChanges {
            gender_identity: optional_text(&req.gender_identity),
            pronouns: optional_text(&req.pronouns),
            photo_url: optional_text(&req.photo_url),
            is_archived: req.is_archived,
            ..Default::default()
        };

        if let Some(email) = &req.email {
            changes.email = v.check("email", self.email(email));
        }
        if let Some(value) = &req.password {
            changes.password = v.check("password", password(value));
        }
        if let Some(value) = &req.first_name {
            changes.first_name = v.check("firstName", name(value, "First name"));
        }
        if let Some(value) = &req.last_name {
            changes.last_name = v.check("lastName", name(value, "Last name"));
        }
        if let Some(value) = &req.birth_date {
            changes.birth_date = v.check("birthDate", strict_date(value));
        }
        if let Some(value) = &req.user_type {
            if let Some(requested) = v.check("userType", user_type(value)) {
                if requested != stored_type {
                    v.add("userType", "User type cannot be changed");
                }
            }
        }

        let staff_input = match stored_type {
            UserType::Student => {
                if let Some(value) = req.student_details.as_ref().and_then(|d| d.grad_year) {
                    changes.grad_year = v.check("studentDetails.gradYear", grad_year_in_range(value));
                }
                reject_foreign_details(&mut v, "teacherDetails", req.teacher_details.is_some(), stored_type);
                reject_foreign_details(&mut v, "adminDetails", req.admin_details.is_some(), stored_type);
                None
            }
            UserType::Teacher => {
                reject_foreign_details(&mut v, "studentDetails", req.student_details.is_some(), stored_type);
                reject_foreign_details(&mut v, "adminDetails", req.admin_details.is_some(), stored_type);
                Some(("teacherDetails", req.teacher_details.as_ref()))
            }
            UserType::Admin => {
                reject_foreign_details(&mut v, "studentDetails", req.student_details.is_some(), stored_type);
                reject_foreign_details(&mut v, "teacherDetails", req.teacher_details.is_some(), stored_type);
                Some(("adminDetails", req.admin_details.as_ref()))
            }
        };
        if let Some((prefix, input)) = staff_input {
            if let Some(staff) = staff_details(&mut v, prefix, input) {
                changes.years_exp = staff.years_exp;
                changes.bio = staff.bio;
            }
        }

        v.finish(|| Some(changes))
    }

    pub fn validate_new_section(&self, req: &CreateSectionRequest) -> Result<NewSection, Vec<FieldViolation>> {
        let mut v = Violations::default();

        let section_code = v.check(
            "sectionCode",
            required(&req.section_code, "Section code").and_then(section_code),
        );
        let grade_level = v.check(
            "gradeLevel",
            required(&req.grade_level, "Grade level").and_then(grade_level),
        );
        let is_active = v.check(
            "isActive",
            req.is_active.ok_or_else(|| "Active flag is required".to_string()),
        );

        v.finish(|| {
            Some(NewSection {
                section_code: section_code?,
                grade_level: grade_level?,
                is_active: is_active?,
            })
        })
    }

    pub fn validate_section_changes(&self, req: &UpdateSectionRequest) -> Result<SectionChanges, Vec<FieldViolation>> {
        let mut v = Violations::default();
        let mut changes = SectionChanges {
            is_active: req.is_active,
            ..Default::default()
        };

        if let Some(value) = &req.section_code {
            changes.section_code = v.check("sectionCode", section_code(value));
        }
        if let Some(value) = &req.grade_level {
            changes.grade_level = v.check("gradeLevel", grade_level(value));
        }

        v.finish(|| Some(changes))
    }

    pub fn validate_new_anthro(&self, req: &CreateAnthroRequest) -> Result<NewAnthro, Vec<FieldViolation>> {
        let mut v = Violations::default();

        let teacher_user_id = v.check("teacherUserId", required_id(req.teacher_user_id, "Teacher user id"));
        let student_user_id = v.check("studentUserId", required_id(req.student_user_id, "Student user id"));
        let date_recorded = v.check(
            "dateRecorded",
            required(&req.date_recorded, "Date recorded").and_then(strict_date),
        );
        let height = v.check("height", positive(req.height, "Height"));
        let weight = v.check("weight", positive(req.weight, "Weight"));

        v.finish(|| {
            Some(NewAnthro {
                teacher_user_id: teacher_user_id?,
                student_user_id: student_user_id?,
                date_recorded: date_recorded?,
                height: height?,
                weight: weight?,
            })
        })
    }

    pub fn validate_anthro_changes(&self, req: &UpdateAnthroRequest) -> Result<AnthroChanges, Vec<FieldViolation>> {
        let mut v = Violations::default();
        let mut changes = AnthroChanges::default();

        if let Some(value) = &req.date_recorded {
            changes.date_recorded = v.check("dateRecorded", strict_date(value));
        }
        if req.height.is_some() {
            changes.height = v.check("height", positive(req.height, "Height"));
        }
        if req.weight.is_some() {
            changes.weight = v.check("weight", positive(req.weight, "Weight"));
        }

        v.finish(|| Some(changes))
    }

    pub fn validate_new_performance_type(
        &self,
        req: &CreatePerformanceTypeRequest,
    ) -> Result<NewPerformanceType, Vec<FieldViolation>> {
        let mut v = Violations::default();

        let name = v.check(
            "name",
            required(&req.name, "Name").and_then(performance_type_name),
        );
        let unit = v.check("unit", unit(&req.unit));

        v.finish(|| {
            Some(NewPerformanceType {
                name: name?,
                unit: unit?,
            })
        })
    }

    pub fn validate_performance_type_changes(
        &self,
        req: &UpdatePerformanceTypeRequest,
    ) -> Result<PerformanceTypeChanges, Vec<FieldViolation>> {
        let mut v = Violations::default();
        let mut changes = PerformanceTypeChanges::default();

        if let Some(value) = &req.name {
            changes.name = v.check("name", performance_type_name(value));
        }
        if req.unit.is_some() {
            changes.unit = v.check("unit", unit(&req.unit));
        }

        v.finish(|| Some(changes))
    }

    pub fn validate_new_assignment(
        &self,
        req: &AssignPerformanceTestRequest,
    ) -> Result<NewAssignedTest, Vec<FieldViolation>> {
        let mut v = Violations::default();

        let performance_type_id = v.check(
            "performanceTypeId",
            required_id(req.performance_type_id, "Performance type id"),
        );
        let teacher_user_id = v.check("teacherUserId", required_id(req.teacher_user_id, "Teacher user id"));
        let student_user_id = v.check("studentUserId", required_id(req.student_user_id, "Student user id"));
        let date_assigned = match optional_text(&req.date_assigned) {
            Some(value) => v.check("dateAssigned", strict_date(&value)).map(Some),
            None => Some(None),
        };

        v.finish(|| {
            Some(NewAssignedTest {
                performance_type_id: performance_type_id?,
                teacher_user_id: teacher_user_id?,
                student_user_id: student_user_id?,
                date_assigned: date_assigned?,
            })
        })
    }

    pub fn validate_new_performance_grade(
        &self,
        req: &CreatePerformanceGradeRequest,
    ) -> Result<NewPerformanceGrade, Vec<FieldViolation>> {
        let mut v = Violations::default();

        let performance_type_id = v.check(
            "performanceTypeId",
            required_id(req.performance_type_id, "Performance type id"),
        );
        let teacher_user_id = v.check("teacherUserId", required_id(req.teacher_user_id, "Teacher user id"));
        let student_user_id = v.check("studentUserId", required_id(req.student_user_id, "Student user id"));
        let date_taken = v.check(
            "dateTaken",
            required(&req.date_taken, "Date taken").and_then(strict_date),
        );
        let grade = v.check("grade", non_negative(req.grade, "Grade"));

        v.finish(|| {
            Some(NewPerformanceGrade {
                performance_type_id: performance_type_id?,
                teacher_user_id: teacher_user_id?,
                student_user_id: student_user_id?,
                date_taken: date_taken?,
                grade: grade?,
            })
        })
    }

    pub fn validate_performance_grade_changes(
        &self,
        req: &UpdatePerformanceGradeRequest,
    ) -> Result<PerformanceGradeChanges, Vec<FieldViolation>> {
        let mut v = Violations::default();
        let mut changes = PerformanceGradeChanges::default();

        if let Some(value) = &req.date_taken {
            changes.date_taken = v.check("dateTaken", strict_date(value));
        }
        if req.grade.is_some() {
            changes.grade = v.check("grade", non_negative(req.grade, "Grade"));
        }

        v.finish(|| Some(changes))
    }

    pub fn validate_student_ids(&self, student_user_ids: &[i32]) -> Result<(), Vec<FieldViolation>> {
        let mut v = Violations::default();
        if student_user_ids.is_empty() {
            v.add("studentUserIds", "At least one student user id is required");
        }
        v.finish(|| Some(()))
    }

    pub fn validate_transfer(&self, req: &TransferStudentsRequest) -> Result<(), Vec<FieldViolation>> {
        let mut v = Violations::default();
        if req.student_user_ids.is_empty() {
            v.add("studentUserIds", "At least one student user id is required");
        }
        if req.from_section_id == req.to_section_id {
            v.add("toSectionId", "Destination section must differ from the source section");
        }
        v.finish(|| Some(()))
    }

    fn email(&self, value: &str) -> Result<String, String> {
        let email = self.normalize_email(value);
        if is_valid_email(&email) {
            Ok(email)
        } else {
            Err("Must be a valid email address".to_string())
        }
    }
}

impl Default for ValidationProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn required<'a>(value: &'a Option<String>, label: &str) -> Result<&'a str, String> {
    match value.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(format!("{} is required", label)),
    }
}

/// Presence only; the value is kept exactly as sent
fn present<'a>(value: &'a Option<String>, label: &str) -> Result<&'a str, String> {
    match value.as_deref() {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(format!("{} is required", label)),
    }
}

/// Empty strings count as absent
fn optional_text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn password(value: &str) -> Result<String, String> {
    let length = value.chars().count();
    if (PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&length) {
        Ok(value.to_string())
    } else {
        Err(format!(
            "Password must be between {} and {} characters",
            PASSWORD_MIN_LENGTH, PASSWORD_MAX_LENGTH
        ))
    }
}

fn grad_year_in_range(value: i32) -> Result<i32, String> {
    if (GRAD_YEAR_MIN..=GRAD_YEAR_MAX).contains(&value) {
        Ok(value)
    } else {
        Err(format!("Graduation year must be between {} and {}", GRAD_YEAR_MIN, GRAD_YEAR_MAX))
    }
}

fn name(value: &str, label: &str) -> Result<String, String> {
    let value = value.trim();
    if value.chars().count() >= NAME_MIN_LENGTH {
        Ok(value.to_string())
    } else {
        Err(format!("{} must be at least {} characters", label, NAME_MIN_LENGTH))
    }
}

/// `YYYY-MM-DD` with zero padding and a real calendar day
pub(crate) fn strict_date(value: &str) -> Result<NaiveDate, String> {
    let value = value.trim();
    let well_formed = value.len() == 10
        && value.char_indices().all(|(i, c)| match i {
            4 | 7 => c == '-',
            _ => c.is_ascii_digit(),
        });

    if !well_formed {
        return Err("Must be a date in YYYY-MM-DD format".to_string());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| "Must be a valid calendar date".to_string())
}

fn user_type(value: &str) -> Result<UserType, String> {
    UserType::parse(value.trim()).ok_or_else(|| "User type must be one of student, teacher, admin".to_string())
}

fn section_code(value: &str) -> Result<String, String> {
    let value = value.trim();
    let well_formed = value.len() == 7
        && value.char_indices().all(|(i, c)| match i {
            4 => c == '-',
            _ => c.is_ascii_digit(),
        });

    if well_formed {
        Ok(value.to_string())
    } else {
        Err("Section code must be four digits, a dash and two digits (e.g. 2024-01)".to_string())
    }
}

fn grade_level(value: &str) -> Result<GradeLevel, String> {
    GradeLevel::parse(value.trim()).ok_or_else(|| "Grade level must be one of 6, 7, 8, 9, 10-11-12".to_string())
}

fn required_id(value: Option<i32>, label: &str) -> Result<i32, String> {
    value.ok_or_else(|| format!("{} is required", label))
}

fn performance_type_name(value: &str) -> Result<String, String> {
    let value = value.trim();
    let length = value.chars().count();
    if (NAME_MIN_LENGTH..=PERFORMANCE_TYPE_NAME_MAX_LENGTH).contains(&length) {
        Ok(value.to_string())
    } else {
        Err(format!(
            "Name must be between {} and {} characters",
            NAME_MIN_LENGTH, PERFORMANCE_TYPE_NAME_MAX_LENGTH
        ))
    }
}

fn unit(value: &Option<String>) -> Result<Option<String>, String> {
    match optional_text(value) {
        Some(unit) if unit.chars().count() > UNIT_MAX_LENGTH => {
            Err(format!("Unit must be at most {} characters", UNIT_MAX_LENGTH))
        }
        unit => Ok(unit),
    }
}

fn non_negative(value: Option<f64>, label: &str) -> Result<f64, String> {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => Ok(v),
        Some(_) => Err(format!("{} must be zero or more", label)),
        None => Err(format!("{} is required", label)),
    }
}

fn positive(value: Option<f64>, label: &str) -> Result<f64, String> {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => Ok(v),
        Some(_) => Err(format!("{} must be a positive number", label)),
        None => Err(format!("{} is required", label)),
    }
}

fn staff_details(v: &mut Violations, prefix: &str, input: Option<&StaffDetailsInput>) -> Option<StaffDetails> {
    let Some(input) = input else {
        return Some(StaffDetails::default());
    };

    if let Some(years_exp) = input.years_exp {
        if years_exp < 0 {
            v.add(&format!("{}.yearsExp", prefix), "Years of experience cannot be negative");
            return None;
        }
    }

    Some(StaffDetails {
        years_exp: input.years_exp,
        bio: optional_text(&input.bio),
    })
}

fn reject_foreign_details(v: &mut Violations, field: &str, present: bool, stored_type: UserType) {
    if present {
        v.add(field, format!("Not applicable to {} users", stored_type.as_str()));
    }
}

fn is_valid_email(email: &str) -> bool {
    if email.len() > EMAIL_MAX_LENGTH || email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| {
            !label.is_empty() && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::dto::user::{StaffDetailsInput, StudentDetailsInput};

    fn fields(violations: &[FieldViolation]) -> Vec<&str> {
        violations.iter().map(|v| v.field.as_str()).collect()
    }

    fn student_request() -> RegisterUserRequest {
        RegisterUserRequest {
            email: Some("  Ana.Lima@School.EDU ".to_string()),
            password: Some("pass1234".to_string()),
            first_name: Some("Ana".to_string()),
            last_name: Some("Lima".to_string()),
            birth_date: Some("2011-04-09".to_string()),
            user_type: Some("student".to_string()),
            pronouns: Some("".to_string()),
            student_details: Some(StudentDetailsInput { grad_year: Some(2029) }),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_student_is_normalized() {
        let provider = ValidationProvider::new();

        let new_user = provider.validate_new_user(&student_request()).unwrap();

        assert_eq!(new_user.email, "ana.lima@school.edu");
        assert_eq!(new_user.pronouns, None);
        assert_eq!(new_user.details, RoleDetails::Student { grad_year: 2029 });
    }

    #[test]
    fn test_every_violation_is_reported() {
        let provider = ValidationProvider::new();
        let req = RegisterUserRequest {
            email: Some("not-an-email".to_string()),
            password: Some("abc".to_string()),
            first_name: Some("A".to_string()),
            birth_date: Some("2011-4-9".to_string()),
            user_type: Some("parent".to_string()),
            ..Default::default()
        };

        let violations = provider.validate_new_user(&req).unwrap_err();

        assert_eq!(
            fields(&violations),
            vec!["email", "password", "firstName", "lastName", "birthDate", "userType"]
        );
    }

    #[test]
    fn test_student_requires_grad_year() {
        let provider = ValidationProvider::new();
        let req = RegisterUserRequest {
            student_details: None,
            ..student_request()
        };

        let violations = provider.validate_new_user(&req).unwrap_err();

        assert_eq!(fields(&violations), vec!["studentDetails.gradYear"]);
    }

    #[test]
    fn test_grad_year_must_be_in_range() {
        let provider = ValidationProvider::new();
        let req = RegisterUserRequest {
            student_details: Some(StudentDetailsInput { grad_year: Some(i32::MIN) }),
            ..student_request()
        };

        let violations = provider.validate_new_user(&req).unwrap_err();
        assert_eq!(fields(&violations), vec!["studentDetails.gradYear"]);

        let update = UpdateUserRequest {
            student_details: Some(StudentDetailsInput { grad_year: Some(i32::MAX) }),
            ..Default::default()
        };
        let violations = provider.validate_user_changes(&update, UserType::Student).unwrap_err();
        assert_eq!(fields(&violations), vec!["studentDetails.gradYear"]);
    }

    #[test]
    fn test_password_is_kept_as_sent() {
        let provider = ValidationProvider::new();
        let req = RegisterUserRequest {
            password: Some("  pass1234 ".to_string()),
            ..student_request()
        };

        let new_user = provider.validate_new_user(&req).unwrap();
        assert_eq!(new_user.password, "  pass1234 ");

        let update = UpdateUserRequest {
            password: Some("  pass1234 ".to_string()),
            ..Default::default()
        };
        let changes = provider.validate_user_changes(&update, UserType::Student).unwrap();
        assert_eq!(changes.password.as_deref(), Some("  pass1234 "));
    }

    #[test]
    fn test_staff_years_exp_cannot_be_negative() {
        let provider = ValidationProvider::new();
        let req = RegisterUserRequest {
            user_type: Some("teacher".to_string()),
            teacher_details: Some(StaffDetailsInput {
                years_exp: Some(-1),
                bio: None,
            }),
            ..student_request()
        };

        let violations = provider.validate_new_user(&req).unwrap_err();

        assert_eq!(fields(&violations), vec!["teacherDetails.yearsExp"]);
    }

    #[test]
    fn test_user_type_is_immutable() {
        let provider = ValidationProvider::new();
        let req = UpdateUserRequest {
            user_type: Some("admin".to_string()),
            ..Default::default()
        };

        let violations = provider.validate_user_changes(&req, UserType::Student).unwrap_err();
        assert_eq!(fields(&violations), vec!["userType"]);

        let same = UpdateUserRequest {
            user_type: Some("student".to_string()),
            ..Default::default()
        };
        assert!(provider.validate_user_changes(&same, UserType::Student).is_ok());
    }

    #[test]
    fn test_update_rejects_details_of_another_role() {
        let provider = ValidationProvider::new();
        let req = UpdateUserRequest {
            teacher_details: Some(StaffDetailsInput::default()),
            ..Default::default()
        };

        let violations = provider.validate_user_changes(&req, UserType::Student).unwrap_err();

        assert_eq!(fields(&violations), vec!["teacherDetails"]);
    }

    #[test]
    fn test_section_code_format() {
        assert!(section_code("2024-01").is_ok());
        assert!(section_code("2024-1").is_err());
        assert!(section_code("20a4-01").is_err());
        assert!(section_code("202401").is_err());
        assert!(section_code("2024-011").is_err());
    }

    #[test]
    fn test_new_section_requires_active_flag() {
        let provider = ValidationProvider::new();
        let req = CreateSectionRequest {
            section_code: Some("2024-01".to_string()),
            grade_level: Some("10-11-12".to_string()),
            is_active: None,
        };

        let violations = provider.validate_new_section(&req).unwrap_err();

        assert_eq!(fields(&violations), vec!["isActive"]);
    }

    #[test]
    fn test_strict_date_rejects_impossible_days() {
        assert!(strict_date("2024-02-29").is_ok());
        assert!(strict_date("2023-02-29").is_err());
        assert!(strict_date("2023/02/01").is_err());
    }

    #[test]
    fn test_anthro_measurements_must_be_positive() {
        let provider = ValidationProvider::new();
        let req = CreateAnthroRequest {
            teacher_user_id: Some(1),
            student_user_id: Some(2),
            date_recorded: Some("2025-01-10".to_string()),
            height: Some(0.0),
            weight: Some(-3.5),
        };

        let violations = provider.validate_new_anthro(&req).unwrap_err();

        assert_eq!(fields(&violations), vec!["height", "weight"]);
    }

    #[test]
    fn test_performance_type_name_and_unit() {
        let provider = ValidationProvider::new();

        let valid = provider
            .validate_new_performance_type(&CreatePerformanceTypeRequest {
                name: Some("  Mile run ".to_string()),
                unit: Some("  ".to_string()),
            })
            .unwrap();
        assert_eq!(valid.name, "Mile run");
        assert_eq!(valid.unit, None);

        let violations = provider
            .validate_new_performance_type(&CreatePerformanceTypeRequest {
                name: Some("x".to_string()),
                unit: Some("u".repeat(33)),
            })
            .unwrap_err();
        assert_eq!(fields(&violations), vec!["name", "unit"]);
    }

    #[test]
    fn test_empty_unit_clears_it_on_update() {
        let provider = ValidationProvider::new();
        let changes = provider
            .validate_performance_type_changes(&UpdatePerformanceTypeRequest {
                name: None,
                unit: Some(String::new()),
            })
            .unwrap();

        assert_eq!(changes.name, None);
        assert_eq!(changes.unit, Some(None));
    }

    #[test]
    fn test_assignment_date_is_optional_but_strict() {
        let provider = ValidationProvider::new();
        let mut req = AssignPerformanceTestRequest {
            performance_type_id: Some(1),
            teacher_user_id: Some(2),
            student_user_id: Some(3),
            date_assigned: None,
        };
        assert_eq!(provider.validate_new_assignment(&req).unwrap().date_assigned, None);

        req.date_assigned = Some("2025-13-01".to_string());
        let violations = provider.validate_new_assignment(&req).unwrap_err();
        assert_eq!(fields(&violations), vec!["dateAssigned"]);
    }

    #[test]
    fn test_performance_grade_rules() {
        let provider = ValidationProvider::new();
        let req = CreatePerformanceGradeRequest {
            performance_type_id: None,
            teacher_user_id: Some(2),
            student_user_id: Some(3),
            date_taken: Some("2025-02-30".to_string()),
            grade: Some(-1.0),
        };
        let violations = provider.validate_new_performance_grade(&req).unwrap_err();
        assert_eq!(fields(&violations), vec!["performanceTypeId", "dateTaken", "grade"]);

        let zero = CreatePerformanceGradeRequest {
            performance_type_id: Some(1),
            date_taken: Some("2025-02-28".to_string()),
            grade: Some(0.0),
            ..req
        };
        assert_eq!(provider.validate_new_performance_grade(&zero).unwrap().grade, 0.0);
    }

    #[test]
    fn test_transfer_between_same_section_is_invalid() {
        let provider = ValidationProvider::new();
        let req = TransferStudentsRequest {
            from_section_id: 3,
            to_section_id: 3,
            student_user_ids: vec![],
        };

        let violations = provider.validate_transfer(&req).unwrap_err();

        assert_eq!(fields(&violations), vec!["studentUserIds", "toSectionId"]);
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@@b.co"));
        assert!(!is_valid_email("a b@c.co"));
    }
}
