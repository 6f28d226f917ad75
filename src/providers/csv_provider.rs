use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::errors::internal::{CsvError, FieldViolation, RowViolation};
use crate::providers::validation_provider::ValidationProvider;
use crate::types::dto::section::CreateSectionRequest;
use crate::types::dto::user::{RegisterUserRequest, StaffDetailsInput, StudentDetailsInput};
use crate::types::internal::roster::CsvRosterRow;
use crate::types::internal::section::NewSection;
use crate::types::internal::user::NewUser;

/// Maps one deserialized CSV row into a validated value
pub trait CsvRowHandler {
    type Row: DeserializeOwned;
    type Output;

    /// Header names that must be present
    fn required_columns(&self) -> &'static [&'static str];

    fn map_row(&self, line: u64, row: Self::Row) -> Result<Self::Output, Vec<FieldViolation>>;
}

/// Rows that mapped cleanly plus per-line rejections
#[derive(Debug)]
pub struct CsvParse<T> {
    pub rows: Vec<T>,
    pub rejected: Vec<RowViolation>,
}

pub struct CsvProvider;

impl CsvProvider {
    pub fn new() -> Self {
        Self
    }

    /// Parse an uploaded file with a header row
    ///
    /// Structural problems fail the whole file; bad data lines are collected.
    pub fn parse<H: CsvRowHandler>(&self, content: &[u8], handler: &H) -> Result<CsvParse<H::Output>, CsvError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(content);

        let headers = reader
            .headers()
            .map_err(|e| CsvError::Unreadable { message: e.to_string() })?
            .clone();

        if headers.iter().all(str::is_empty) {
            return Err(CsvError::Empty);
        }

        let missing: Vec<String> = handler
            .required_columns()
            .iter()
            .filter(|column| !headers.iter().any(|h| h == **column))
            .map(|column| column.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(CsvError::MissingColumns { columns: missing });
        }

        let mut parsed = CsvParse {
            rows: Vec::new(),
            rejected: Vec::new(),
        };

        for result in reader.records() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    if matches!(e.kind(), csv::ErrorKind::Utf8 { .. }) {
                        return Err(CsvError::Unreadable { message: e.to_string() });
                    }
                    let line = e.position().map(|p| p.line()).unwrap_or_default();
                    parsed.rejected.push(RowViolation {
                        line,
                        violations: vec![FieldViolation::new("row", e.to_string())],
                    });
                    continue;
                }
            };

            if is_blank(&record) {
                continue;
            }

            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let mapped = record
                .deserialize::<H::Row>(Some(&headers))
                .map_err(|e| vec![FieldViolation::new("row", e.to_string())])
                .and_then(|row| handler.map_row(line, row));

            match mapped {
                Ok(output) => parsed.rows.push(output),
                Err(violations) => parsed.rejected.push(RowViolation { line, violations }),
            }
        }

        if parsed.rows.is_empty() && parsed.rejected.is_empty() {
            return Err(CsvError::Empty);
        }

        tracing::debug!(
            accepted = parsed.rows.len(),
            rejected = parsed.rejected.len(),
            "Parsed CSV upload"
        );

        Ok(parsed)
    }
}

impl Default for CsvProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(str::is_empty)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionCsvRow {
    #[serde(default)]
    pub section_code: Option<String>,
    #[serde(default)]
    pub grade_level: Option<String>,
    #[serde(default)]
    pub is_active: Option<String>,
}

/// `sectionCode,gradeLevel,isActive`
pub struct SectionCsvHandler {
    validator: ValidationProvider,
}

impl SectionCsvHandler {
    pub fn new() -> Self {
        Self {
            validator: ValidationProvider::new(),
        }
    }
}

impl Default for SectionCsvHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvRowHandler for SectionCsvHandler {
    type Row = SectionCsvRow;
    type Output = NewSection;

    fn required_columns(&self) -> &'static [&'static str] {
        &["sectionCode", "gradeLevel", "isActive"]
    }

    fn map_row(&self, _line: u64, row: SectionCsvRow) -> Result<NewSection, Vec<FieldViolation>> {
        let mut violations = Vec::new();
        let is_active = match row.is_active.as_deref().map(parse_bool) {
            Some(Ok(value)) => Some(value),
            Some(Err(message)) => {
                violations.push(FieldViolation::new("isActive", message));
                return Err(violations);
            }
            None => None,
        };

        let request = CreateSectionRequest {
            section_code: row.section_code,
            grade_level: row.grade_level,
            is_active,
        };
        self.validator.validate_new_section(&request)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCsvRow {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub gender_identity: Option<String>,
    #[serde(default)]
    pub pronouns: Option<String>,
    #[serde(default)]
    pub user_type: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub grad_year: Option<String>,
    #[serde(default)]
    pub years_exp: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

/// `email,password,firstName,lastName,birthDate,userType` plus optional profile and detail columns
pub struct UserCsvHandler {
    validator: ValidationProvider,
}

impl UserCsvHandler {
    pub fn new() -> Self {
        Self {
            validator: ValidationProvider::new(),
        }
    }
}

impl Default for UserCsvHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvRowHandler for UserCsvHandler {
    type Row = UserCsvRow;
    type Output = NewUser;

    fn required_columns(&self) -> &'static [&'static str] {
        &["email", "password", "firstName", "lastName", "birthDate", "userType"]
    }

    fn map_row(&self, _line: u64, row: UserCsvRow) -> Result<NewUser, Vec<FieldViolation>> {
        let mut violations = Vec::new();
        let grad_year = parse_int(&mut violations, "gradYear", row.grad_year.as_deref());
        let years_exp = parse_int(&mut violations, "yearsExp", row.years_exp.as_deref());
        if !violations.is_empty() {
            return Err(violations);
        }

        let staff = StaffDetailsInput {
            years_exp,
            bio: row.bio,
        };
        let request = RegisterUserRequest {
            email: row.email,
            password: row.password,
            first_name: row.first_name,
            last_name: row.last_name,
            birth_date: row.birth_date,
            gender_identity: row.gender_identity,
            pronouns: row.pronouns,
            user_type: row.user_type,
            photo_url: row.photo_url,
            student_details: Some(StudentDetailsInput { grad_year }),
            teacher_details: Some(staff.clone()),
            admin_details: Some(staff),
        };
        self.validator.validate_new_user(&request)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterCsvRow {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub section_code: Option<String>,
}

/// `email,sectionCode`; blank cells are screened by the roster orchestrator
pub struct RosterCsvHandler;

impl CsvRowHandler for RosterCsvHandler {
    type Row = RosterCsvRow;
    type Output = CsvRosterRow;

    fn required_columns(&self) -> &'static [&'static str] {
        &["email", "sectionCode"]
    }

    fn map_row(&self, line: u64, row: RosterCsvRow) -> Result<CsvRosterRow, Vec<FieldViolation>> {
        Ok(CsvRosterRow {
            line,
            email: row.email.unwrap_or_default(),
            section_code: row.section_code.unwrap_or_default(),
        })
    }
}

fn parse_bool(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err("Active flag must be true or false".to_string()),
    }
}

fn parse_int(violations: &mut Vec<FieldViolation>, field: &str, value: Option<&str>) -> Option<i32> {
    let value = value?;
    match value.parse::<i32>() {
        Ok(number) => Some(number),
        Err(_) => {
            violations.push(FieldViolation::new(field, "Must be a whole number"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::db::section::GradeLevel;
    use crate::types::internal::user::RoleDetails;

    #[test]
    fn test_roster_rows_keep_line_numbers_and_blank_cells() {
        let csv = "email,sectionCode\nana@school.edu,2024-01\n,2024-01\n";

        let parsed = CsvProvider::new().parse(csv.as_bytes(), &RosterCsvHandler).unwrap();

        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[0].line, 2);
        assert_eq!(parsed.rows[1].line, 3);
        assert_eq!(parsed.rows[1].email, "");
        assert!(parsed.rejected.is_empty());
    }

    #[test]
    fn test_cells_are_trimmed_and_short_rows_tolerated() {
        let csv = "email , sectionCode\n  ana@school.edu  \n";

        let parsed = CsvProvider::new().parse(csv.as_bytes(), &RosterCsvHandler).unwrap();

        assert_eq!(parsed.rows[0].email, "ana@school.edu");
        assert_eq!(parsed.rows[0].section_code, "");
    }

    #[test]
    fn test_missing_columns_fail_the_file() {
        let csv = "mail,section\nana@school.edu,2024-01\n";

        let result = CsvProvider::new().parse(csv.as_bytes(), &RosterCsvHandler);

        match result {
            Err(CsvError::MissingColumns { columns }) => assert_eq!(columns, vec!["email", "sectionCode"]),
            other => panic!("expected missing columns, got {:?}", other.map(|p| p.rows.len())),
        }
    }

    #[test]
    fn test_empty_file_and_header_only_file_are_empty() {
        let provider = CsvProvider::new();

        assert!(matches!(provider.parse(b"", &RosterCsvHandler), Err(CsvError::Empty)));
        assert!(matches!(
            provider.parse(b"email,sectionCode\n", &RosterCsvHandler),
            Err(CsvError::Empty)
        ));
    }

    #[test]
    fn test_invalid_utf8_is_unreadable() {
        let content = b"email,sectionCode\n\xff\xfe,2024-01\n";

        let result = CsvProvider::new().parse(content, &RosterCsvHandler);

        assert!(matches!(result, Err(CsvError::Unreadable { .. })));
    }

    #[test]
    fn test_section_rows_are_validated_per_line() {
        let csv = "sectionCode,gradeLevel,isActive\n2024-01,8,true\n2024-1,13,maybe\n2024-02,10-11-12,\n";

        let parsed = CsvProvider::new().parse(csv.as_bytes(), &SectionCsvHandler::new()).unwrap();

        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0].grade_level, GradeLevel::Grade8);
        let lines: Vec<u64> = parsed.rejected.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![3, 4]);
        assert_eq!(parsed.rejected[1].violations[0].field, "isActive");
    }

    #[test]
    fn test_user_rows_build_role_details() {
        let csv = "email,password,firstName,lastName,birthDate,userType,gradYear,yearsExp,bio\n\
                   kid@school.edu,pass1234,Kid,Doe,2012-01-05,student,2030,,\n\
                   prof@school.edu,pass1234,Pat,Roe,1980-06-30,teacher,,7,Math\n\
                   bad@school.edu,pass1234,Bad,Row,1980-06-30,teacher,,seven,\n";

        let parsed = CsvProvider::new().parse(csv.as_bytes(), &UserCsvHandler::new()).unwrap();

        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[0].details, RoleDetails::Student { grad_year: 2030 });
        match &parsed.rows[1].details {
            RoleDetails::Teacher(staff) => {
                assert_eq!(staff.years_exp, Some(7));
                assert_eq!(staff.bio.as_deref(), Some("Math"));
            }
            other => panic!("expected teacher details, got {:?}", other),
        }
        assert_eq!(parsed.rejected.len(), 1);
        assert_eq!(parsed.rejected[0].line, 4);
        assert_eq!(parsed.rejected[0].violations[0].field, "yearsExp");
    }
}
