use thiserror::Error;

#[derive(Error, Debug)]
pub enum FitnessError {
    #[error("Anthropometric record not found: {anthro_id}")]
    AnthroNotFound { anthro_id: i32 },

    #[error("Performance type not found: {performance_type_id}")]
    PerformanceTypeNotFound { performance_type_id: i32 },

    #[error("Performance type already exists: {name}")]
    DuplicatePerformanceType { name: String },

    #[error("Performance test assignment not found: {assignment_id}")]
    PerformanceTestNotFound { assignment_id: i32 },

    #[error("Performance type {performance_type_id} is already assigned to student {student_user_id}")]
    PerformanceTestAlreadyAssigned {
        performance_type_id: i32,
        student_user_id: i32,
    },

    #[error("Performance grade not found: {grade_id}")]
    PerformanceGradeNotFound { grade_id: i32 },
}
