pub mod category;
pub mod course;
pub mod enrollment;
pub mod professor;
pub mod student;

/// What a delete touched besides the row itself
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Rows removed from the target table
    pub rows_deleted: u64,
    /// Courses whose foreign key was cleared
    pub courses_detached: u64,
    /// Enrollments removed along with their student or course
    pub enrollments_removed: u64,
}

impl DeleteOutcome {
    /// Total number of rows changed by the delete
    pub fn affected_count(&self) -> u64 {
        self.rows_deleted + self.courses_detached + self.enrollments_removed
    }
}
