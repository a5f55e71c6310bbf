//! Seeding configuration and generated rows.

use schoolhub_models::{Department, Gender, UserRole};

/// Seed data for one user row.
#[derive(Debug, Clone)]
pub struct UserSeed {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub gender: Gender,
    pub phone: String,
    pub role: UserRole,
    pub department: Option<Department>,
    pub grade_level: Option<i16>,
    pub admission_number: Option<String>,
    pub employee_number: Option<String>,
}

/// Number of staff accounts to create per role.
#[derive(Debug, Clone)]
pub struct StaffCounts {
    pub teachers: usize,
    pub librarians: usize,
    pub bursars: usize,
}

impl Default for StaffCounts {
    fn default() -> Self {
        Self {
            teachers: 12,
            librarians: 2,
            bursars: 2,
        }
    }
}

impl StaffCounts {
    pub fn total(&self) -> usize {
        self.teachers + self.librarians + self.bursars
    }
}

#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub staff: StaffCounts,
    pub parents: usize,
    pub students: usize,
    /// Plain-text password shared by every seeded account
    pub password: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            staff: StaffCounts::default(),
            parents: 40,
            students: 200,
            password: "Seeded!Pass1".to_string(),
        }
    }
}

impl SeedConfig {
    pub fn with_staff(mut self, staff: StaffCounts) -> Self {
        self.staff = staff;
        self
    }

    pub fn with_parents(mut self, parents: usize) -> Self {
        self.parents = parents;
        self
    }

    pub fn with_students(mut self, students: usize) -> Self {
        self.students = students;
        self
    }

    pub fn total_users(&self) -> usize {
        self.staff.total() + self.parents + self.students
    }
}
