//! Fake user generation and batched inserts.
//!
//! Every seeded address ends in `@example.com`; `clear_users` relies on that.

use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use rayon::prelude::*;
use schoolhub_models::{Department, Gender, UserRole};
use sqlx::types::chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;
use uuid::Uuid;

use super::models::{SeedConfig, UserSeed};

pub const SEED_EMAIL_DOMAIN: &str = "example.com";

// 13 bind parameters per row keeps a chunk well under the 65535 limit.
const BATCH_SIZE: usize = 1000;

const DEPARTMENTS: [Department; 3] = [
    Department::Science,
    Department::Humanities,
    Department::Languages,
];

fn slug(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

fn gender_for(idx: usize) -> Gender {
    if idx % 2 == 0 { Gender::Female } else { Gender::Male }
}

/// Builds one fake user. `batch` keeps reruns from colliding on the unique
/// e-mail, admission and employee numbers.
fn generate_user(role: UserRole, idx: usize, batch: &str, password_hash: &str) -> UserSeed {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();

    let email = format!(
        "{}.{}+{}{}{}@{}",
        slug(&first_name),
        slug(&last_name),
        role.as_str(),
        batch,
        idx,
        SEED_EMAIL_DOMAIN
    );

    let is_student = role == UserRole::Student;
    let department = match role {
        UserRole::Teacher | UserRole::Student => Some(DEPARTMENTS[idx % DEPARTMENTS.len()]),
        _ => None,
    };

    UserSeed {
        first_name,
        last_name,
        email,
        password_hash: password_hash.to_string(),
        gender: gender_for(idx),
        phone: format!("+2547{:08}", idx % 100_000_000),
        role,
        department,
        grade_level: is_student.then(|| (idx % 4 + 1) as i16),
        admission_number: is_student.then(|| format!("ADM-{}-{:05}", batch, idx)),
        employee_number: role
            .is_staff()
            .then(|| format!("EMP-{}-{:04}", batch, idx)),
    }
}

fn generate_role(role: UserRole, count: usize, batch: &str, password_hash: &str) -> Vec<UserSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| generate_user(role, idx, batch, password_hash))
        .collect()
}

/// Generates every user described by `config`, staff first.
pub fn generate_users(config: &SeedConfig, batch: &str, password_hash: &str) -> Vec<UserSeed> {
    let plan = [
        (UserRole::Teacher, config.staff.teachers),
        (UserRole::Librarian, config.staff.librarians),
        (UserRole::Bursar, config.staff.bursars),
        (UserRole::Parent, config.parents),
        (UserRole::Student, config.students),
    ];

    plan.par_iter()
        .flat_map(|&(role, count)| generate_role(role, count, batch, password_hash))
        .collect()
}

/// A short random tag unique to one seeding run.
pub fn new_batch_tag() -> String {
    Uuid::new_v4().simple().to_string()[..6].to_string()
}

pub async fn seed_users(
    db: &PgPool,
    config: &SeedConfig,
    password_hash: &str,
) -> anyhow::Result<Vec<Uuid>> {
    let start_time = Instant::now();
    println!(
        "👥 Seeding {} users ({} staff, {} parents, {} students)...",
        config.total_users(),
        config.staff.total(),
        config.parents,
        config.students
    );

    let batch = new_batch_tag();
    let users = generate_users(config, &batch, password_hash);
    let ids = insert_users_batch(db, &users).await?;

    println!(
        "   ✓ Inserted {} users in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

/// Inserts users in one transaction, chunked into multi-row statements.
pub async fn insert_users_batch(db: &PgPool, users: &[UserSeed]) -> anyhow::Result<Vec<Uuid>> {
    let mut tx = db.begin().await?;
    let mut ids = Vec::with_capacity(users.len());

    for chunk in users.chunks(BATCH_SIZE) {
        ids.extend(insert_users_chunk(&mut tx, chunk).await?);
    }

    tx.commit().await?;
    Ok(ids)
}

async fn insert_users_chunk(
    tx: &mut Transaction<'_, Postgres>,
    users: &[UserSeed],
) -> anyhow::Result<Vec<Uuid>> {
    if users.is_empty() {
        return Ok(Vec::new());
    }

    const COLUMNS: usize = 13;
    let mut query = String::from(
        "INSERT INTO users (first_name, last_name, email, password_hash, gender, phone, role, \
         department, grade_level, admission_number, employee_number, admission_date, hire_date) VALUES ",
    );

    for i in 0..users.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let placeholders = (1..=COLUMNS)
            .map(|col| format!("${}", i * COLUMNS + col))
            .collect::<Vec<_>>()
            .join(", ");
        query.push('(');
        query.push_str(&placeholders);
        query.push(')');
    }

    query.push_str(" RETURNING id");

    let today = Utc::now().date_naive();
    let mut q = sqlx::query_scalar::<_, Uuid>(&query);
    for user in users {
        let admission_date = user.admission_number.as_ref().map(|_| today);
        let hire_date = user.employee_number.as_ref().map(|_| today);

        q = q
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.gender)
            .bind(&user.phone)
            .bind(user.role)
            .bind(user.department)
            .bind(user.grade_level)
            .bind(&user.admission_number)
            .bind(&user.employee_number)
            .bind(admission_date)
            .bind(hire_date);
    }

    Ok(q.fetch_all(&mut **tx).await?)
}

/// Deletes seeded users. Headmaster and manager accounts are kept even when
/// they use the seed domain.
pub async fn clear_users(db: &PgPool) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded users...");

    let deleted = sqlx::query(
        "DELETE FROM users \
         WHERE email LIKE ('%@' || $1) \
           AND role NOT IN ('headmaster', 'manager')",
    )
    .bind(SEED_EMAIL_DOMAIN)
    .execute(db)
    .await?
    .rows_affected();

    println!(
        "   ✓ Deleted {} users in {:?}",
        deleted,
        start_time.elapsed()
    );

    Ok(deleted)
}
