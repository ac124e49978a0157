//! Student and course seeding.

use std::time::Instant;

use anyhow::{anyhow, bail};
use fake::Fake;
use fake::faker::company::en::Buzzword;
use fake::faker::internet::en::Username;
use rand::seq::SliceRandom;

use coursebook_core::hash_password;
use coursebook_db::{CourseStore, EnrollmentOutcome, StudentStore};
use coursebook_models::{NewStudent, Student};

/// Password shared by every seeded student.
pub const SEED_PASSWORD: &str = "password123";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedConfig {
    pub students: usize,
    pub courses: usize,
    /// Upper bound on courses linked to each student.
    pub enrollments_per_student: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            students: 20,
            courses: 8,
            enrollments_per_student: 3,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub students: usize,
    pub skipped_students: usize,
    pub courses: usize,
    pub enrollments: usize,
}

/// Generates students with unique usernames.
///
/// The index suffix keeps usernames distinct even when the faker repeats
/// itself.
pub fn generate_students(count: usize, password_hash: &str) -> Vec<NewStudent> {
    (0..count)
        .map(|idx| {
            let base: String = Username().fake();
            let username: String = format!("{}_{}", base.to_lowercase(), idx)
                .chars()
                .take(50)
                .collect();

            NewStudent {
                email: Some(format!("{}@example.com", username)),
                username,
                password_hash: password_hash.to_string(),
            }
        })
        .collect()
}

pub fn generate_course_names(count: usize) -> Vec<String> {
    (0..count)
        .map(|_| {
            let topic: String = Buzzword().fake();
            let level: u16 = (101u16..500).fake();
            let mut chars = topic.chars();
            let topic = match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => "General".to_string(),
            };
            format!("{} {}", topic, level)
        })
        .collect()
}

/// Creates one student, failing if the username is taken.
pub async fn create_student(
    students: &dyn StudentStore,
    username: &str,
    email: Option<String>,
    password: &str,
    bcrypt_cost: u32,
) -> anyhow::Result<Student> {
    if username.trim().is_empty() {
        bail!("Username must not be empty");
    }
    if password.is_empty() {
        bail!("Password must not be empty");
    }

    let password_hash = hash_password(password, bcrypt_cost).map_err(|e| e.error)?;

    students
        .insert_student(NewStudent {
            username: username.to_string(),
            password_hash,
            email,
        })
        .await?
        .ok_or_else(|| anyhow!("Username '{}' is already registered", username))
}

/// Seeds students and courses, then links each student to up to
/// `enrollments_per_student` distinct random courses.
pub async fn seed_all(
    students: &dyn StudentStore,
    courses: &dyn CourseStore,
    config: SeedConfig,
    bcrypt_cost: u32,
) -> anyhow::Result<SeedSummary> {
    let start_time = Instant::now();
    let mut summary = SeedSummary::default();

    println!("🎓 Seeding {} students...", config.students);
    let password_hash = hash_password(SEED_PASSWORD, bcrypt_cost).map_err(|e| e.error)?;

    let mut student_ids = Vec::with_capacity(config.students);
    for student in generate_students(config.students, &password_hash) {
        match students.insert_student(student).await? {
            Some(inserted) => student_ids.push(inserted.id),
            None => summary.skipped_students += 1,
        }
    }
    summary.students = student_ids.len();
    println!(
        "   ✓ Inserted {} students ({} skipped)",
        summary.students, summary.skipped_students
    );

    println!("📚 Seeding {} courses...", config.courses);
    let mut course_ids = Vec::with_capacity(config.courses);
    for name in generate_course_names(config.courses) {
        course_ids.push(courses.insert_course(&name).await?.id);
    }
    summary.courses = course_ids.len();
    println!("   ✓ Inserted {} courses", summary.courses);

    println!("🔗 Linking students to courses...");
    let per_student = config.enrollments_per_student.min(course_ids.len());
    for student_id in &student_ids {
        let picks: Vec<i32> = {
            let mut rng = rand::thread_rng();
            course_ids
                .choose_multiple(&mut rng, per_student)
                .copied()
                .collect()
        };
        for course_id in picks {
            if students.enroll(*student_id, course_id).await? == EnrollmentOutcome::Enrolled {
                summary.enrollments += 1;
            }
        }
    }
    println!("   ✓ Created {} enrollments", summary.enrollments);

    println!("✅ Seeding finished in {:?}", start_time.elapsed());
    Ok(summary)
}
