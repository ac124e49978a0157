//! PostgreSQL store.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::instrument;

use coursebook_models::{Course, Credentials, NewStudent, Student, StudentChanges};

use crate::store::{CourseStore, EnrollmentOutcome, StudentStore};

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

#[derive(FromRow)]
struct StudentRow {
    id: i32,
    username: String,
    email: Option<String>,
}

#[derive(FromRow)]
struct EnrolledCourseRow {
    student_id: i32,
    id: i32,
    course_name: String,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Attaches enrolled courses to student rows with a single query.
    async fn with_courses(&self, rows: Vec<StudentRow>) -> anyhow::Result<Vec<Student>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
        let enrolled = sqlx::query_as::<_, EnrolledCourseRow>(
            r#"SELECT sc.student_id, c.id, c.course_name
               FROM student_courses sc
               JOIN courses c ON c.id = sc.course_id
               WHERE sc.student_id = ANY($1)
               ORDER BY sc.enrolled_at, c.id"#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut courses_by_student: HashMap<i32, Vec<Course>> = HashMap::new();
        for row in enrolled {
            courses_by_student
                .entry(row.student_id)
                .or_default()
                .push(Course {
                    id: row.id,
                    course_name: row.course_name,
                });
        }

        Ok(rows
            .into_iter()
            .map(|row| Student {
                enrolled_courses: courses_by_student.remove(&row.id).unwrap_or_default(),
                id: row.id,
                username: row.username,
                email: row.email,
            })
            .collect())
    }

    async fn with_courses_one(&self, row: Option<StudentRow>) -> anyhow::Result<Option<Student>> {
        match row {
            Some(row) => Ok(self.with_courses(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl StudentStore for PgStore {
    #[instrument(skip(self))]
    async fn list_students(&self) -> anyhow::Result<Vec<Student>> {
        let rows =
            sqlx::query_as::<_, StudentRow>("SELECT id, username, email FROM students ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        self.with_courses(rows).await
    }

    #[instrument(skip(self))]
    async fn find_student(&self, id: i32) -> anyhow::Result<Option<Student>> {
        let row =
            sqlx::query_as::<_, StudentRow>("SELECT id, username, email FROM students WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        self.with_courses_one(row).await
    }

    #[instrument(skip(self))]
    async fn find_credentials(&self, username: &str) -> anyhow::Result<Option<Credentials>> {
        let credentials = sqlx::query_as::<_, Credentials>(
            "SELECT id, username, password FROM students WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credentials)
    }

    #[instrument(skip(self, student), fields(username = %student.username))]
    async fn insert_student(&self, student: NewStudent) -> anyhow::Result<Option<Student>> {
        let row = sqlx::query_as::<_, StudentRow>(
            r#"INSERT INTO students (username, password, email)
               VALUES ($1, $2, $3)
               ON CONFLICT (username) DO NOTHING
               RETURNING id, username, email"#,
        )
        .bind(&student.username)
        .bind(&student.password_hash)
        .bind(&student.email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| Student {
            id: row.id,
            username: row.username,
            email: row.email,
            enrolled_courses: Vec::new(),
        }))
    }

    #[instrument(skip(self, changes))]
    async fn update_student(
        &self,
        id: i32,
        changes: StudentChanges,
    ) -> anyhow::Result<Option<Student>> {
        let row = sqlx::query_as::<_, StudentRow>(
            r#"UPDATE students
               SET email = COALESCE($2, email),
                   password = COALESCE($3, password),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING id, username, email"#,
        )
        .bind(id)
        .bind(&changes.email)
        .bind(&changes.password_hash)
        .fetch_optional(&self.pool)
        .await?;

        self.with_courses_one(row).await
    }

    #[instrument(skip(self))]
    async fn delete_student(&self, id: i32) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn enroll(&self, student_id: i32, course_id: i32) -> anyhow::Result<EnrollmentOutcome> {
        let result = sqlx::query(
            r#"INSERT INTO student_courses (student_id, course_id)
               VALUES ($1, $2)
               ON CONFLICT (student_id, course_id) DO NOTHING"#,
        )
        .bind(student_id)
        .bind(course_id)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => Ok(EnrollmentOutcome::AlreadyEnrolled),
            Ok(_) => Ok(EnrollmentOutcome::Enrolled),
            // A missing student is reported ahead of a missing course.
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                let student_exists = sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS (SELECT 1 FROM students WHERE id = $1)",
                )
                .bind(student_id)
                .fetch_one(&self.pool)
                .await?;

                if student_exists {
                    Ok(EnrollmentOutcome::CourseNotFound)
                } else {
                    Ok(EnrollmentOutcome::StudentNotFound)
                }
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl CourseStore for PgStore {
    #[instrument(skip(self))]
    async fn list_courses(&self) -> anyhow::Result<Vec<Course>> {
        let courses =
            sqlx::query_as::<_, Course>("SELECT id, course_name FROM courses ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(courses)
    }

    #[instrument(skip(self))]
    async fn find_course(&self, id: i32) -> anyhow::Result<Option<Course>> {
        let course =
            sqlx::query_as::<_, Course>("SELECT id, course_name FROM courses WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(course)
    }

    #[instrument(skip(self))]
    async fn insert_course(&self, course_name: &str) -> anyhow::Result<Course> {
        let course = sqlx::query_as::<_, Course>(
            "INSERT INTO courses (course_name) VALUES ($1) RETURNING id, course_name",
        )
        .bind(course_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(course)
    }

    #[instrument(skip(self))]
    async fn update_course(&self, id: i32, course_name: &str) -> anyhow::Result<Option<Course>> {
        let course = sqlx::query_as::<_, Course>(
            r#"UPDATE courses
               SET course_name = $2, updated_at = NOW()
               WHERE id = $1
               RETURNING id, course_name"#,
        )
        .bind(id)
        .bind(course_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(course)
    }

    #[instrument(skip(self))]
    async fn delete_course(&self, id: i32) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_student(username: &str) -> NewStudent {
        NewStudent {
            username: username.to_string(),
            password_hash: format!("hash-of-{}", username),
            email: Some(format!("{}@example.com", username)),
        }
    }

    async fn count_links(pool: &PgPool) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM student_courses")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_insert_and_find_student(pool: PgPool) {
        let store = PgStore::new(pool);

        let alice = store.insert_student(new_student("alice")).await.unwrap().unwrap();
        assert_eq!(alice.username, "alice");
        assert_eq!(alice.email.as_deref(), Some("alice@example.com"));
        assert!(alice.enrolled_courses.is_empty());

        let found = store.find_student(alice.id).await.unwrap().unwrap();
        assert_eq!(found, alice);

        let credentials = store.find_credentials("alice").await.unwrap().unwrap();
        assert_eq!(credentials.id, alice.id);
        assert_eq!(credentials.password_hash, "hash-of-alice");

        assert!(store.find_student(alice.id + 1000).await.unwrap().is_none());
        assert!(store.find_credentials("bob").await.unwrap().is_none());
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_duplicate_username_is_not_inserted(pool: PgPool) {
        let store = PgStore::new(pool);

        store.insert_student(new_student("alice")).await.unwrap();
        let duplicate = store.insert_student(new_student("alice")).await.unwrap();

        assert!(duplicate.is_none());
        assert_eq!(store.list_students().await.unwrap().len(), 1);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_update_only_touches_given_fields(pool: PgPool) {
        let store = PgStore::new(pool);
        let alice = store.insert_student(new_student("alice")).await.unwrap().unwrap();

        let updated = store
            .update_student(
                alice.id,
                StudentChanges {
                    email: None,
                    password_hash: Some("new-hash".to_string()),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.email.as_deref(), Some("alice@example.com"));
        let credentials = store.find_credentials("alice").await.unwrap().unwrap();
        assert_eq!(credentials.password_hash, "new-hash");

        let updated = store
            .update_student(
                alice.id,
                StudentChanges {
                    email: Some("new@example.com".to_string()),
                    password_hash: None,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.email.as_deref(), Some("new@example.com"));
        let credentials = store.find_credentials("alice").await.unwrap().unwrap();
        assert_eq!(credentials.password_hash, "new-hash");

        let missing = store
            .update_student(alice.id + 1000, StudentChanges::default())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_enroll_is_idempotent(pool: PgPool) {
        let store = PgStore::new(pool.clone());
        let alice = store.insert_student(new_student("alice")).await.unwrap().unwrap();
        let course = store.insert_course("Algebra").await.unwrap();

        assert_eq!(
            store.enroll(alice.id, course.id).await.unwrap(),
            EnrollmentOutcome::Enrolled
        );
        assert_eq!(
            store.enroll(alice.id, course.id).await.unwrap(),
            EnrollmentOutcome::AlreadyEnrolled
        );
        assert_eq!(count_links(&pool).await, 1);

        let alice = store.find_student(alice.id).await.unwrap().unwrap();
        assert_eq!(alice.enrolled_courses, vec![course]);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_enroll_maps_foreign_key_violations(pool: PgPool) {
        let store = PgStore::new(pool.clone());
        let alice = store.insert_student(new_student("alice")).await.unwrap().unwrap();
        let course = store.insert_course("Algebra").await.unwrap();

        assert_eq!(
            store.enroll(alice.id, course.id + 1000).await.unwrap(),
            EnrollmentOutcome::CourseNotFound
        );
        assert_eq!(
            store.enroll(alice.id + 1000, course.id).await.unwrap(),
            EnrollmentOutcome::StudentNotFound
        );
        assert_eq!(
            store.enroll(alice.id + 1000, course.id + 1000).await.unwrap(),
            EnrollmentOutcome::StudentNotFound
        );
        assert_eq!(count_links(&pool).await, 0);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_list_students_attaches_courses(pool: PgPool) {
        let store = PgStore::new(pool);
        let alice = store.insert_student(new_student("alice")).await.unwrap().unwrap();
        let bob = store.insert_student(new_student("bob")).await.unwrap().unwrap();
        let algebra = store.insert_course("Algebra").await.unwrap();
        let biology = store.insert_course("Biology").await.unwrap();
        store.enroll(alice.id, algebra.id).await.unwrap();
        store.enroll(alice.id, biology.id).await.unwrap();

        let students = store.list_students().await.unwrap();

        assert_eq!(students.len(), 2);
        assert_eq!(students[0].id, alice.id);
        assert_eq!(students[0].enrolled_courses.len(), 2);
        assert_eq!(students[1].id, bob.id);
        assert!(students[1].enrolled_courses.is_empty());
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_course_crud(pool: PgPool) {
        let store = PgStore::new(pool);
        let course = store.insert_course("Algebra").await.unwrap();

        assert_eq!(store.list_courses().await.unwrap(), vec![course.clone()]);
        assert_eq!(store.find_course(course.id).await.unwrap(), Some(course.clone()));

        let renamed = store
            .update_course(course.id, "Linear Algebra")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(renamed.course_name, "Linear Algebra");
        assert!(
            store
                .update_course(course.id + 1000, "Nothing")
                .await
                .unwrap()
                .is_none()
        );

        assert!(store.delete_course(course.id).await.unwrap());
        assert!(!store.delete_course(course.id).await.unwrap());
        assert!(store.find_course(course.id).await.unwrap().is_none());
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_delete_course_cascades_to_links(pool: PgPool) {
        let store = PgStore::new(pool.clone());
        let alice = store.insert_student(new_student("alice")).await.unwrap().unwrap();
        let course = store.insert_course("Algebra").await.unwrap();
        store.enroll(alice.id, course.id).await.unwrap();

        assert!(store.delete_course(course.id).await.unwrap());

        assert_eq!(count_links(&pool).await, 0);
        let alice = store.find_student(alice.id).await.unwrap().unwrap();
        assert!(alice.enrolled_courses.is_empty());
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_delete_student_cascades_to_links(pool: PgPool) {
        let store = PgStore::new(pool.clone());
        let alice = store.insert_student(new_student("alice")).await.unwrap().unwrap();
        let course = store.insert_course("Algebra").await.unwrap();
        store.enroll(alice.id, course.id).await.unwrap();

        assert!(store.delete_student(alice.id).await.unwrap());
        assert!(!store.delete_student(alice.id).await.unwrap());

        assert_eq!(count_links(&pool).await, 0);
        assert_eq!(store.find_course(course.id).await.unwrap(), Some(course));
    }
}
