//! In-memory store.
//!
//! Holds students, courses and their links behind one `RwLock` so an
//! enrollment sees a consistent view of both sides. Ids are assigned from
//! per-table counters starting at 1 and are never reused.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use coursebook_models::{Course, Credentials, NewStudent, Student, StudentChanges};

use crate::store::{CourseStore, EnrollmentOutcome, StudentStore};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<MemoryData>>,
}

#[derive(Debug, Default)]
struct MemoryData {
    students: BTreeMap<i32, StoredStudent>,
    courses: BTreeMap<i32, Course>,
    last_student_id: i32,
    last_course_id: i32,
}

#[derive(Debug, Clone)]
struct StoredStudent {
    id: i32,
    username: String,
    email: Option<String>,
    password_hash: String,
    course_ids: Vec<i32>,
}

impl MemoryData {
    fn view(&self, stored: &StoredStudent) -> Student {
        Student {
            id: stored.id,
            username: stored.username.clone(),
            email: stored.email.clone(),
            enrolled_courses: stored
                .course_ids
                .iter()
                .filter_map(|id| self.courses.get(id).cloned())
                .collect(),
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentStore for MemoryStore {
    async fn list_students(&self) -> anyhow::Result<Vec<Student>> {
        let data = self.inner.read().await;
        Ok(data.students.values().map(|s| data.view(s)).collect())
    }

    async fn find_student(&self, id: i32) -> anyhow::Result<Option<Student>> {
        let data = self.inner.read().await;
        Ok(data.students.get(&id).map(|s| data.view(s)))
    }

    async fn find_credentials(&self, username: &str) -> anyhow::Result<Option<Credentials>> {
        let data = self.inner.read().await;
        Ok(data
            .students
            .values()
            .find(|s| s.username == username)
            .map(|s| Credentials {
                id: s.id,
                username: s.username.clone(),
                password_hash: s.password_hash.clone(),
            }))
    }

    async fn insert_student(&self, student: NewStudent) -> anyhow::Result<Option<Student>> {
        let mut data = self.inner.write().await;
        if data.students.values().any(|s| s.username == student.username) {
            return Ok(None);
        }

        data.last_student_id += 1;
        let stored = StoredStudent {
            id: data.last_student_id,
            username: student.username,
            email: student.email,
            password_hash: student.password_hash,
            course_ids: Vec::new(),
        };
        let view = data.view(&stored);
        data.students.insert(stored.id, stored);

        Ok(Some(view))
    }

    async fn update_student(
        &self,
        id: i32,
        changes: StudentChanges,
    ) -> anyhow::Result<Option<Student>> {
        let mut data = self.inner.write().await;
        let Some(stored) = data.students.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(email) = changes.email {
            stored.email = Some(email);
        }
        if let Some(password_hash) = changes.password_hash {
            stored.password_hash = password_hash;
        }

        let stored = stored.clone();
        Ok(Some(data.view(&stored)))
    }

    async fn delete_student(&self, id: i32) -> anyhow::Result<bool> {
        let mut data = self.inner.write().await;
        Ok(data.students.remove(&id).is_some())
    }

    async fn enroll(&self, student_id: i32, course_id: i32) -> anyhow::Result<EnrollmentOutcome> {
        let mut data = self.inner.write().await;
        let course_exists = data.courses.contains_key(&course_id);
        let Some(student) = data.students.get_mut(&student_id) else {
            return Ok(EnrollmentOutcome::StudentNotFound);
        };
        if !course_exists {
            return Ok(EnrollmentOutcome::CourseNotFound);
        }

        if student.course_ids.contains(&course_id) {
            return Ok(EnrollmentOutcome::AlreadyEnrolled);
        }
        student.course_ids.push(course_id);

        Ok(EnrollmentOutcome::Enrolled)
    }
}

#[async_trait]
impl CourseStore for MemoryStore {
    async fn list_courses(&self) -> anyhow::Result<Vec<Course>> {
        let data = self.inner.read().await;
        Ok(data.courses.values().cloned().collect())
    }

    async fn find_course(&self, id: i32) -> anyhow::Result<Option<Course>> {
        let data = self.inner.read().await;
        Ok(data.courses.get(&id).cloned())
    }

    async fn insert_course(&self, course_name: &str) -> anyhow::Result<Course> {
        let mut data = self.inner.write().await;
        data.last_course_id += 1;
        let course = Course {
            id: data.last_course_id,
            course_name: course_name.to_string(),
        };
        data.courses.insert(course.id, course.clone());

        Ok(course)
    }

    async fn update_course(&self, id: i32, course_name: &str) -> anyhow::Result<Option<Course>> {
        let mut data = self.inner.write().await;
        Ok(data.courses.get_mut(&id).map(|course| {
            course.course_name = course_name.to_string();
            course.clone()
        }))
    }

    async fn delete_course(&self, id: i32) -> anyhow::Result<bool> {
        let mut data = self.inner.write().await;
        if data.courses.remove(&id).is_none() {
            return Ok(false);
        }
        for student in data.students.values_mut() {
            student.course_ids.retain(|course_id| *course_id != id);
        }

        Ok(true)
    }
}
