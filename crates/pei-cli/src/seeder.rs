//! Fake data generation for local development.

use std::time::Instant;

use anyhow::Context;
use chrono::NaiveDate;
use fake::Fake;
use fake::faker::address::en::{CityName, StreetName};
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use sqlx::PgPool;
use uuid::Uuid;

const GRADES: [&str; 9] = [
    "1º ano", "2º ano", "3º ano", "4º ano", "5º ano", "6º ano", "7º ano", "8º ano", "9º ano",
];
const CLASSES: [&str; 3] = ["A", "B", "C"];

#[derive(Debug, Clone)]
pub struct SchoolSeed {
    pub name: String,
    pub address: String,
    pub phone: String,
}

#[derive(Debug, Clone)]
pub struct StudentSeed {
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub grade: String,
    pub class_name: String,
}

pub fn generate_schools(count: usize) -> Vec<SchoolSeed> {
    (0..count)
        .map(|i| {
            let city: String = CityName().fake();
            let street: String = StreetName().fake();
            let number: u16 = (1..2000).fake();
            SchoolSeed {
                // Suffix keeps names unique across one seeding run.
                name: format!("Escola Municipal {city} {}", i + 1),
                address: format!("{street}, {number} - {city}"),
                phone: PhoneNumber().fake(),
            }
        })
        .collect()
}

pub fn generate_students(count: usize) -> Vec<StudentSeed> {
    (0..count)
        .map(|_| {
            let year: i32 = (2010..2020).fake();
            let month: u32 = (1..13).fake();
            let day: u32 = (1..29).fake();
            StudentSeed {
                name: Name().fake(),
                birth_date: NaiveDate::from_ymd_opt(year, month, day),
                grade: GRADES[(0..GRADES.len()).fake::<usize>()].to_string(),
                class_name: CLASSES[(0..CLASSES.len()).fake::<usize>()].to_string(),
            }
        })
        .collect()
}

pub async fn seed_schools(db: &PgPool, count: usize) -> anyhow::Result<Vec<Uuid>> {
    let start = Instant::now();
    println!("Seeding {count} schools...");

    let mut tx = db.begin().await.context("Failed to start transaction")?;
    let mut ids = Vec::with_capacity(count);
    for school in generate_schools(count) {
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO escolas (nome, endereco, telefone) VALUES ($1, $2, $3) \
             ON CONFLICT (nome) DO UPDATE SET updated_at = NOW() RETURNING id",
        )
        .bind(&school.name)
        .bind(&school.address)
        .bind(&school.phone)
        .fetch_one(&mut *tx)
        .await
        .context("Failed to insert school")?;
        ids.push(id);
    }
    tx.commit().await.context("Failed to commit schools")?;

    println!("   Inserted {} schools in {:?}", ids.len(), start.elapsed());
    Ok(ids)
}

/// Seeds `per_school` students into every school in `school_ids`.
pub async fn seed_students(db: &PgPool, school_ids: &[Uuid], per_school: usize) -> anyhow::Result<u64> {
    let start = Instant::now();
    println!(
        "Seeding {per_school} students into each of {} schools...",
        school_ids.len()
    );

    let mut tx = db.begin().await.context("Failed to start transaction")?;
    let mut inserted = 0;
    for school_id in school_ids {
        for student in generate_students(per_school) {
            sqlx::query(
                "INSERT INTO alunos (nome, data_nascimento, escola_id, serie, turma) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(&student.name)
            .bind(student.birth_date)
            .bind(school_id)
            .bind(&student.grade)
            .bind(&student.class_name)
            .execute(&mut *tx)
            .await
            .context("Failed to insert student")?;
            inserted += 1;
        }
    }
    tx.commit().await.context("Failed to commit students")?;

    println!("   Inserted {inserted} students in {:?}", start.elapsed());
    Ok(inserted)
}

pub async fn existing_school_ids(db: &PgPool) -> anyhow::Result<Vec<Uuid>> {
    sqlx::query_scalar("SELECT id FROM escolas ORDER BY nome")
        .fetch_all(db)
        .await
        .context("Failed to fetch schools")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_schools_have_distinct_names() {
        let schools = generate_schools(20);
        assert_eq!(schools.len(), 20);
        let mut names: Vec<_> = schools.iter().map(|s| s.name.clone()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 20);
    }

    #[test]
    fn test_generate_students() {
        let students = generate_students(50);
        assert_eq!(students.len(), 50);
        for student in students {
            assert!(!student.name.is_empty());
            assert!(student.birth_date.is_some());
            assert!(GRADES.contains(&student.grade.as_str()));
            assert!(CLASSES.contains(&student.class_name.as_str()));
        }
    }
}
