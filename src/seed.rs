//! Reference data loader.
//!
//! Replaces the exercise catalogue (exercises, equipment, muscles and the links between
//! them) and the user table with a fixed starter set plus a demo account. Everything runs
//! in one transaction, so a failed seed leaves the previous data untouched.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::Serialize;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::Result;
use crate::models::{Difficulty, ExerciseCategory, MuscleRole, User};
use crate::repositories::exercise_repo::{link_equipment, link_muscles};
use crate::repositories::user_repo::{hash_password, insert_user};
use crate::repositories::with_transaction;

struct ExerciseData {
    name: &'static str,
    category: ExerciseCategory,
    description: &'static str,
    how_to_perform: &'static [&'static str],
    difficulty: Difficulty,
}

struct EquipmentData {
    name: &'static str,
    description: &'static str,
}

struct MuscleData {
    name: &'static str,
    description: Option<&'static str>,
    is_front: bool,
}

const EXERCISES: &[ExerciseData] = &[
    ExerciseData {
        name: "Push-ups",
        category: ExerciseCategory::Strength,
        description: "A classic bodyweight exercise that targets the chest, shoulders, and triceps",
        how_to_perform: &[
            "1. Start in a plank position with your hands slightly wider than shoulder-width apart.",
            "2. Lower your body by bending your elbows, creating a 90-degree angle at your elbows.",
            "3. Push through your palms to straighten your elbows and return to the starting position.",
            "4. Repeat for the desired number of reps.",
        ],
        difficulty: Difficulty::Beginner,
    },
    ExerciseData {
        name: "Pull-ups",
        category: ExerciseCategory::Strength,
        description: "An upper body exercise that primarily targets the back and biceps",
        how_to_perform: &[
            "1. Hang from a pull-up bar with your hands slightly wider than shoulder-width apart.",
            "2. Pull yourself up until your chin is over the bar.",
            "3. Lower yourself back down to the starting position.",
            "4. Repeat for the desired number of reps.",
        ],
        difficulty: Difficulty::Intermediate,
    },
    ExerciseData {
        name: "Squats",
        category: ExerciseCategory::Strength,
        description:
            "A lower body compound exercise that targets the quadriceps, hamstrings, and glutes",
        how_to_perform: &[
            "1. Stand with your feet shoulder-width apart and your toes slightly turned out.",
            "2. Lower your body by bending your knees and pushing your hips back, as if sitting into a chair.",
            "3. Keep your back straight and your core engaged.",
            "4. Push through your heels to return to the starting position.",
            "5. Repeat for the desired number of reps.",
        ],
        difficulty: Difficulty::Beginner,
    },
    ExerciseData {
        name: "Running",
        category: ExerciseCategory::Cardio,
        description:
            "A fundamental cardio exercise that improves endurance and cardiovascular health",
        how_to_perform: &[
            "1. Run on a treadmill or outside",
            "2. Choose a comfortable pace and duration",
        ],
        difficulty: Difficulty::Beginner,
    },
    ExerciseData {
        name: "Yoga Flow",
        category: ExerciseCategory::Flexibility,
        description:
            "A series of poses that improve flexibility, balance, and mind-body connection",
        how_to_perform: &[
            "1. Start by standing with your feet shoulder-width apart and your toes slightly turned out.",
            "2. Push through your heels to return to the starting position.",
            "3. Repeat for the desired number of reps.",
        ],
        difficulty: Difficulty::Beginner,
    },
];

const EQUIPMENT: &[EquipmentData] = &[
    EquipmentData {
        name: "None",
        description: "Requires no equipment",
    },
    EquipmentData {
        name: "Dumbbells",
        description: "Free weights used for resistance training",
    },
    EquipmentData {
        name: "Barbell",
        description: "A long bar and weights used for resistance training",
    },
    EquipmentData {
        name: "SZ-Bar",
        description: "A short bar and weights with a curved centre",
    },
    EquipmentData {
        name: "Gym Mat",
        description: "A non-slip mat for floor exercises and yoga",
    },
    EquipmentData {
        name: "Pull-up Bar",
        description: "A mounted bar for performing pull-ups and hanging exercises",
    },
    EquipmentData {
        name: "Resistance Bands",
        description: "Elastic bands used for strength training and rehabilitation",
    },
    EquipmentData {
        name: "Jump Rope",
        description: "A rope used for cardio and coordination exercises",
    },
    EquipmentData {
        name: "Swiss Ball",
        description: "A ball used for stability and balance exercises",
    },
    EquipmentData {
        name: "Kettlebell",
        description: "A weight used for strength training and rehabilitation",
    },
    EquipmentData {
        name: "Bench",
        description: "A flat surface used for strength training and rehabilitation",
    },
];

const MUSCLES: &[MuscleData] = &[
    MuscleData {
        name: "Chest (Pectoralis)",
        description: Some("The large muscles of the chest, responsible for pushing movements"),
        is_front: true,
    },
    MuscleData {
        name: "Back (Latissimus Dorsi)",
        description: Some("The large muscles of the back, responsible for pulling movements"),
        is_front: false,
    },
    MuscleData {
        name: "Shoulders (Deltoids)",
        description: Some("The three-headed shoulder muscles that control arm movement"),
        is_front: true,
    },
    MuscleData {
        name: "Biceps",
        description: Some("The front of the upper arm, responsible for elbow flexion"),
        is_front: true,
    },
    MuscleData {
        name: "Triceps",
        description: Some("The back of the upper arm, responsible for elbow extension"),
        is_front: false,
    },
    MuscleData {
        name: "Quadriceps",
        description: Some("The front thigh muscles, responsible for leg extension"),
        is_front: true,
    },
    MuscleData {
        name: "Hamstrings",
        description: Some("The back thigh muscles, responsible for leg flexion"),
        is_front: false,
    },
    MuscleData {
        name: "Glutes",
        description: Some("The buttocks muscles, responsible for hip extension"),
        is_front: false,
    },
    MuscleData {
        name: "Trapezius",
        description: None,
        is_front: false,
    },
    MuscleData {
        name: "Soleus",
        description: Some("The lower leg muscles, responsible for plantar flexion"),
        is_front: false,
    },
    MuscleData {
        name: "Brachialis",
        description: Some("The front of the upper arm, responsible for elbow flexion"),
        is_front: true,
    },
    MuscleData {
        name: "Abs",
        description: Some("The abdominal muscles, responsible for core stability"),
        is_front: true,
    },
    MuscleData {
        name: "Erector spinae",
        description: Some("The back muscles, responsible for spine stability"),
        is_front: false,
    },
    MuscleData {
        name: "Obliques",
        description: Some("The side abdominal muscles, responsible for twisting movements"),
        is_front: true,
    },
    MuscleData {
        name: "Core",
        description: Some("The abdominal and lower back muscles that stabilize the spine"),
        is_front: true,
    },
];

/// Exercise name to the names of the equipment it uses.
const EXERCISE_EQUIPMENT: &[(&str, &[&str])] = &[
    ("Push-ups", &["Gym Mat"]),
    ("Pull-ups", &["Pull-up Bar"]),
    ("Yoga Flow", &["Gym Mat"]),
];

/// Exercise name to the muscles it trains.
const EXERCISE_MUSCLES: &[(&str, &[(&str, MuscleRole)])] = &[
    (
        "Push-ups",
        &[
            ("Chest (Pectoralis)", MuscleRole::Primary),
            ("Shoulders (Deltoids)", MuscleRole::Primary),
            ("Triceps", MuscleRole::Primary),
            ("Core", MuscleRole::Secondary),
        ],
    ),
    (
        "Pull-ups",
        &[
            ("Back (Latissimus Dorsi)", MuscleRole::Primary),
            ("Biceps", MuscleRole::Primary),
            ("Shoulders (Deltoids)", MuscleRole::Secondary),
            ("Core", MuscleRole::Secondary),
        ],
    ),
    (
        "Squats",
        &[
            ("Quadriceps", MuscleRole::Primary),
            ("Hamstrings", MuscleRole::Primary),
            ("Glutes", MuscleRole::Primary),
            ("Core", MuscleRole::Secondary),
        ],
    ),
];

pub const DEMO_USER_NAME: &str = "Demo User";
pub const DEMO_USER_EMAIL: &str = "demo@example.com";
pub const DEMO_USER_PASSWORD: &str = "password123";

/// Row counts written by a seed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub users: usize,
    pub exercises: usize,
    pub equipment: usize,
    pub muscles: usize,
    pub equipment_links: usize,
    pub muscle_links: usize,
}

pub async fn seed(pool: &DbPool) -> Result<SeedSummary> {
    // Hashing stays outside the write transaction.
    let password_hash = tokio::task::spawn_blocking(|| hash_password(DEMO_USER_PASSWORD))
        .await
        .map_err(|e| crate::error::AppError::Internal(e.to_string()))??;

    let summary = with_transaction(pool, move |tx| seed_connection(tx, password_hash)).await?;

    tracing::info!(
        "Seeded {} exercises, {} equipment items, {} muscles, {} users",
        summary.exercises,
        summary.equipment,
        summary.muscles,
        summary.users
    );
    Ok(summary)
}

/// Clears and reloads the seeded tables on `conn`. The caller owns the transaction.
pub fn seed_connection(conn: &Connection, demo_password_hash: String) -> Result<SeedSummary> {
    clear(conn)?;
    tracing::info!("Cleared existing data");

    let now = Utc::now();
    let mut summary = SeedSummary::default();

    insert_user(
        conn,
        &User {
            id: Uuid::new_v4().to_string(),
            name: Some(DEMO_USER_NAME.to_string()),
            email: DEMO_USER_EMAIL.to_string(),
            password_hash: Some(demo_password_hash),
            email_verified: None,
            image: None,
            created_at: now,
        },
    )?;
    summary.users = 1;
    tracing::info!("Created demo user {}", DEMO_USER_EMAIL);

    let exercise_ids = insert_exercises(conn, now)?;
    summary.exercises = exercise_ids.len();
    tracing::info!("Inserted {} exercises", summary.exercises);

    let equipment_ids = insert_equipment(conn, now)?;
    summary.equipment = equipment_ids.len();
    tracing::info!("Inserted {} equipment items", summary.equipment);

    let muscle_ids = insert_muscles(conn, now)?;
    summary.muscles = muscle_ids.len();
    tracing::info!("Inserted {} muscles", summary.muscles);

    for (exercise_name, equipment_names) in EXERCISE_EQUIPMENT {
        let Some(exercise_id) = lookup(&exercise_ids, "exercise", exercise_name) else {
            continue;
        };
        let ids: Vec<String> = equipment_names
            .iter()
            .filter_map(|name| lookup(&equipment_ids, "equipment", name))
            .map(str::to_string)
            .collect();
        link_equipment(conn, exercise_id, &ids)?;
        summary.equipment_links += ids.len();
    }
    tracing::info!("Created {} exercise-equipment links", summary.equipment_links);

    for (exercise_name, muscles) in EXERCISE_MUSCLES {
        let Some(exercise_id) = lookup(&exercise_ids, "exercise", exercise_name) else {
            continue;
        };
        let links: Vec<(String, MuscleRole)> = muscles
            .iter()
            .filter_map(|(name, role)| {
                lookup(&muscle_ids, "muscle", name).map(|id| (id.to_string(), *role))
            })
            .collect();
        link_muscles(conn, exercise_id, &links)?;
        summary.muscle_links += links.len();
    }
    tracing::info!("Created {} exercise-muscle links", summary.muscle_links);

    Ok(summary)
}

/// Deleting users cascades to sessions, workouts, logs and records, which releases the
/// exercise references those rows hold.
fn clear(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "DELETE FROM fitness_tracker_exercise_muscles;
         DELETE FROM fitness_tracker_exercise_equipment;
         DELETE FROM fitness_tracker_users;
         DELETE FROM fitness_tracker_exercises;
         DELETE FROM fitness_tracker_equipment;
         DELETE FROM fitness_tracker_muscles;",
    )?;
    Ok(())
}

fn insert_exercises(conn: &Connection, now: DateTime<Utc>) -> Result<HashMap<&'static str, String>> {
    let mut stmt = conn.prepare(
        "INSERT INTO fitness_tracker_exercises
            (id, name, category, description, how_to_perform, difficulty, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )?;
    let mut ids = HashMap::new();
    for exercise in EXERCISES {
        let id = Uuid::new_v4().to_string();
        stmt.execute(rusqlite::params![
            id,
            exercise.name,
            exercise.category.as_str(),
            exercise.description,
            exercise.how_to_perform.join("\n"),
            exercise.difficulty.as_str(),
            now.timestamp(),
        ])?;
        ids.insert(exercise.name, id);
    }
    Ok(ids)
}

fn insert_equipment(conn: &Connection, now: DateTime<Utc>) -> Result<HashMap<&'static str, String>> {
    let mut stmt = conn.prepare(
        "INSERT INTO fitness_tracker_equipment (id, name, description, created_at)
         VALUES (?, ?, ?, ?)",
    )?;
    let mut ids = HashMap::new();
    for item in EQUIPMENT {
        let id = Uuid::new_v4().to_string();
        stmt.execute(rusqlite::params![id, item.name, item.description, now.timestamp()])?;
        ids.insert(item.name, id);
    }
    Ok(ids)
}

fn insert_muscles(conn: &Connection, now: DateTime<Utc>) -> Result<HashMap<&'static str, String>> {
    let mut stmt = conn.prepare(
        "INSERT INTO fitness_tracker_muscles (id, name, description, is_front, created_at)
         VALUES (?, ?, ?, ?, ?)",
    )?;
    let mut ids = HashMap::new();
    for muscle in MUSCLES {
        let id = Uuid::new_v4().to_string();
        stmt.execute(rusqlite::params![
            id,
            muscle.name,
            muscle.description,
            muscle.is_front,
            now.timestamp(),
        ])?;
        ids.insert(muscle.name, id);
    }
    Ok(ids)
}

fn lookup<'a>(ids: &'a HashMap<&'static str, String>, kind: &str, name: &str) -> Option<&'a str> {
    let id = ids.get(name).map(String::as_str);
    if id.is_none() {
        tracing::warn!("Skipping link to unknown {} {:?}", kind, name);
    }
    id
}
