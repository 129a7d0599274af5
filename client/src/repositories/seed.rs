//! Built-in sample data for the mock backend

use chrono::{TimeZone, Utc};
use gym_tracker_shared::{
    rank_entries, Achievement, Exercise, Gender, PlanSlot, RankingEntry, RankingWindow, Role,
    StudentProfile, UserAccount, WorkoutPlan,
};

/// Accounts accepted by mock login, matched by email
pub fn accounts() -> Vec<UserAccount> {
    vec![
        UserAccount {
            id: "t1".to_string(),
            name: "Carlos Mendes".to_string(),
            email: "teacher@gym.com".to_string(),
            role: Role::Teacher,
            level: 1,
            points: 0,
            streak: 0,
        },
        students()[0].account.clone(),
    ]
}

/// Students written to storage the first time the mock store starts
pub fn students() -> Vec<StudentProfile> {
    vec![
        student(
            "1",
            "João Silva",
            "student@gym.com",
            28,
            Some(78.5),
            Some(1.78),
            Gender::Male,
            3,
            120,
            5,
            None,
        ),
        student(
            "2",
            "Maria Oliveira",
            "maria@gym.com",
            24,
            Some(61.0),
            Some(1.65),
            Gender::Female,
            5,
            240,
            12,
            Some("Mild scoliosis"),
        ),
        student(
            "3",
            "Pedro Santos",
            "pedro@gym.com",
            35,
            None,
            None,
            Gender::Male,
            1,
            30,
            0,
            None,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn student(
    id: &str,
    name: &str,
    email: &str,
    age: u32,
    weight: Option<f64>,
    height: Option<f64>,
    gender: Gender,
    level: u32,
    points: u32,
    streak: u32,
    health_notes: Option<&str>,
) -> StudentProfile {
    StudentProfile {
        account: UserAccount {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role: Role::Student,
            level,
            points,
            streak,
        },
        age,
        weight,
        height,
        gender: Some(gender),
        health_notes: health_notes.map(str::to_string),
    }
}

/// Sample plans shown to students without an assigned training
pub fn workout_plans() -> Vec<WorkoutPlan> {
    vec![
        WorkoutPlan {
            id: "w1".to_string(),
            plan_type: PlanSlot::A,
            name: "Peito e Tríceps".to_string(),
            exercises: vec![
                exercise("e1", "Supino Reto", 4, "8-12", 40.0, "90s"),
                exercise("e2", "Supino Inclinado", 3, "10-12", 30.0, "60s"),
                exercise("e3", "Tríceps Corda", 3, "12-15", 20.0, "60s"),
            ],
        },
        WorkoutPlan {
            id: "w2".to_string(),
            plan_type: PlanSlot::B,
            name: "Costas e Bíceps".to_string(),
            exercises: vec![
                exercise("e4", "Puxada Frontal", 4, "8-12", 45.0, "90s"),
                exercise("e5", "Remada Curvada", 3, "8-10", 35.0, "90s"),
                exercise("e6", "Rosca Direta", 3, "10-12", 12.5, "60s"),
            ],
        },
        WorkoutPlan {
            id: "w3".to_string(),
            plan_type: PlanSlot::C,
            name: "Pernas".to_string(),
            exercises: vec![
                exercise("e7", "Agachamento", 4, "8-12", 60.0, "120s"),
                exercise("e8", "Leg Press", 4, "10-12", 120.0, "90s"),
                exercise("e9", "Cadeira Extensora", 3, "12-15", 35.0, "60s"),
            ],
        },
    ]
}

fn exercise(id: &str, name: &str, series: u32, reps: &str, weight: f64, rest: &str) -> Exercise {
    Exercise {
        id: id.to_string(),
        name: name.to_string(),
        series,
        reps: reps.to_string(),
        weight,
        rest: rest.to_string(),
        completed: false,
        personal_record: false,
    }
}

pub fn achievements() -> Vec<Achievement> {
    let unlocked_at = |day: u32| Utc.with_ymd_and_hms(2025, 1, day, 18, 0, 0).single();
    vec![
        achievement(
            "a1",
            "First Workout",
            "Complete your first workout",
            "🏋️",
            unlocked_at(2),
        ),
        achievement("a2", "On Fire", "Keep a 5-day streak", "🔥", unlocked_at(9)),
        achievement("a3", "Record Breaker", "Set a personal record", "🏆", None),
        achievement("a4", "Consistent", "Train 4 days in one week", "📅", None),
        achievement("a5", "Level 10", "Reach level 10", "⭐", None),
    ]
}

fn achievement(
    id: &str,
    name: &str,
    description: &str,
    icon: &str,
    unlocked_at: Option<chrono::DateTime<Utc>>,
) -> Achievement {
    Achievement {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        unlocked: unlocked_at.is_some(),
        unlocked_at,
    }
}

/// Leaderboard for a window, already ranked
pub fn ranking(window: RankingWindow) -> Vec<RankingEntry> {
    let rows: &[(&str, &str, u32, u32)] = match window {
        RankingWindow::Monthly => &[
            ("2", "Maria Oliveira", 240, 5),
            ("1", "João Silva", 120, 3),
            ("4", "Lucas Ferreira", 95, 2),
            ("5", "Ana Costa", 180, 4),
            ("3", "Pedro Santos", 30, 1),
        ],
        RankingWindow::Total => &[
            ("2", "Maria Oliveira", 1240, 5),
            ("5", "Ana Costa", 980, 4),
            ("1", "João Silva", 620, 3),
            ("4", "Lucas Ferreira", 410, 2),
            ("3", "Pedro Santos", 30, 1),
        ],
    };

    rank_entries(
        rows.iter()
            .map(|(id, name, points, level)| RankingEntry {
                id: id.to_string(),
                name: name.to_string(),
                points: *points,
                level: *level,
                position: 0,
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_plans_use_distinct_slots() {
        assert!(gym_tracker_shared::validation::validate_training(&workout_plans()).is_ok());
    }

    #[test]
    fn test_ranking_is_ordered() {
        for window in [RankingWindow::Monthly, RankingWindow::Total] {
            let entries = ranking(window);
            for pair in entries.windows(2) {
                assert!(pair[0].points >= pair[1].points);
                assert_eq!(pair[0].position + 1, pair[1].position);
            }
            assert_eq!(entries[0].position, 1);
        }
    }

    #[test]
    fn test_student_account_is_a_seeded_student() {
        let student_login = accounts()
            .into_iter()
            .find(|a| a.role == Role::Student)
            .unwrap();
        assert!(students().iter().any(|s| s.account == student_login));
    }
}
