//! Template registry: built-in study and planner skeletons.
//!
//! Built-ins are seed data: they are recreated on every load and can be
//! neither edited nor deleted. Their ids are slugs of their names so they stay
//! stable across versions.

use crate::models::{Template, TemplateKind, TemplateSection};

/// Slugify a name for use as a stable id (e.g. "Polya's 4 Steps" -> "polya-s-4-steps")
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<&str>>()
        .join("-")
}

fn builtin(kind: TemplateKind, name: &str, sections: &[(&str, &str)]) -> Template {
    Template {
        id: slugify(name),
        name: name.to_string(),
        sections: sections
            .iter()
            .map(|(label, placeholder)| TemplateSection::new(*label, *placeholder))
            .collect(),
        kind,
        builtin: true,
    }
}

pub fn builtin_study_templates() -> Vec<Template> {
    use TemplateKind::Study;
    vec![
        builtin(
            Study,
            "Cornell Notes",
            &[("Title", ""), ("Question/Keyword", "-\n-"), ("Notes", "-\n-"), ("Summary", "-")],
        ),
        builtin(
            Study,
            "Main Idea & Details",
            &[
                ("Main Idea", "___"),
                ("Detail 1", "-"),
                ("Detail 2", "-"),
                ("Detail 3", "-"),
                ("Summary", "-"),
            ],
        ),
        builtin(
            Study,
            "Modified Frayer Model",
            &[("Definition", "-"), ("Characteristics", "-"), ("Examples", "-"), ("Non-Examples", "-")],
        ),
        builtin(
            Study,
            "Polya's 4 Steps",
            &[
                ("1. Understand the Problem", "-"),
                ("2. Devise a Plan", "-"),
                ("3. Carry Out the Plan", "-"),
                ("4. Look Back", "-"),
            ],
        ),
        builtin(
            Study,
            "5W1H",
            &[("Who", "-"), ("What", "-"), ("When", "-"), ("Where", "-"), ("Why", "-"), ("How", "-")],
        ),
        builtin(
            Study,
            "Concept Map",
            &[
                ("Central Concept", "-"),
                ("Related Concept 1", "-"),
                ("Related Concept 2", "-"),
                ("Connections", "-"),
            ],
        ),
    ]
}

pub fn builtin_planner_templates() -> Vec<Template> {
    use TemplateKind::Planner;

    let hours = (8..=17).map(|h| format!("{:02}:00 -", h)).collect::<Vec<_>>().join("\n");
    let weekdays = ["Mon", "Tue", "Wed", "Thu", "Fri"]
        .iter()
        .map(|d| format!("{}:\nFocus:\nTasks: - [ ]", d))
        .collect::<Vec<_>>()
        .join("\n\n");
    let blocks = (8..=17)
        .map(|h| match h {
            12 => "| 12:00 | Lunch |".to_string(),
            17 => "| 17:00 | Wrap Up |".to_string(),
            _ => format!("| {:02}:00 | |", h),
        })
        .collect::<Vec<_>>()
        .join("\n");
    let habit_days = (1..=31).map(|d| format!("| {:<3} |       |       |", d)).collect::<Vec<_>>();
    let habit_grid = format!(
        "| Day | Done? | Notes |\n|-----|-------|-------|\n{}",
        habit_days.join("\n")
    );
    let time_grid = format!("| Time | Block |\n|------|-------|\n{}", blocks);

    vec![
        builtin(
            Planner,
            "Daily Planner",
            &[
                ("Date", ""),
                ("Top 3 Priorities", "1.\n2.\n3."),
                ("Schedule (Hour | Task)", hours.as_str()),
                ("Tasks", "- [ ]\n- [ ]\n- [ ]"),
                ("Notes", "-"),
            ],
        ),
        builtin(
            Planner,
            "Weekly Overview",
            &[("Week Of", ""), ("Goals", "-\n-\n-"), ("Days", weekdays.as_str()), ("Weekend Notes", "-")],
        ),
        builtin(
            Planner,
            "Time Block Grid",
            &[("Date", ""), ("Blocks", time_grid.as_str()), ("Adjustments / Reflections", "-")],
        ),
        builtin(
            Planner,
            "Assignment Tracker",
            &[
                ("Course", ""),
                (
                    "Assignments",
                    "| Assignment | Due Date | Status | Notes |\n|------------|----------|--------|-------|\n|            |          |        |       |",
                ),
                ("Upcoming Deadlines", "-"),
            ],
        ),
        builtin(
            Planner,
            "Habit Tracker",
            &[("Month", ""), ("Habit", ""), ("Log", habit_grid.as_str()), ("Reflection", "-")],
        ),
    ]
}

pub fn builtin_templates(kind: TemplateKind) -> Vec<Template> {
    match kind {
        TemplateKind::Study => builtin_study_templates(),
        TemplateKind::Planner => builtin_planner_templates(),
    }
}

pub fn is_builtin_id(id: &str) -> bool {
    builtin_study_templates()
        .iter()
        .chain(builtin_planner_templates().iter())
        .any(|t| t.id == id)
}
