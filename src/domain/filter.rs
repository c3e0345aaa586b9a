//! Status filter for the task list view

use crate::domain::Task;

/// Which tasks the list view shows. Transient UI state, never persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    /// Whether a task passes this filter
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

impl std::str::FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" | "done" => Ok(Self::Completed),
            _ => Err(format!("Unknown filter: {}. Use: all, active, or completed", s)),
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_str() {
        assert!(matches!("all".parse::<Filter>(), Ok(Filter::All)));
        assert!(matches!("active".parse::<Filter>(), Ok(Filter::Active)));
        assert!(matches!("completed".parse::<Filter>(), Ok(Filter::Completed)));
        assert!(matches!("done".parse::<Filter>(), Ok(Filter::Completed)));
        assert!(matches!("COMPLETED".parse::<Filter>(), Ok(Filter::Completed)));
        assert!("everything".parse::<Filter>().is_err());
    }

    #[test]
    fn test_filter_matches() {
        let mut task = Task::new("t", None, None);
        assert!(Filter::All.matches(&task));
        assert!(Filter::Active.matches(&task));
        assert!(!Filter::Completed.matches(&task));

        task.completed = true;
        assert!(Filter::All.matches(&task));
        assert!(!Filter::Active.matches(&task));
        assert!(Filter::Completed.matches(&task));
    }

    #[test]
    fn test_filter_default() {
        assert_eq!(Filter::default(), Filter::All);
    }
}
