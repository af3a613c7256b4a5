use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    // Core development
    Web,
    Backend,
    Ui,
    Database,
    Devops,
    Deploy,
    Testing,

    // Platforms / systems
    Lms,
    Cms,
    Erp,
    Platform,

    // Tools and frameworks
    Astro,
    Tools,
    Dev,

    // Learning and productivity
    Learning,
    Productivity,

    // Personal / misc
    Personal,
    Misc,
    Other,
}

impl Category {
    pub const ALL: [Category; 19] = [
        Category::Web,
        Category::Backend,
        Category::Ui,
        Category::Database,
        Category::Devops,
        Category::Deploy,
        Category::Testing,
        Category::Lms,
        Category::Cms,
        Category::Erp,
        Category::Platform,
        Category::Astro,
        Category::Tools,
        Category::Dev,
        Category::Learning,
        Category::Productivity,
        Category::Personal,
        Category::Misc,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Web => "web",
            Category::Backend => "backend",
            Category::Ui => "ui",
            Category::Database => "database",
            Category::Devops => "devops",
            Category::Deploy => "deploy",
            Category::Testing => "testing",
            Category::Lms => "lms",
            Category::Cms => "cms",
            Category::Erp => "erp",
            Category::Platform => "platform",
            Category::Astro => "astro",
            Category::Tools => "tools",
            Category::Dev => "dev",
            Category::Learning => "learning",
            Category::Productivity => "productivity",
            Category::Personal => "personal",
            Category::Misc => "misc",
            Category::Other => "other",
        }
    }
}

/// Labels are matched exactly, `Web` or ` web` are not categories.
impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL.iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Unknown category {}", s))
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
