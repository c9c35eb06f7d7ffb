//! Pane focus order.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pane {
    Databases,
    Tables,
    Schema,
    Question,
    Sql,
    Results,
}

impl Pane {
    pub fn title(&self) -> &'static str {
        match self {
            Pane::Databases => "Databases",
            Pane::Tables => "Tables",
            Pane::Schema => "Schema",
            Pane::Question => "Question",
            Pane::Sql => "Generated SQL",
            Pane::Results => "Results",
        }
    }

    pub fn all() -> &'static [Pane] {
        &[
            Pane::Databases,
            Pane::Tables,
            Pane::Schema,
            Pane::Question,
            Pane::Sql,
            Pane::Results,
        ]
    }

    pub fn index(&self) -> usize {
        Self::all().iter().position(|p| p == self).unwrap_or(0)
    }

    pub fn next(&self) -> Pane {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(&self) -> Pane {
        let all = Self::all();
        let idx = self.index();
        let prev = if idx == 0 { all.len() - 1 } else { idx - 1 };
        all[prev]
    }
}
