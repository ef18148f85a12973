//! Blueprint data types.
//!
//! A blueprint is a named, authored, ordered list of 2D points. Its identity is
//! the `(author, name)` pair; the points are payload and play no part in
//! equality or hashing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Integer 2D point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Composite identity of a blueprint
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlueprintKey {
    pub author: String,
    pub name: String,
}

impl BlueprintKey {
    pub fn new(author: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for BlueprintKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.author, self.name)
    }
}

/// Authored, named sequence of points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blueprint {
    author: String,
    name: String,
    #[serde(default)]
    points: Vec<Point>,
}

impl Blueprint {
    pub fn new(author: impl Into<String>, name: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            author: author.into(),
            name: name.into(),
            points,
        }
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Points in drawing order
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The `(author, name)` pair this blueprint is stored under
    pub fn key(&self) -> BlueprintKey {
        BlueprintKey::new(self.author.clone(), self.name.clone())
    }
}

impl PartialEq for Blueprint {
    fn eq(&self, other: &Self) -> bool {
        self.author == other.author && self.name == other.name
    }
}

impl Eq for Blueprint {}

impl Hash for Blueprint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.author.hash(state);
        self.name.hash(state);
    }
}

impl fmt::Display for Blueprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Blueprint{{author={}, name={}, points=[", self.author, self.name)?;
        for (i, point) in self.points.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", point)?;
        }
        write!(f, "]}}")
    }
}

/// Contents of a TOML seed file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub blueprints: Vec<Blueprint>,
}
