//! Built-in sample blueprints loaded into a default store

use super::schema::{Blueprint, Point};

/// The four sample records every default store starts with.
///
/// Names are kept byte-exact, including the trailing space in `"_bpname_ "`.
pub fn default_seed() -> Vec<Blueprint> {
    vec![
        Blueprint::new(
            "_authorname_",
            "_bpname_ ",
            vec![Point::new(140, 140), Point::new(115, 115)],
        ),
        Blueprint::new(
            "Sebastian",
            "Plano1",
            vec![Point::new(10, 10), Point::new(20, 20), Point::new(30, 30)],
        ),
        Blueprint::new(
            "Sebastian",
            "Plano2",
            vec![Point::new(5, 5), Point::new(15, 15)],
        ),
        Blueprint::new(
            "Vegueta",
            "Plano3",
            vec![Point::new(100, 50), Point::new(120, 80), Point::new(140, 100)],
        ),
    ]
}
