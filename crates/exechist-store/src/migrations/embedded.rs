//! SQL migrations compiled into the binary, in application order

use exechist_core::digest::hash_str;

#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub id: &'static str,
    pub sql: &'static str,
}

impl Migration {
    /// SHA-256 of the SQL text; recorded when applied, compared on every open
    pub fn checksum(&self) -> String {
        hash_str(self.sql)
    }
}

pub const MIGRATIONS: &[Migration] = &[
    Migration {
        id: "001_execution_history",
        sql: include_str!("../../migrations/001_execution_history.sql"),
    },
    Migration {
        id: "002_output_files",
        sql: include_str!("../../migrations/002_output_files.sql"),
    },
];
