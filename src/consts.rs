//! Global constants for the application.

pub const HTTP_PORT: u16 = 8000; // Default port for the HTTP server.
pub const PATIENTS_DB_PATH: &str = "./data/patients.json"; // Patient records file.
