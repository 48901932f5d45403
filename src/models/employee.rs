use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    Admin,
    Employee,
}

impl Role {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Employee => "employee",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "employee" => Some(Role::Employee),
            _ => None,
        }
    }

    /// Helper: convert input from the CLI (case-insensitive)
    pub fn from_code(code: &str) -> Option<Self> {
        Role::from_db_str(&code.to_lowercase())
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,          // ⇔ employees.name
    pub position: String,      // ⇔ employees.position (job title)
    pub pin: String,           // ⇔ employees.pin (TEXT, UNIQUE)
    pub role: Role,            // ⇔ employees.role ('admin' | 'employee')
    pub hourly_rate: Option<f64>, // ⇔ employees.hourly_rate (REAL, nullable)
    pub created_at: String,    // ⇔ employees.created_at (TEXT, ISO8601)
    pub updated_at: Option<String>,
}

impl Employee {
    /// Validate a kiosk PIN: non-empty, digits only, 4..=8 characters.
    pub fn validate_pin(pin: &str) -> Result<(), String> {
        if pin.is_empty() {
            return Err("PIN must not be empty".to_string());
        }
        if !pin.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("PIN '{}' must contain only digits", pin));
        }
        if pin.len() < 4 || pin.len() > 8 {
            return Err(format!("PIN must be 4 to 8 digits, got {}", pin.len()));
        }
        Ok(())
    }
}
