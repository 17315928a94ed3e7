//! Skater roster: participant identities consumed by the tournament engine.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, TournamentError};

/// Riding discipline a skater registers under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkateSpecialty {
    Street,
    Vert,
    Park,
    Freestyle,
    Longboard,
    Cruising,
}

impl std::fmt::Display for SkateSpecialty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SkateSpecialty::Street => "Street",
            SkateSpecialty::Vert => "Vert",
            SkateSpecialty::Park => "Park",
            SkateSpecialty::Freestyle => "Freestyle",
            SkateSpecialty::Longboard => "Longboard",
            SkateSpecialty::Cruising => "Cruising",
        };
        f.write_str(name)
    }
}

/// One registered competitor.
///
/// The id is immutable; evaluations reference it and additionally snapshot
/// the name at write time, so renames never rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skater {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub years_experience: u8,
    pub specialty: SkateSpecialty,
    pub age: u8,
    pub nationality: String,

    /// Base64-encoded profile photo, if one was uploaded.
    #[serde(default)]
    pub photo_base64: Option<String>,

    /// Inactive skaters stay on the roster but cannot log in or be evaluated.
    pub active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Skater {
    /// Create an active skater with a fresh id and timestamps.
    pub fn new(
        name: &str,
        email: &str,
        password: &str,
        years_experience: u8,
        specialty: SkateSpecialty,
        age: u8,
        nationality: &str,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            years_experience,
            specialty,
            age,
            nationality: nationality.to_string(),
            photo_base64: None,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Run all registration field checks.
    pub fn validate(&self) -> Result<()> {
        validate_email(&self.email)?;
        validate_password(&self.password)?;
        validate_name(&self.name)?;
        validate_experience(self.years_experience)?;
        validate_age(self.age)?;
        validate_nationality(&self.nationality)?;
        Ok(())
    }
}

pub fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() {
        return Err(TournamentError::Validation("email is required".to_string()));
    }
    let well_formed = !email.chars().any(char::is_whitespace)
        && matches!(email.split_once('@'), Some((local, domain))
            if !local.is_empty()
                && domain.split('.').count() >= 2
                && domain.split('.').all(|part| !part.is_empty()));
    if !well_formed {
        return Err(TournamentError::Validation(format!("invalid email: {email}")));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(TournamentError::Validation("password is required".to_string()));
    }
    if password.len() < 6 {
        return Err(TournamentError::Validation(
            "password must be at least 6 characters".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(TournamentError::Validation("name is required".to_string()));
    }
    if name.trim().chars().count() < 2 {
        return Err(TournamentError::Validation(
            "name must be at least 2 characters".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_experience(years: u8) -> Result<()> {
    if years > 50 {
        return Err(TournamentError::Validation(
            "years of experience cannot exceed 50".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_age(age: u8) -> Result<()> {
    if !(10..=80).contains(&age) {
        return Err(TournamentError::Validation("age must be between 10 and 80".to_string()));
    }
    Ok(())
}

pub fn validate_nationality(nationality: &str) -> Result<()> {
    if nationality.is_empty() {
        return Err(TournamentError::Validation("nationality is required".to_string()));
    }
    if nationality.trim().chars().count() < 2 {
        return Err(TournamentError::Validation(
            "nationality must be at least 2 characters".to_string(),
        ));
    }
    Ok(())
}

/// The full competitor roster, insertion-ordered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    skaters: Vec<Skater>,
}

impl Roster {
    pub fn new() -> Self {
        Self { skaters: Vec::new() }
    }

    pub fn from_skaters(skaters: Vec<Skater>) -> Self {
        Self { skaters }
    }

    pub fn skaters(&self) -> &[Skater] {
        &self.skaters
    }

    pub fn len(&self) -> usize {
        self.skaters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skaters.is_empty()
    }

    /// Register a new skater after field validation and email uniqueness
    /// checks.
    pub fn add(&mut self, skater: Skater) -> Result<()> {
        skater.validate()?;
        if self.is_email_taken(&skater.email, None) {
            return Err(TournamentError::Validation(format!(
                "email already registered: {}",
                skater.email
            )));
        }
        self.skaters.push(skater);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Skater> {
        self.skaters.iter().find(|s| s.id == id)
    }

    /// Apply a mutation to a skater and refresh `updated_at`. Returns false
    /// when the id is unknown.
    pub fn update<F>(&mut self, id: &str, mutate: F) -> bool
    where
        F: FnOnce(&mut Skater),
    {
        match self.skaters.iter_mut().find(|s| s.id == id) {
            Some(skater) => {
                mutate(skater);
                skater.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Skater> {
        self.skaters.iter().position(|s| s.id == id).map(|idx| self.skaters.remove(idx))
    }

    pub fn find_by_email(&self, email: &str) -> Option<&Skater> {
        self.skaters.iter().find(|s| s.email == email)
    }

    /// Whether an email is already used by a skater other than `exclude_id`.
    pub fn is_email_taken(&self, email: &str, exclude_id: Option<&str>) -> bool {
        self.skaters.iter().any(|s| s.email == email && Some(s.id.as_str()) != exclude_id)
    }

    /// Skaters eligible for evaluation pickers.
    pub fn list_active(&self) -> Vec<&Skater> {
        self.skaters.iter().filter(|s| s.active).collect()
    }

    /// Registrations created within the last `days` days.
    pub fn recent_registrations(&self, days: i64) -> usize {
        let cutoff = Utc::now() - Duration::days(days);
        self.skaters.iter().filter(|s| s.created_at >= cutoff).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(name: &str, email: &str) -> Skater {
        Skater::new(name, email, "secret1", 5, SkateSpecialty::Street, 21, "Chile")
    }

    #[test]
    fn test_add_and_lookup() {
        let mut roster = Roster::new();
        let skater = sample("Alice", "alice@example.com");
        let id = skater.id.clone();

        roster.add(skater).unwrap();

        assert_eq!(roster.len(), 1);
        assert_eq!(roster.get(&id).unwrap().name, "Alice");
        assert!(roster.find_by_email("alice@example.com").is_some());
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let mut roster = Roster::new();
        roster.add(sample("Alice", "alice@example.com")).unwrap();

        let result = roster.add(sample("Alicia", "alice@example.com"));
        assert!(matches!(result, Err(TournamentError::Validation(_))));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_email_taken_excludes_own_id() {
        let mut roster = Roster::new();
        let skater = sample("Alice", "alice@example.com");
        let id = skater.id.clone();
        roster.add(skater).unwrap();

        assert!(roster.is_email_taken("alice@example.com", None));
        assert!(!roster.is_email_taken("alice@example.com", Some(&id)));
    }

    #[test]
    fn test_update_refreshes_timestamp() {
        let mut roster = Roster::new();
        let skater = sample("Alice", "alice@example.com");
        let id = skater.id.clone();
        let created = skater.created_at;
        roster.add(skater).unwrap();

        assert!(roster.update(&id, |s| s.name = "Alicia".to_string()));

        let updated = roster.get(&id).unwrap();
        assert_eq!(updated.name, "Alicia");
        assert!(updated.updated_at >= created);

        assert!(!roster.update("missing", |s| s.name = "X".to_string()));
    }

    #[test]
    fn test_list_active_filters_inactive() {
        let mut roster = Roster::new();
        let mut retired = sample("Bob", "bob@example.com");
        retired.active = false;
        roster.add(retired).unwrap();
        roster.add(sample("Alice", "alice@example.com")).unwrap();

        let active = roster.list_active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Alice");
    }

    #[test]
    fn test_recent_registrations() {
        let mut roster = Roster::new();
        let mut old = sample("Bob", "bob@example.com");
        old.created_at = Utc::now() - Duration::days(30);
        roster.add(old).unwrap();
        roster.add(sample("Alice", "alice@example.com")).unwrap();

        assert_eq!(roster.recent_registrations(7), 1);
        assert_eq!(roster.recent_registrations(60), 2);
    }

    #[test]
    fn test_field_validation() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("a b@example.com").is_err());
        assert!(validate_email("alice@nodot").is_err());
        assert!(validate_email("").is_err());

        assert!(validate_password("secret1").is_ok());
        assert!(validate_password("short").is_err());

        assert!(validate_name("Al").is_ok());
        assert!(validate_name("A").is_err());

        assert!(validate_experience(50).is_ok());
        assert!(validate_experience(51).is_err());

        assert!(validate_age(10).is_ok());
        assert!(validate_age(9).is_err());
        assert!(validate_age(81).is_err());

        assert!(validate_nationality("CL").is_ok());
        assert!(validate_nationality("").is_err());
    }
}
