//! Salon configuration file (TOML) and bookings file (JSON) loading.
//!
//! ```toml
//! [salon]
//! name = "Crown & Coil Studio"
//! timezone = "America/Chicago"
//!
//! [slots]
//! granularity_minutes = 60
//!
//! [[business_hours]]
//! day_of_week = 1
//! is_open = true
//! open_time = "09:00"
//! close_time = "17:00"
//! break_start = "12:00"
//! break_end = "13:00"
//!
//! [[special_dates]]
//! date = "2026-03-18"
//! is_open = false
//! name = "Staff Training"
//!
//! [[services]]
//! id = "knotless-braids"
//! name = "Knotless Braids"
//! duration_label = "4-6 hours"
//! ```

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono_tz::Tz;
use fd_lock::RwLock;
use salon_slots::{
    parse_duration_label, Booking, BookingRequest, BusinessHours, InMemorySchedule, Service,
    SlotPolicy, SpecialDate,
};
use serde::Deserialize;
use tempfile::NamedTempFile;

#[derive(Debug, Clone, Deserialize)]
pub struct SalonConfig {
    #[serde(default)]
    pub salon: SalonSection,
    #[serde(default)]
    pub slots: SlotPolicy,
    #[serde(default)]
    pub business_hours: Vec<BusinessHours>,
    #[serde(default)]
    pub special_dates: Vec<SpecialDate>,
    #[serde(default)]
    pub services: Vec<ServiceConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SalonSection {
    #[serde(default = "default_name")]
    pub name: String,
    /// IANA timezone used to resolve "today".
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for SalonSection {
    fn default() -> Self {
        Self {
            name: default_name(),
            timezone: default_timezone(),
        }
    }
}

fn default_name() -> String {
    "Salon".to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

/// A service entry. `duration_minutes` may be omitted when a parseable
/// `duration_label` is present.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub id: String,
    pub name: String,
    pub duration_minutes: Option<u32>,
    pub duration_label: Option<String>,
}

impl ServiceConfig {
    fn into_service(self) -> Result<Service> {
        let duration_minutes = match (self.duration_minutes, self.duration_label.as_deref()) {
            (Some(minutes), _) => minutes,
            (None, Some(label)) => {
                let minutes = parse_duration_label(label)
                    .with_context(|| format!("Service '{}' has no usable duration", self.id))?;
                tracing::debug!(
                    service = %self.id,
                    label,
                    minutes,
                    "duration_minutes missing, derived from label"
                );
                minutes
            }
            (None, None) => anyhow::bail!(
                "Service '{}' needs duration_minutes or duration_label",
                self.id
            ),
        };
        Ok(Service {
            id: self.id,
            name: self.name,
            duration_minutes,
            duration_label: self.duration_label,
        })
    }
}

/// Everything a command needs, loaded and validated.
#[derive(Debug, Clone)]
pub struct Salon {
    pub name: String,
    pub timezone: Tz,
    pub policy: SlotPolicy,
    pub schedule: InMemorySchedule,
}

impl Salon {
    /// Load the salon configuration and, if given, its bookings file.
    ///
    /// A bookings path that does not exist yet loads as an empty list so
    /// `book` can create it.
    pub fn load(config_path: &Path, bookings_path: Option<&Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
        let config: SalonConfig = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config: {}", config_path.display()))?;
        tracing::debug!(
            path = %config_path.display(),
            weekdays = config.business_hours.len(),
            special_dates = config.special_dates.len(),
            services = config.services.len(),
            "loaded salon config"
        );

        let bookings = match bookings_path {
            Some(path) => load_bookings(path)?,
            None => Vec::new(),
        };

        Self::from_config(config, bookings)
    }

    pub fn from_config(config: SalonConfig, bookings: Vec<Booking>) -> Result<Self> {
        let timezone: Tz = config
            .salon
            .timezone
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid timezone '{}': {}", config.salon.timezone, e))?;
        config.slots.validate().context("Invalid [slots] section")?;

        let services = config
            .services
            .into_iter()
            .map(ServiceConfig::into_service)
            .collect::<Result<Vec<_>>>()?;

        let schedule = InMemorySchedule {
            business_hours: config.business_hours,
            special_dates: config.special_dates,
            bookings,
            services,
        };
        schedule.validate().context("Invalid salon schedule")?;

        Ok(Self {
            name: config.salon.name,
            timezone,
            policy: config.slots,
            schedule,
        })
    }
}

pub fn load_bookings(path: &Path) -> Result<Vec<Booking>> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "bookings file missing, starting empty");
        return Ok(Vec::new());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read bookings: {}", path.display()))?;
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let bookings: Vec<Booking> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse bookings: {}", path.display()))?;
    tracing::debug!(path = %path.display(), count = bookings.len(), "loaded bookings");
    Ok(bookings)
}

/// Book a slot against the current contents of the bookings file and save it,
/// all under the bookings lock.
pub fn book_and_save(
    config_path: &Path,
    bookings_path: &Path,
    request: &BookingRequest,
) -> Result<Booking> {
    with_bookings_lock(bookings_path, || {
        let mut salon = Salon::load(config_path, Some(bookings_path))?;
        let booking = salon
            .schedule
            .book(request, &salon.policy)
            .context("Failed to book slot")?;
        save_bookings(bookings_path, &salon.schedule.bookings)?;
        Ok(booking)
    })
}

/// Replace the bookings file in one step: write a sibling temp file, then
/// rename it over `path`. Readers never see a half-written file.
pub fn save_bookings(path: &Path, bookings: &[Booking]) -> Result<()> {
    let json = serde_json::to_string_pretty(bookings)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    tmp.write_all(json.as_bytes())?;
    tmp.write_all(b"\n")?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("Failed to write bookings: {}", path.display()))?;
    Ok(())
}

/// Sidecar lock file for a bookings file. The bookings file itself is
/// replaced by rename on save, so it cannot carry the lock.
pub fn lock_path(bookings_path: &Path) -> PathBuf {
    let mut name = bookings_path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

/// Run `f` while holding an exclusive lock on the bookings file.
///
/// `f` must load, modify, and save the bookings itself so the whole
/// read-check-write cycle happens under the lock. Other `salon` processes
/// block until it returns.
pub fn with_bookings_lock<T>(bookings_path: &Path, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let lock_path = lock_path(bookings_path);
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .read(true)
        .write(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to open lock file: {}", lock_path.display()))?;
    let mut lock = RwLock::new(file);
    let _guard = lock
        .write()
        .with_context(|| format!("Failed to lock bookings: {}", lock_path.display()))?;
    tracing::debug!(path = %lock_path.display(), "bookings lock acquired");
    f()
}
