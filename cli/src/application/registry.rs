//! The suspend/resume service registries.

use crate::application::handle::ServiceHandle;
use crate::domain::config::MonitorConfig;
use crate::domain::error::RegistryError;
use crate::domain::service::WatchSet;

/// Two independent, insertion-ordered name → handle mappings: one for
/// services stopped on suspend, one for services started on resume. A name
/// may appear in both, either, or neither — no cross-set invariant exists.
///
/// Populated once at startup from [`MonitorConfig`] and mutated only through
/// the explicit register/unregister calls below.
#[derive(Debug, Default)]
pub struct ServiceRegistry {
    suspend: Vec<ServiceHandle>,
    resume: Vec<ServiceHandle>,
}

impl ServiceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from the startup configuration.
    ///
    /// # Errors
    ///
    /// `RegistryError::DuplicateRegistration` if a list names the same
    /// service twice.
    pub fn from_config(config: &MonitorConfig) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for name in &config.stop_on_suspend {
            registry.register_for_suspend(name)?;
        }
        for name in &config.start_on_resume {
            registry.register_for_resume(name)?;
        }
        Ok(registry)
    }

    /// Register a service to be stopped when the machine suspends.
    ///
    /// # Errors
    ///
    /// `DuplicateRegistration` if the name is already in the suspend set.
    pub fn register_for_suspend(&mut self, name: &str) -> Result<(), RegistryError> {
        Self::insert(&mut self.suspend, name, WatchSet::Suspend)
    }

    /// Register a service to be started when the machine resumes.
    ///
    /// # Errors
    ///
    /// `DuplicateRegistration` if the name is already in the resume set.
    pub fn register_for_resume(&mut self, name: &str) -> Result<(), RegistryError> {
        Self::insert(&mut self.resume, name, WatchSet::Resume)
    }

    /// Remove a service from the suspend set. No-op if it is not present.
    pub fn unregister_suspend(&mut self, name: &str) {
        self.suspend.retain(|handle| handle.name() != name);
    }

    /// Remove a service from the resume set. No-op if it is not present.
    pub fn unregister_resume(&mut self, name: &str) {
        self.resume.retain(|handle| handle.name() != name);
    }

    /// Read-only view of the suspend set, in registration order.
    #[must_use]
    pub fn suspend_set(&self) -> &[ServiceHandle] {
        &self.suspend
    }

    /// Read-only view of the resume set, in registration order.
    #[must_use]
    pub fn resume_set(&self) -> &[ServiceHandle] {
        &self.resume
    }

    fn insert(
        set: &mut Vec<ServiceHandle>,
        name: &str,
        which: WatchSet,
    ) -> Result<(), RegistryError> {
        if set.iter().any(|handle| handle.name() == name) {
            return Err(RegistryError::DuplicateRegistration {
                service: name.to_string(),
                set: which,
            });
        }
        set.push(ServiceHandle::new(name));
        Ok(())
    }
}
