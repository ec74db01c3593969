use async_trait::async_trait;

use ma_core::launch::{LaunchEntry, LaunchError};
use ma_core::ports::LauncherPort;

use super::SimulatedDevice;

/// Activity launcher of a [`SimulatedDevice`].
#[derive(Debug, Clone)]
pub struct SimulatedLauncher {
    device: SimulatedDevice,
    package_name: String,
}

impl SimulatedLauncher {
    pub fn new(device: SimulatedDevice, package_name: impl Into<String>) -> Self {
        Self {
            device,
            package_name: package_name.into(),
        }
    }

    fn enter(&self, operation: &str) -> Result<(), LaunchError> {
        self.device
            .enter(operation)
            .map_err(|e| LaunchError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl LauncherPort for SimulatedLauncher {
    async fn launch_primary(&self) -> Result<(), LaunchError> {
        self.enter("launch_primary")?;
        let mut model = self.device.model_guard();
        if !model.primary_surface_available {
            return Err(LaunchError::Unavailable(format!(
                "main activity of {} not available",
                self.package_name
            )));
        }
        model.foreground = Some(self.package_name.clone());
        Ok(())
    }

    async fn resolve_launch_entry(
        &self,
        package: &str,
    ) -> Result<Option<LaunchEntry>, LaunchError> {
        self.enter("resolve_launch_entry")?;
        Ok(self
            .device
            .model_guard()
            .launch_entries
            .get(package)
            .map(|component| LaunchEntry {
                package: package.to_string(),
                component: component.clone(),
            }))
    }

    async fn launch_entry(&self, entry: &LaunchEntry) -> Result<(), LaunchError> {
        self.enter("launch_entry")?;
        self.device.model_guard().foreground = Some(entry.component.clone());
        Ok(())
    }

    async fn dismiss_onboarding_surface(&self) -> Result<(), LaunchError> {
        self.enter("dismiss_onboarding_surface")?;
        self.device.model_guard().onboarding_surface_visible = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unavailable_primary_and_resolved_entry() {
        let device = SimulatedDevice::managed();
        device.update(|m| {
            m.primary_surface_available = false;
            m.launch_entries
                .insert("com.acme".into(), "com.acme/.Splash".into());
        });
        let launcher = SimulatedLauncher::new(device.clone(), "com.acme");

        assert!(launcher.launch_primary().await.is_err());
        let entry = launcher.resolve_launch_entry("com.acme").await.unwrap().unwrap();
        launcher.launch_entry(&entry).await.unwrap();

        assert_eq!(device.snapshot().foreground.as_deref(), Some("com.acme/.Splash"));
        assert!(launcher.resolve_launch_entry("com.other").await.unwrap().is_none());
    }
}
