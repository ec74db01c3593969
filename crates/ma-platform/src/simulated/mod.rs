mod device;
mod launcher;
mod policy_backend;
mod settings;
mod telephony;

pub use device::{DeviceModel, SimulatedDevice};
pub use launcher::SimulatedLauncher;
pub use policy_backend::SimulatedPolicyBackend;
pub use settings::SimulatedDeviceSettings;
pub use telephony::SimulatedTelephony;
