use crate::domain::{Device, DeviceModel, EdgeDevice, EdgeDeviceModel};
use crate::store::repository::Entity;

impl Entity for Device {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for DeviceModel {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for EdgeDevice {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for EdgeDeviceModel {
    fn id(&self) -> &str {
        &self.id
    }
}
