mod device;
mod device_model;
mod edge_device;
mod edge_device_model;
mod power_profile;
mod tag_value;

pub use device::Device;
pub use device_model::DeviceModel;
pub use edge_device::EdgeDevice;
pub use edge_device_model::EdgeDeviceModel;
pub use power_profile::PowerProfile;
pub use tag_value::TagValue;
