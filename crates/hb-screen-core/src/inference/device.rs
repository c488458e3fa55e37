//! Device selection for inference.

use candle_core::Device;
use tracing::info;

/// Returns the device the hemoglobin model should run on.
///
/// With `force_cpu` unset, a GPU is used when the crate was built with the
/// `metal` or `cuda` feature and one is available.
#[must_use]
pub fn select_device(force_cpu: bool) -> Device {
    if force_cpu {
        info!("Using CPU for inference (forced)");
        return Device::Cpu;
    }

    #[cfg(feature = "metal")]
    {
        if let Ok(device) = Device::new_metal(0) {
            info!("Using Metal device for inference");
            return device;
        }
    }

    #[cfg(feature = "cuda")]
    {
        if let Ok(device) = Device::new_cuda(0) {
            info!("Using CUDA device for inference");
            return device;
        }
    }

    info!("Using CPU for inference");
    Device::Cpu
}
