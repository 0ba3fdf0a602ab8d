pub mod background;
pub mod config;
pub mod surface;
pub mod theme;

pub use background::PillarBackground;
pub use config::{load_config, save_config, PillarConfig};
pub use surface::EguiSurface;
