use bevy::app::{PluginGroup, PluginGroupBuilder};

use crate::config::{SocketConfig, ViewportConfig};
use crate::socket::SocketPlugin;
use crate::viewport::ViewportPlugin;

/// The viewport sizer and the socket client, each with its own config.
#[derive(Default)]
pub struct ViewportSocketPlugins {
    pub viewport: ViewportConfig,
    pub socket: SocketConfig,
}

impl PluginGroup for ViewportSocketPlugins {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(ViewportPlugin::new(self.viewport))
            .add(SocketPlugin::new(self.socket))
    }
}
