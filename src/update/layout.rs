//! Layout message handlers (measurement, direction)

use crate::commands::Cmd;
use crate::error::Result;
use crate::messages::LayoutMsg;
use crate::model::DrawerLayout;

/// Handle measurement and direction messages from the host layout pass
pub fn update_layout(layout: &mut DrawerLayout, msg: LayoutMsg) -> Result<Cmd> {
    match msg {
        LayoutMsg::Resize(size) => Ok(layout.set_container_size(size)),
        LayoutMsg::PanelMeasured { panel, size } => layout.set_panel_size(panel, size),
        LayoutMsg::SetDirection(direction) => layout.set_direction(direction),
    }
}
