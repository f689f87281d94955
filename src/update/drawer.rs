//! Drawer message handlers (open, close, locks, back)

use crate::commands::Cmd;
use crate::error::Result;
use crate::messages::DrawerMsg;
use crate::model::DrawerLayout;

/// Handle drawer messages from the application
pub fn update_drawer(layout: &mut DrawerLayout, msg: DrawerMsg) -> Result<Cmd> {
    match msg {
        DrawerMsg::Open(target) => layout.open(target),
        DrawerMsg::Close(target) => layout.close(target),
        DrawerMsg::CloseAll => Ok(layout.close_all()),
        DrawerMsg::SetLockMode(mode, target) => layout.set_lock_mode(mode, target),
        // An unconsumed back press has nothing for the layout to do
        DrawerMsg::Back => Ok(layout.handle_back().unwrap_or_default()),
        DrawerMsg::RequestDisallowIntercept(disallow) => {
            let (_, cmd) = layout.request_disallow_intercept(disallow);
            Ok(cmd)
        }
    }
}
