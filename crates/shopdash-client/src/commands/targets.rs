use std::path::Path;

use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::TargetsData;
use crate::records::settings::{self, TargetChanges};
use crate::store::Store;
use crate::{ClientError, ClientResult};

pub fn show() -> ClientResult<SuccessEnvelope> {
    show_with_home_override(None)
}

#[doc(hidden)]
pub fn show_with_home_override(home_override: Option<&Path>) -> ClientResult<SuccessEnvelope> {
    let store = Store::open(home_override)?;
    let connection = store.connect()?;
    let targets = settings::load_sales_targets(&connection, store.db_path())?;
    success("target show", TargetsData { targets })
}

pub fn set(changes: TargetChanges) -> ClientResult<SuccessEnvelope> {
    set_with_home_override(changes, None)
}

#[doc(hidden)]
pub fn set_with_home_override(
    changes: TargetChanges,
    home_override: Option<&Path>,
) -> ClientResult<SuccessEnvelope> {
    if changes.is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            "Pass at least one of --daily, --weekly, --monthly, or --yearly.",
            Some("target set"),
        ));
    }
    let store = Store::open(home_override)?;
    let connection = store.connect()?;
    let targets = settings::update_sales_targets(&connection, store.db_path(), &changes)?;
    success("target set", TargetsData { targets })
}
