//! Purchase list commands.

use scango_core::{CartLineItem, Money};
use tracing::debug;
use uuid::Uuid;

use crate::error::AppError;
use crate::kiosk::Kiosk;

impl Kiosk {
    /// Removes the line with this local id.
    pub fn remove_item(&mut self, local_id: Uuid) -> Result<CartLineItem, AppError> {
        match self.home.purchase_list.remove_item(local_id) {
            Ok(line) => {
                debug!(local_id = %local_id, name = %line.name, "Removed from purchase list");
                Ok(line)
            }
            Err(e) => Err(self.fail(e.into())),
        }
    }

    /// Removes the line shown at `position` (1-based).
    pub fn remove_line(&mut self, position: usize) -> Result<CartLineItem, AppError> {
        match self.home.purchase_list.line_at(position).map(|line| line.local_id) {
            Some(local_id) => self.remove_item(local_id),
            None => Err(self.fail(AppError::validation(format!("There is no line {position}")))),
        }
    }

    /// Empties the purchase list.
    pub fn clear_list(&mut self) {
        debug!(lines = self.home.purchase_list.len(), "Purchase list cleared");
        self.home.purchase_list.clear();
    }

    /// Sum of the floored tax-inclusive line prices; zero until the tax
    /// rate is known.
    pub fn calculate_total(&self) -> Money {
        self.home.total()
    }
}
