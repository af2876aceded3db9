//! Human-readable rendering of a dispatch plan.

use crate::model::{DispatchPlan, DropReason};

/// Renders routes in driver input order, one numbered line per stop.
pub fn render_text(plan: &DispatchPlan) -> String {
    let mut out = String::from("\nAssigned Routes:\n");

    for route in &plan.routes {
        out.push_str(&format!("\nDriver {}:\n", route.driver));
        if route.stops.is_empty() {
            out.push_str("(no stops)\n");
        }
        for (index, order) in route.stops.iter().enumerate() {
            out.push_str(&format!(
                "{}. {} ({:.6}, {:.6})\n",
                index + 1,
                order.address,
                order.location.lat,
                order.location.lon
            ));
        }
    }

    if !plan.dropped.is_empty() {
        out.push_str("\nDropped:\n");
        for dropped in &plan.dropped {
            let reason = match dropped.reason {
                DropReason::OverCapacity => "over capacity",
            };
            out.push_str(&format!("- {} (driver {}, {})\n", dropped.order.address, dropped.driver, reason));
        }
    }

    out
}
