//! Shared routines called from every worker
//!
//! They never receive a logger; they resolve whichever one the calling
//! thread bound, or the root logger outside a worker.

use threadlog_core::{ContextBinding, LoggerRegistry};

pub fn inventory_check(registry: &LoggerRegistry) {
    let logger = ContextBinding::resolve(registry);
    logger.critical("Inventory check hit a critical condition");
    logger.error("Inventory check failed to reach the stock service");
    logger.warning("Inventory check found low stock");
    logger.debug("Inventory check scanned the warehouse table");
    logger.info("Inventory check completed");
}

pub fn billing_sync(registry: &LoggerRegistry) {
    let logger = ContextBinding::resolve(registry);
    logger.critical("Billing sync hit a critical condition");
    logger.error("Billing sync rejected an invoice");
    logger.warning("Billing sync is running behind");
    logger.debug("Billing sync fetched pending invoices");
    logger.info("Billing sync completed");
}
